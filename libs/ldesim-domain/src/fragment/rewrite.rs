//! Origin-rewriting engine
//!
//! Moves the structurally significant identifiers of a document (its primary
//! node, the event stream it belongs to and the targets of its relations) onto
//! the simulator's own origin, so that a client following links never leaves
//! the simulator.

use tracing::debug;
use url::Url;

use super::document::{FragmentShape, IdentifierRewrites};
use super::ids::LocalPath;

/// Rewrites identifiers onto a base origin
///
/// Only scheme, host and port are replaced; path, query and fragment are
/// preserved exactly.
#[derive(Debug, Clone)]
pub struct OriginRewriter {
    base: Url,
}

impl OriginRewriter {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// The origin identifiers are moved to
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Move a single identifier onto the base origin
    ///
    /// Returns `None` for identifiers that carry no origin: blank node labels,
    /// relative references, or URNs and other non-hierarchical schemes.
    pub fn change_origin(&self, identifier: &str) -> Option<Url> {
        let mut url = Url::parse(identifier).ok()?;
        if url.cannot_be_a_base() || !url.has_host() {
            return None;
        }

        url.set_scheme(self.base.scheme()).ok()?;
        url.set_host(self.base.host_str()).ok()?;
        url.set_port(self.base.port()).ok()?;
        Some(url)
    }

    /// Local path of an identifier that lives on the base origin
    ///
    /// Returns `None` when the identifier belongs to another origin.
    pub fn local_path(&self, identifier: &Url) -> Option<LocalPath> {
        if identifier.origin() != self.base.origin() {
            return None;
        }
        Some(LocalPath::from_url(identifier))
    }

    /// Rewrite a document in place and return its new primary identifier
    ///
    /// Every rewrite is computed before any is applied, so no reference is
    /// rewritten twice and no statement ends up mixing old and new forms.
    /// Returns `None` when the document has no primary identifier that can be
    /// moved onto the base origin; the document is then left untouched.
    pub fn rewrite<D: FragmentShape>(&self, document: &mut D) -> Option<Url> {
        let primary = document.primary_identifier()?.to_string();
        let rewritten_primary = self.change_origin(&primary)?;

        let mut rewrites = IdentifierRewrites::new();
        for identifier in std::iter::once(primary.as_str()).chain(document.linked_identifiers()) {
            if rewrites.contains_key(identifier) {
                continue;
            }
            if let Some(rewritten) = self.change_origin(identifier) {
                if rewritten.as_str() != identifier {
                    rewrites.insert(identifier.to_string(), rewritten.into());
                }
            }
        }

        let replaced = document.rewrite_identifiers(&rewrites);
        debug!(
            primary = %rewritten_primary,
            identifiers = rewrites.len(),
            references = replaced,
            "Rewrote document origin"
        );

        Some(rewritten_primary)
    }
}
