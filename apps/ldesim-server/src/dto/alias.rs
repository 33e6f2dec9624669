//! DTOs for alias endpoints

use ldesim_domain::controller::{AliasRequest, Redirection};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating an alias
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAliasRequest {
    /// Absolute URL of the fragment (or alias) to redirect to
    #[schema(example = "http://example.org/id/fragment/1")]
    pub original: String,
    /// Absolute URL that should redirect
    #[schema(example = "http://example.org/fragment?id=1")]
    pub alias: String,
}

impl From<CreateAliasRequest> for AliasRequest {
    fn from(request: CreateAliasRequest) -> Self {
        AliasRequest {
            original: request.original,
            alias: request.alias,
        }
    }
}

/// Response body for a stored alias
#[derive(Debug, Serialize, ToSchema)]
pub struct RedirectionResponse {
    /// Local path that redirects
    #[schema(example = "/fragment?id=1")]
    pub from: String,
    /// Local path it currently resolves to
    #[schema(example = "/id/fragment/1")]
    pub to: String,
}

impl From<Redirection> for RedirectionResponse {
    fn from(redirection: Redirection) -> Self {
        Self {
            from: redirection.from.into(),
            to: redirection.to.into(),
        }
    }
}
