//! Alias table
//!
//! Maps an alias to the path it redirects to, which may itself be an alias.
//! Chains are resolved to their terminus on every lookup.

use std::collections::{BTreeMap, HashSet};

use crate::fragment::{FragmentError, LocalPath, Result};

/// Alias to original-or-next-alias mapping
///
/// Inserting an alias that would close a loop is rejected, so every chain in
/// the table terminates. Lookups still track visited paths and fail instead of
/// spinning should that invariant ever be broken.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: BTreeMap<LocalPath, LocalPath>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `alias -> original` and return where `alias` now resolves to
    ///
    /// An existing mapping for `alias` is replaced.
    ///
    /// # Errors
    ///
    /// Returns `FragmentError::AliasCycle` if following `original` leads back
    /// to `alias` (including `alias == original`); the table is unchanged.
    pub fn insert(&mut self, alias: LocalPath, original: LocalPath) -> Result<LocalPath> {
        if self.leads_to(&original, &alias) {
            return Err(FragmentError::alias_cycle(alias.as_str(), original.as_str()));
        }

        self.entries.insert(alias, original.clone());
        self.terminus(&original)
    }

    /// Where `id` redirects to, or `None` if `id` is not an alias
    pub fn resolve(&self, id: &LocalPath) -> Result<Option<LocalPath>> {
        if !self.entries.contains_key(id) {
            return Ok(None);
        }
        self.terminus(id).map(Some)
    }

    /// All aliases, in path order
    pub fn aliases(&self) -> Vec<LocalPath> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every alias and return how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    fn leads_to(&self, start: &LocalPath, target: &LocalPath) -> bool {
        let mut visited = HashSet::new();
        let mut current = start;
        loop {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                return false;
            }
            match self.entries.get(current) {
                Some(next) => current = next,
                None => return false,
            }
        }
    }

    fn terminus(&self, start: &LocalPath) -> Result<LocalPath> {
        let mut visited = HashSet::new();
        let mut current = start;
        while let Some(next) = self.entries.get(current) {
            if !visited.insert(current) {
                return Err(FragmentError::alias_cycle(start.as_str(), current.as_str()));
            }
            current = next;
        }
        Ok(current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> LocalPath {
        LocalPath::from(p)
    }

    #[test]
    fn test_unknown_id_is_not_an_alias() {
        let table = AliasTable::new();
        assert_eq!(table.resolve(&path("/id/fragment/1")).unwrap(), None);
    }

    #[test]
    fn test_single_hop() {
        let mut table = AliasTable::new();
        let to = table.insert(path("/fragment?id=1"), path("/id/fragment/1")).unwrap();

        assert_eq!(to, path("/id/fragment/1"));
        assert_eq!(
            table.resolve(&path("/fragment?id=1")).unwrap(),
            Some(path("/id/fragment/1"))
        );
    }

    #[test]
    fn test_multi_hop_resolves_to_terminus() {
        let mut table = AliasTable::new();
        table.insert(path("/b"), path("/c")).unwrap();
        let to = table.insert(path("/a"), path("/b")).unwrap();

        assert_eq!(to, path("/c"));
        assert_eq!(table.resolve(&path("/a")).unwrap(), Some(path("/c")));
    }

    #[test]
    fn test_insert_reports_chain_as_it_stands() {
        let mut table = AliasTable::new();
        let to = table.insert(path("/a"), path("/b")).unwrap();
        assert_eq!(to, path("/b"));

        table.insert(path("/b"), path("/c")).unwrap();
        assert_eq!(table.resolve(&path("/a")).unwrap(), Some(path("/c")));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut table = AliasTable::new();
        table.insert(path("/a"), path("/b")).unwrap();
        table.insert(path("/b"), path("/c")).unwrap();

        let result = table.insert(path("/c"), path("/a"));

        assert!(matches!(result, Err(FragmentError::AliasCycle { .. })));
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(&path("/a")).unwrap(), Some(path("/c")));
    }

    #[test]
    fn test_self_alias_is_rejected() {
        let mut table = AliasTable::new();
        assert!(table.insert(path("/a"), path("/a")).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_clear_returns_count() {
        let mut table = AliasTable::new();
        table.insert(path("/a"), path("/b")).unwrap();
        table.insert(path("/x"), path("/y")).unwrap();

        assert_eq!(table.aliases(), vec![path("/a"), path("/x")]);
        assert_eq!(table.clear(), 2);
        assert!(table.aliases().is_empty());
    }
}
