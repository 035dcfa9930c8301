//! Category tree caching using Moka.
//!
//! The tree is loaded once and shared by every request until the entry
//! expires or a category write invalidates it.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::tree::CategoryTree;
use crate::store::{BudgetStore, StoreError};

/// Default time-to-live for the cached tree (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Cache holding the single loaded category tree.
#[derive(Clone)]
pub struct CategoryTreeCache {
    cache: Cache<(), Arc<CategoryTree>>,
}

impl CategoryTreeCache {
    /// Creates a cache with the default 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL_SECS)
    }

    /// Creates a cache whose entry lives for `ttl_secs` seconds.
    #[must_use]
    pub fn with_ttl(ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Returns the cached tree, loading it from `store` on a miss.
    ///
    /// A failed load is not cached.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the category table cannot be read.
    pub async fn get_or_load(&self, store: &dyn BudgetStore) -> Result<Arc<CategoryTree>, StoreError> {
        if let Some(tree) = self.cache.get(&()) {
            return Ok(tree);
        }

        let categories = store.all_categories().await?;
        let tree = Arc::new(CategoryTree::new(categories));
        debug!(categories = tree.len(), "Loaded category tree");

        self.cache.insert((), Arc::clone(&tree));
        Ok(tree)
    }

    /// Drops the cached tree; the next request reloads it.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for CategoryTreeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CategoryTreeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryTreeCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_tree_is_loaded_once() {
        let fx = Fixture::new();
        fx.expense(1, "EXP", 1, None);
        let cache = CategoryTreeCache::new();

        let first = cache.get_or_load(fx.store.as_ref()).await.unwrap();
        let second = cache.get_or_load(fx.store.as_ref()).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fx.store.category_loads(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let fx = Fixture::new();
        fx.expense(1, "EXP", 1, None);
        let cache = CategoryTreeCache::new();

        let before = cache.get_or_load(fx.store.as_ref()).await.unwrap();
        fx.expense(2, "EXP.01", 2, Some(1));
        cache.invalidate();
        let after = cache.get_or_load(fx.store.as_ref()).await.unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(fx.store.category_loads(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let store = MemoryStore::new();
        let cache = CategoryTreeCache::new();

        store.set_unavailable(true);
        assert!(cache.get_or_load(&store).await.is_err());

        store.set_unavailable(false);
        let tree = cache.get_or_load(&store).await.unwrap();
        assert_eq!(tree.len(), 0);
    }
}
