//! Subtree resolution.
//!
//! Plan and actual figures booked anywhere below a node roll up into the
//! node's totals, so every metric query is scoped by a [`Subtree`].

use std::collections::BTreeSet;

use budgetlens_shared::types::{CategoryId, ItemId};

use super::tree::CategoryTree;
use crate::store::{BudgetStore, StoreError};

/// Transitive closure of categories and procurement items below a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subtree {
    /// The root category and every descendant category.
    pub category_ids: BTreeSet<CategoryId>,
    /// Every procurement item owned by a category in `category_ids`.
    pub item_ids: BTreeSet<ItemId>,
    /// Items owned directly by the root category.
    pub direct_item_ids: BTreeSet<ItemId>,
}

impl Subtree {
    /// Scope containing a single procurement item and no categories.
    #[must_use]
    pub fn item(id: ItemId) -> Self {
        Self {
            category_ids: BTreeSet::new(),
            item_ids: BTreeSet::from([id]),
            direct_item_ids: BTreeSet::new(),
        }
    }

    /// Returns true if the scope matches no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category_ids.is_empty() && self.item_ids.is_empty()
    }
}

/// Resolves subtrees against a loaded tree, fetching items in one batch per walk.
pub struct TreeWalker<'a> {
    tree: &'a CategoryTree,
    store: &'a dyn BudgetStore,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker over `tree`.
    #[must_use]
    pub const fn new(tree: &'a CategoryTree, store: &'a dyn BudgetStore) -> Self {
        Self { tree, store }
    }

    /// Returns the subtree rooted at `id`.
    ///
    /// An id missing from the tree yields an empty subtree rather than an error:
    /// historical entries may still reference categories that were removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the item lookup fails.
    pub async fn walk(&self, id: CategoryId) -> Result<Subtree, StoreError> {
        let category_ids = self.tree.descendant_ids(id);
        if category_ids.is_empty() {
            return Ok(Subtree::default());
        }

        let items = self.store.items_for_categories(&category_ids).await?;
        let direct_item_ids = items
            .iter()
            .filter(|item| item.category_id == id)
            .map(|item| item.id)
            .collect();
        let item_ids = items.into_iter().map(|item| item.id).collect();

        Ok(Subtree {
            category_ids,
            item_ids,
            direct_item_ids,
        })
    }
}
