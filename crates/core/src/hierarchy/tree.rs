//! In-memory category tree.
//!
//! The category table is small and changes only through administrative
//! seeding, so it is loaded whole and every level/parent selection runs here
//! instead of as one store query per node.

use std::collections::{BTreeSet, HashMap};

use budgetlens_shared::types::CategoryId;

use super::types::{BudgetCategory, CategoryType};

/// Parent constraint of a category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentFilter {
    /// Any parent.
    Any,
    /// Only level-1 nodes (no parent).
    Root,
    /// Only direct children of this category.
    Id(CategoryId),
}

/// Category selection by level and/or parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Required level.
    pub level: Option<u8>,
    /// Required parent.
    pub parent: ParentFilter,
    /// Required category type.
    pub category_type: Option<CategoryType>,
}

impl CategoryFilter {
    /// Children of `parent` (root when `None`) at `level`.
    #[must_use]
    pub const fn children_of(parent: Option<CategoryId>, level: u8) -> Self {
        let parent = match parent {
            Some(id) => ParentFilter::Id(id),
            None => ParentFilter::Root,
        };
        Self {
            level: Some(level),
            parent,
            category_type: None,
        }
    }

    /// Every node at `level`.
    #[must_use]
    pub const fn at_level(level: u8) -> Self {
        Self {
            level: Some(level),
            parent: ParentFilter::Any,
            category_type: None,
        }
    }

    /// Restricts the selection to one category type.
    #[must_use]
    pub const fn of_type(mut self, category_type: Option<CategoryType>) -> Self {
        self.category_type = category_type;
        self
    }

    fn matches(&self, category: &BudgetCategory) -> bool {
        let parent_ok = match self.parent {
            ParentFilter::Any => true,
            ParentFilter::Root => category.parent_id.is_none(),
            ParentFilter::Id(id) => category.parent_id == Some(id),
        };
        parent_ok
            && self.level.is_none_or(|level| category.level == level)
            && self
                .category_type
                .is_none_or(|kind| category.category_type == kind)
    }
}

/// The whole category table indexed by id and by parent.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: HashMap<CategoryId, BudgetCategory>,
    children: HashMap<CategoryId, Vec<CategoryId>>,
    ordered: Vec<CategoryId>,
}

impl CategoryTree {
    /// Indexes a flat list of categories.
    #[must_use]
    pub fn new(mut categories: Vec<BudgetCategory>) -> Self {
        categories.sort_by(|a, b| a.code.cmp(&b.code).then(a.id.cmp(&b.id)));

        let ordered: Vec<CategoryId> = categories.iter().map(|c| c.id).collect();
        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
        for category in &categories {
            if let Some(parent) = category.parent_id {
                children.entry(parent).or_default().push(category.id);
            }
        }
        let nodes = categories.into_iter().map(|c| (c.id, c)).collect();

        Self {
            nodes,
            children,
            ordered,
        }
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a category.
    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<&BudgetCategory> {
        self.nodes.get(&id)
    }

    /// Returns true if `id` has child categories.
    #[must_use]
    pub fn has_child_categories(&self, id: CategoryId) -> bool {
        self.children.get(&id).is_some_and(|c| !c.is_empty())
    }

    /// Direct children of `id`, ordered by code.
    pub fn children(&self, id: CategoryId) -> impl Iterator<Item = &BudgetCategory> {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|child| self.nodes.get(child))
    }

    /// Categories matching `filter`, ordered by code.
    #[must_use]
    pub fn select(&self, filter: &CategoryFilter) -> Vec<&BudgetCategory> {
        self.ordered
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .filter(|c| filter.matches(c))
            .collect()
    }

    /// `id` and every category below it. Unknown ids yield an empty set.
    #[must_use]
    pub fn descendant_ids(&self, id: CategoryId) -> BTreeSet<CategoryId> {
        let mut out = BTreeSet::new();
        if self.nodes.contains_key(&id) {
            self.collect_descendants(id, &mut out);
        }
        out
    }

    fn collect_descendants(&self, id: CategoryId, out: &mut BTreeSet<CategoryId>) {
        // A repeated id means corrupt parent links; stop descending.
        if !out.insert(id) {
            return;
        }
        if let Some(children) = self.children.get(&id) {
            for child in children {
                self.collect_descendants(*child, out);
            }
        }
    }

    /// Categories in the subtree of `id` that have no child categories.
    #[must_use]
    pub fn leaf_ids(&self, id: CategoryId) -> Vec<CategoryId> {
        self.descendant_ids(id)
            .into_iter()
            .filter(|c| !self.has_child_categories(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn category(n: u128, code: &str, level: u8, parent: Option<u128>) -> BudgetCategory {
        BudgetCategory {
            id: CategoryId::from_uuid(Uuid::from_u128(n)),
            name: format!("Category {code}"),
            code: code.to_string(),
            level,
            category_type: CategoryType::Expense,
            parent_id: parent.map(|p| CategoryId::from_uuid(Uuid::from_u128(p))),
        }
    }

    fn id(n: u128) -> CategoryId {
        CategoryId::from_uuid(Uuid::from_u128(n))
    }

    fn sample_tree() -> CategoryTree {
        CategoryTree::new(vec![
            category(1, "E", 1, None),
            category(3, "E.2", 2, Some(1)),
            category(2, "E.1", 2, Some(1)),
            category(4, "E.1.1", 3, Some(2)),
            category(5, "R", 1, None),
        ])
    }

    #[test]
    fn test_descendants_include_root() {
        let tree = sample_tree();
        let ids = tree.descendant_ids(id(1));
        assert_eq!(ids, [id(1), id(2), id(3), id(4)].into_iter().collect());
        assert!(tree.descendant_ids(id(4)).contains(&id(4)));
    }

    #[test]
    fn test_unknown_id_yields_empty_set() {
        let tree = sample_tree();
        assert!(tree.descendant_ids(id(99)).is_empty());
        assert!(tree.leaf_ids(id(99)).is_empty());
    }

    #[test]
    fn test_children_are_ordered_by_code() {
        let tree = sample_tree();
        let codes: Vec<&str> = tree.children(id(1)).map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["E.1", "E.2"]);
    }

    #[test]
    fn test_select_root_and_level() {
        let tree = sample_tree();
        let roots: Vec<&str> = tree
            .select(&CategoryFilter::children_of(None, 1))
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(roots, vec!["E", "R"]);

        let level_two = tree.select(&CategoryFilter::at_level(2));
        assert_eq!(level_two.len(), 2);

        let wrong_level = tree.select(&CategoryFilter::children_of(Some(id(1)), 3));
        assert!(wrong_level.is_empty());
    }

    #[test]
    fn test_select_by_type() {
        let tree = sample_tree();
        let revenue = tree.select(&CategoryFilter::at_level(1).of_type(Some(CategoryType::Revenue)));
        assert!(revenue.is_empty());
    }

    #[test]
    fn test_leaf_ids() {
        let tree = sample_tree();
        let mut leaves = tree.leaf_ids(id(1));
        leaves.sort();
        assert_eq!(leaves, vec![id(3), id(4)]);
        assert!(tree.has_child_categories(id(2)));
        assert!(!tree.has_child_categories(id(3)));
    }

    #[test]
    fn test_cycle_does_not_recurse_forever() {
        let tree = CategoryTree::new(vec![category(1, "A", 1, Some(2)), category(2, "B", 2, Some(1))]);
        assert_eq!(tree.descendant_ids(id(1)).len(), 2);
    }
}
