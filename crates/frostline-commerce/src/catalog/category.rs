//! Category types for the two-level product taxonomy.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category. The hierarchy is exactly two levels deep:
/// roots (`parent_id` is `None`) and their direct children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Parent category ID (None for root categories).
    pub parent_id: Option<CategoryId>,
    /// Category image URL.
    pub image: Option<String>,
}

impl Category {
    /// Create a new root category.
    pub fn new_root(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            parent_id: None,
            image: None,
        }
    }

    /// Create a new sub-category under a root.
    pub fn new_child(parent_id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            parent_id: Some(parent_id),
            image: None,
        }
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_category() {
        let cat = Category::new_root("Compressors");
        assert!(cat.is_root());
        assert_eq!(cat.name, "Compressors");
    }

    #[test]
    fn test_child_category() {
        let parent = Category::new_root("Compressors");
        let child = Category::new_child(parent.id.clone(), "Scroll");

        assert!(!child.is_root());
        assert_eq!(child.parent_id.as_ref(), Some(&parent.id));
    }
}
