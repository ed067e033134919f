//! Expense and income categories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, UserId};

use crate::kinds::CategoryType;

/// Colour used when a category is created without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#8b5cf6";

/// Name and colour reported for expenses whose category cannot be resolved
pub const UNCATEGORIZED_NAME: &str = "Sem categoria";
pub const UNCATEGORIZED_COLOR: &str = "#6b7280";

/// A user-defined category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub user_id: UserId,
    /// Unique per user
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
    pub icon: Option<String>,
    pub category_type: CategoryType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub category_type: CategoryType,
}

impl NewCategory {
    pub fn expense(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            icon: None,
            category_type: CategoryType::Expense,
        }
    }
}

/// Expense categories every new account starts with
pub fn default_expense_categories() -> Vec<NewCategory> {
    [
        ("Alimentação", "#ef4444"),
        ("Transporte", "#f59e0b"),
        ("Moradia", "#10b981"),
        ("Saúde", "#06b6d4"),
        ("Educação", "#8b5cf6"),
        ("Lazer", "#ec4899"),
        ("Compras", "#f97316"),
        ("Outros", "#6b7280"),
    ]
    .into_iter()
    .map(|(name, color)| NewCategory::expense(name, color))
    .collect()
}

/// Returns true for a `#RRGGBB` colour
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let defaults = default_expense_categories();
        assert_eq!(defaults.len(), 8);
        assert!(defaults.iter().all(|c| c.category_type == CategoryType::Expense));
        assert!(defaults.iter().all(|c| is_hex_color(&c.color)));
        assert_eq!(defaults[0].name, "Alimentação");
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#8B5cf6"));
        assert!(!is_hex_color("8b5cf6"));
        assert!(!is_hex_color("#8b5cf"));
        assert!(!is_hex_color("#8b5cfg"));
        assert!(!is_hex_color("#ééé"));
    }
}
