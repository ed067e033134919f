//! Text-coded enumerations shared by budget records
//!
//! Every variant is stored and transmitted as its upper-case name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = BudgetError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(BudgetError::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

text_enum!(
    /// Whether a category groups expenses or incomes
    CategoryType, "category type" {
        Expense => "EXPENSE",
        Income => "INCOME",
    }
);

text_enum!(
    /// Expense nature
    ExpenseType, "expense type" {
        Fixed => "FIXED",
        Variable => "VARIABLE",
    }
);

text_enum!(
    /// Source of an income
    IncomeType, "income type" {
        Salary => "SALARY",
        Freelance => "FREELANCE",
        Investment => "INVESTMENT",
        Bonus => "BONUS",
        Gift => "GIFT",
        Extra => "EXTRA",
        Other => "OTHER",
    }
);

text_enum!(
    /// How often a fixed expense recurs
    Frequency, "frequency" {
        Weekly => "WEEKLY",
        Monthly => "MONTHLY",
        Yearly => "YEARLY",
    }
);

impl Default for CategoryType {
    fn default() -> Self {
        CategoryType::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        for kind in IncomeType::ALL {
            assert_eq!(kind.as_str().parse::<IncomeType>().unwrap(), *kind);
        }
        assert_eq!(IncomeType::ALL.len(), 7);
    }

    #[test]
    fn test_unknown_variant() {
        let err = "DAILY".parse::<Frequency>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown frequency: DAILY");
    }

    #[test]
    fn test_serde_uses_upper_case() {
        assert_eq!(serde_json::to_string(&ExpenseType::Variable).unwrap(), "\"VARIABLE\"");
        let parsed: CategoryType = serde_json::from_str("\"INCOME\"").unwrap();
        assert_eq!(parsed, CategoryType::Income);
    }
}
