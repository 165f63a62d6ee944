//! Goal categories
//!
//! The fixed set of goal categories. Each category carries its own prompt
//! template and fallback itinerary in the generator.

use serde::{Deserialize, Serialize};

/// Category of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Travel to a destination
    Travel,
    /// Career advancement
    Career,
    /// Financial goals (saving, investing)
    Finance,
    /// Personal growth (skills, habits)
    Growth,
    /// Relationship goals
    Relationship,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 5] = [
        Category::Travel,
        Category::Career,
        Category::Finance,
        Category::Growth,
        Category::Relationship,
    ];

    /// Prompt template name for this category
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Travel => "itinerary-travel",
            Self::Career => "itinerary-career",
            Self::Finance => "itinerary-finance",
            Self::Growth => "itinerary-growth",
            Self::Relationship => "itinerary-relationship",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Travel => write!(f, "travel"),
            Self::Career => write!(f, "career"),
            Self::Finance => write!(f, "finance"),
            Self::Growth => write!(f, "growth"),
            Self::Relationship => write!(f, "relationship"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "travel" => Ok(Self::Travel),
            "career" => Ok(Self::Career),
            "finance" => Ok(Self::Finance),
            "growth" => Ok(Self::Growth),
            "relationship" => Ok(Self::Relationship),
            other => Err(format!(
                "Unknown category: '{}'. Expected one of: travel, career, finance, growth, relationship",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_round_trip() {
        for category in Category::ALL {
            let parsed = Category::from_str(&category.to_string()).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        assert!(Category::from_str("fitness").is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Category::Relationship).unwrap();
        assert_eq!(json, "\"relationship\"");

        let parsed: Category = serde_json::from_str("\"finance\"").unwrap();
        assert_eq!(parsed, Category::Finance);
    }

    #[test]
    fn test_template_names_distinct() {
        let names: std::collections::HashSet<_> = Category::ALL.iter().map(|c| c.template_name()).collect();
        assert_eq!(names.len(), Category::ALL.len());
    }
}
