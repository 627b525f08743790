//! # Category Catalog
//!
//! The fixed set of product categories.
//!
//! ## Catalog
//! ```text
//! ┌────────────────────────────┬────────────────────────────┐
//! │  Tecnología                │  Juguetes y Juegos         │
//! │  Ropa y Moda               │  Automotriz                │
//! │  Hogar y Muebles           │  Libros                    │
//! │  Alimentos y Bebidas       │  Hobbies y Arte            │
//! │  Salud                     │  Ciencia                   │
//! │  Deportes                  │                            │
//! └────────────────────────────┴────────────────────────────┘
//! ```
//!
//! Stored documents carry the Spanish label verbatim; the enum variants are
//! English so the code reads naturally. Serde round-trips through the label.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Label shown for products whose stored category is missing or empty.
///
/// Older documents predate the category picker, so inventory counts fold
/// them into this bucket instead of dropping them.
pub const UNCATEGORIZED_LABEL: &str = "Sin categoría";

// =============================================================================
// Category Type
// =============================================================================

/// One of the fixed product categories.
///
/// The empty string is NOT a category; it is the picker's unselected state
/// and fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[serde(rename = "Tecnología")]
    Technology,
    #[serde(rename = "Ropa y Moda")]
    Fashion,
    #[serde(rename = "Hogar y Muebles")]
    HomeAndFurniture,
    #[serde(rename = "Alimentos y Bebidas")]
    FoodAndDrinks,
    #[serde(rename = "Salud")]
    Health,
    #[serde(rename = "Deportes")]
    Sports,
    #[serde(rename = "Juguetes y Juegos")]
    ToysAndGames,
    #[serde(rename = "Automotriz")]
    Automotive,
    #[serde(rename = "Libros")]
    Books,
    #[serde(rename = "Hobbies y Arte")]
    HobbiesAndArt,
    #[serde(rename = "Ciencia")]
    Science,
}

impl Category {
    /// Every category, in picker order.
    pub const ALL: [Category; 11] = [
        Category::Technology,
        Category::Fashion,
        Category::HomeAndFurniture,
        Category::FoodAndDrinks,
        Category::Health,
        Category::Sports,
        Category::ToysAndGames,
        Category::Automotive,
        Category::Books,
        Category::HobbiesAndArt,
        Category::Science,
    ];

    /// The stored label for this category.
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::category::Category;
    ///
    /// assert_eq!(Category::FoodAndDrinks.label(), "Alimentos y Bebidas");
    /// ```
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Technology => "Tecnología",
            Category::Fashion => "Ropa y Moda",
            Category::HomeAndFurniture => "Hogar y Muebles",
            Category::FoodAndDrinks => "Alimentos y Bebidas",
            Category::Health => "Salud",
            Category::Sports => "Deportes",
            Category::ToysAndGames => "Juguetes y Juegos",
            Category::Automotive => "Automotriz",
            Category::Books => "Libros",
            Category::HobbiesAndArt => "Hobbies y Arte",
            Category::Science => "Ciencia",
        }
    }

    /// Looks a category up by its stored label.
    ///
    /// Returns `None` for the empty string, unknown labels, and
    /// [`UNCATEGORIZED_LABEL`] (which is a display bucket, not a category).
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::category::Category;
    ///
    /// assert_eq!(Category::from_label("Salud"), Some(Category::Health));
    /// assert_eq!(Category::from_label(""), None);
    /// assert_eq!(Category::from_label("Sin categoría"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(Category::ALL.len(), 11);
    }

    #[test]
    fn test_serde_uses_stored_labels() {
        for category in Category::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, serde_json::json!(category.label()));

            let parsed: Category = serde_json::from_value(json).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_unknown_labels_rejected() {
        assert_eq!(Category::from_label("Electrónica"), None);
        assert_eq!(Category::from_label("tecnología"), None); // case sensitive
        assert!(serde_json::from_value::<Category>(serde_json::json!("")).is_err());
    }
}
