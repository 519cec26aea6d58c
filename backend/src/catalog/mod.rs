//! Market catalog
//!
//! Static enumeration of market categories and the countries each covers.
//! Loaded once at startup and immutable for the process lifetime; every
//! other component refers to markets by name.

use serde::{Deserialize, Serialize};

/// A market category: a name plus the ordered list of countries it covers.
///
/// Country lists are display data; they may repeat and carry no uniqueness
/// guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Market category name (e.g., "Category A")
    pub name: String,

    /// Countries covered by this category, in display order
    pub countries: Vec<String>,
}

impl Market {
    pub fn new(name: impl Into<String>, countries: &[&str]) -> Self {
        Self {
            name: name.into(),
            countries: countries.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Ordered, immutable set of market categories.
///
/// # Example
///
/// ```
/// use lead_allocator_core_rs::MarketCatalog;
///
/// let catalog = MarketCatalog::default_catalog();
/// assert_eq!(catalog.len(), 9);
/// assert!(catalog.contains("Category A"));
/// assert!(!catalog.contains("Category Z"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCatalog {
    markets: Vec<Market>,
}

impl MarketCatalog {
    /// Build a catalog from an explicit market list (test fixtures,
    /// alternate deployments).
    pub fn new(markets: Vec<Market>) -> Self {
        Self { markets }
    }

    /// The production catalog: nine categories covering the full country map.
    pub fn default_catalog() -> Self {
        Self::new(vec![
            Market::new(
                "Category A",
                &[
                    "Belgium",
                    "Brazil",
                    "Canada",
                    "Denmark",
                    "France",
                    "Georgia",
                    "Germany",
                    "Iceland",
                    "Ireland",
                    "Italy",
                    "Luxemburg",
                    "Mauritius",
                    "Mexico",
                    "Morocco",
                    "Netherland",
                    "New Zealand",
                    "Norway",
                    "Poland",
                    "Portugal",
                    "Romania",
                    "Seychelles",
                    "Slovenia",
                    "South Africa",
                    "Spain",
                    "Sweden",
                    "Switzerland",
                    "USA",
                ],
            ),
            Market::new(
                "Category B",
                &["Hongkong", "Lebanon", "Malaysia", "Oman", "Singapore"],
            ),
            Market::new(
                "Category C",
                &["Bahrain", "Cyprus", "Kuwait", "Qatar", "Saudi Arabia"],
            ),
            Market::new(
                "Category D",
                &[
                    "Bangladesh",
                    "Bhutan",
                    "Indonesia",
                    "Iran",
                    "Iraq",
                    "Kazakhstan",
                    "Nepal",
                    "Pakistan",
                    "Palestinian",
                    "Philippines",
                    "Thailand",
                ],
            ),
            Market::new("Category India", &["India"]),
            Market::new("Category Australia", &["Australia"]),
            Market::new("Category UAE", &["UAE"]),
            Market::new("Category UK", &["UK"]),
            Market::new("Category O", &["Other countries"]),
        ])
    }

    /// Look up a market by exact name.
    pub fn get(&self, name: &str) -> Option<&Market> {
        self.markets.iter().find(|m| m.name == name)
    }

    /// Whether a market with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Market names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.markets.iter().map(|m| m.name.as_str()).collect()
    }

    /// Iterate markets in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Market> {
        self.markets.iter()
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}
