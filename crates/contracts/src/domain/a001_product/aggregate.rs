use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================

/// Product row from the catalog spreadsheet
///
/// Built only from rows with a non-empty name and a parsable, finite price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: f64,
}

impl ProductRecord {
    /// Returns `None` when the trimmed name is empty or the price is not finite.
    pub fn new(name: &str, price: f64) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || !price.is_finite() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            price,
        })
    }
}
