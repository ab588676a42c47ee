use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Request
// ============================================================================

/// Order submitted by the storefront
///
/// Every field is optional on the wire; missing or mistyped values fall back
/// to defaults field by field so a partial order is still accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default, deserialize_with = "lenient_customer")]
    pub customer: Customer,
    #[serde(default, deserialize_with = "lenient_products")]
    pub products: Vec<OrderLine>,
    #[serde(default = "default_total")]
    pub total: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    /// Address split into display lines
    #[serde(default, deserialize_with = "lenient_lines")]
    pub address: Vec<String>,
}

/// Line of an order. Numbers are kept as raw JSON because the storefront
/// may send them either as numbers or as preformatted strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub unit_price: Option<Value>,
    #[serde(default)]
    pub line_total: Option<Value>,
}

impl Default for OrderRequest {
    fn default() -> Self {
        Self {
            customer: Customer::default(),
            products: Vec::new(),
            total: default_total(),
        }
    }
}

fn default_total() -> Value {
    Value::from(0)
}

// ----------------------------------------------------------------------------
// Lenient field readers
// ----------------------------------------------------------------------------

/// Scalars become their JSON text, `null` becomes an empty string.
fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

/// A single value is read as a one-line address.
fn lenient_lines<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(value_to_text).collect(),
        other => vec![value_to_text(other)],
    })
}

fn lenient_customer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Customer, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Customer::deserialize(value).unwrap_or_default())
}

/// Entries that are not objects are dropped.
fn lenient_products<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<OrderLine>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| OrderLine::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub ok: bool,
    pub order_number: String,
}

impl OrderResponse {
    pub fn accepted(order_number: String) -> Self {
        Self {
            ok: true,
            order_number,
        }
    }
}
