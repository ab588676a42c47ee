use chrono::{DateTime, TimeZone};
use contracts::domain::a002_order::OrderRequest;
use serde_json::Value;
use std::fmt::Display;

/// Plain-text notification for the shop owner
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEmail {
    pub subject: String,
    pub body: String,
}

pub fn compose<Tz>(
    order_number: &str,
    shop_name: &str,
    placed_at: &DateTime<Tz>,
    order: &OrderRequest,
) -> OrderEmail
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let customer = &order.customer;
    let mut lines = vec![
        format!("Order No: {}", order_number),
        format!("Timestamp: {}", placed_at.format("%Y-%m-%dT%H:%M:%S")),
        String::new(),
        "Customer:".to_string(),
        format!("Name: {}", customer.name),
        format!("Phone: {}", customer.phone),
        "Address:".to_string(),
    ];
    lines.extend(customer.address.iter().map(|line| format!("  {}", line)));

    lines.push(String::new());
    lines.push("Items:".to_string());
    for item in &order.products {
        lines.push(format!(
            "- {} x {} @ {} = {}",
            display_value(item.quantity.as_ref()),
            item.name,
            display_value(item.unit_price.as_ref()),
            display_value(item.line_total.as_ref())
        ));
    }
    lines.push(String::new());
    lines.push(format!("Total: {}", display_value(Some(&order.total))));

    OrderEmail {
        subject: format!("New Order {} — {}", order_number, shop_name),
        body: lines.join("\n"),
    }
}

/// Strings are printed bare, missing values as `?`.
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "?".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
