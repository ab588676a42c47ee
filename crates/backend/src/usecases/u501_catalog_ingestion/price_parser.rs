/// Extracts a price from a free-form cell such as `"₹1,200.00"` or `" 45 "`.
///
/// Everything except ASCII digits, `.` and `-` is removed before parsing.
/// Returns `None` for empty, malformed or non-finite values.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}
