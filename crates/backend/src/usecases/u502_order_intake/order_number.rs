use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Order number in the form `PREFIX-YYYYMMDD-NNNNN`.
///
/// `NNNNN` is the Unix time in seconds modulo 100000, so two orders placed
/// in the same second get the same number.
pub fn generate_order_number<Tz>(prefix: &str, placed_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}-{}-{:05}",
        prefix,
        placed_at.format("%Y%m%d"),
        placed_at.timestamp().rem_euclid(100_000)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_order_number_format() {
        let placed_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            generate_order_number("THO", &placed_at),
            "THO-20240101-67200"
        );
    }

    #[test]
    fn test_order_number_is_zero_padded() {
        let placed_at = Utc.timestamp_opt(42, 0).unwrap();
        assert_eq!(generate_order_number("THO", &placed_at), "THO-19700101-00042");
    }

    #[test]
    fn test_date_part_uses_local_offset() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let placed_at = ist.with_ymd_and_hms(2024, 3, 15, 1, 0, 0).unwrap();
        assert!(generate_order_number("SHOP", &placed_at).starts_with("SHOP-20240315-"));
    }
}
