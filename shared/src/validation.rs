//! Validation helpers shared by the backend services
//!
//! Small pure checks for cross-field rules the derive-based validation
//! cannot express.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Validate one evaluation axis (quality, punctuality, service, price).
pub fn validate_score_axis(value: i32) -> Result<(), &'static str> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err("Score must be between 1 and 5")
    }
}

/// Validate a percentage field such as projection confidence.
pub fn validate_percent(value: f64) -> Result<(), &'static str> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err("Percentage must be between 0 and 100")
    }
}

/// Validate a line-item discount percentage.
pub fn validate_discount_percent(value: Decimal) -> Result<(), &'static str> {
    if value >= Decimal::ZERO && value <= Decimal::from(100) {
        Ok(())
    } else {
        Err("Discount must be between 0 and 100")
    }
}

/// Validate that a date window is ordered (`end >= start`).
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if end >= start {
        Ok(())
    } else {
        Err("End date must not precede start date")
    }
}

/// Validate a quantity used in reserve/sell operations.
pub fn validate_positive_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity > 0 {
        Ok(())
    } else {
        Err("Quantity must be greater than zero")
    }
}

/// Validate a warehouse capacity or lot initial quantity at creation.
pub fn validate_capacity(capacity: i64) -> Result<(), &'static str> {
    if capacity >= 1 {
        Ok(())
    } else {
        Err("Capacity must be at least 1")
    }
}

/// Validate a monetary amount that must not be negative.
pub fn validate_non_negative_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount >= Decimal::ZERO {
        Ok(())
    } else {
        Err("Amount cannot be negative")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn score_axis_bounds() {
        assert!(validate_score_axis(1).is_ok());
        assert!(validate_score_axis(5).is_ok());
        assert!(validate_score_axis(0).is_err());
        assert!(validate_score_axis(6).is_err());
    }

    #[test]
    fn date_range_allows_single_day() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(validate_date_range(day, day).is_ok());
        assert!(validate_date_range(day, day.pred_opt().unwrap()).is_err());
    }

    #[test]
    fn discount_bounds() {
        assert!(validate_discount_percent(dec!(0)).is_ok());
        assert!(validate_discount_percent(dec!(100)).is_ok());
        assert!(validate_discount_percent(dec!(100.01)).is_err());
        assert!(validate_discount_percent(dec!(-1)).is_err());
    }

    #[test]
    fn quantities_must_be_positive() {
        assert!(validate_positive_quantity(1).is_ok());
        assert!(validate_positive_quantity(0).is_err());
        assert!(validate_capacity(0).is_err());
    }
}
