//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values are stored and serialized as `f64`; every calculation
//! runs through `Decimal` and is rounded to 2 decimal places half-up before
//! going back to storage. Repeated increments therefore never accumulate
//! binary-float drift.

use rust_decimal::prelude::*;
use thiserror::Error;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per unit
const MAX_PRICE: f64 = 1_000_000.0;

/// Monetary input validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be non-negative")]
    Negative { field: &'static str },

    #[error("{field} exceeds the maximum allowed value")]
    TooLarge { field: &'static str },

    #[error("quantity must be positive")]
    NonPositiveQuantity,
}

#[inline]
fn require_finite(value: f64, field: &'static str) -> Result<(), MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NotFinite { field });
    }
    Ok(())
}

/// Validate a unit price before it enters a cart line or catalog record
pub fn validate_price(price: f64, field: &'static str) -> Result<(), MoneyError> {
    require_finite(price, field)?;
    if price < 0.0 {
        return Err(MoneyError::Negative { field });
    }
    if price > MAX_PRICE {
        return Err(MoneyError::TooLarge { field });
    }
    Ok(())
}

/// Validate a line quantity. No upper bound is enforced.
pub fn validate_quantity(quantity: i32) -> Result<(), MoneyError> {
    if quantity <= 0 {
        return Err(MoneyError::NonPositiveQuantity);
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Line total: unit_price * quantity, in Decimal
pub fn line_total(unit_price: f64, quantity: i32) -> Decimal {
    (to_decimal(unit_price) * Decimal::from(quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Cart total over (unit_price, quantity) pairs, in Decimal
pub fn cart_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (f64, i32)>,
{
    lines
        .into_iter()
        .map(|(price, qty)| line_total(price, qty))
        .sum()
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(to_f64(line_total(10.99, 3)), 32.97);
        assert_eq!(to_f64(line_total(50.0, 2)), 100.0);
        assert_eq!(to_f64(line_total(0.0, 7)), 0.0);
    }

    #[test]
    fn test_cart_total_many_small_lines() {
        // 100 lines at 0.01 each
        let lines = (0..100).map(|_| (0.01, 1));
        assert_eq!(to_f64(cart_total(lines)), 1.0);
    }

    #[test]
    fn test_cart_total_mixed() {
        let total = cart_total(vec![(50.0, 2), (19.99, 3), (0.5, 1)]);
        assert_eq!(to_f64(total), 160.47);
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(100.0, 100.0));
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }

    #[test]
    fn test_rounding_half_up() {
        let rounded = Decimal::new(5, 3) // 0.005
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(rounded.to_f64().unwrap(), 0.01);

        let rounded2 = Decimal::new(4, 3) // 0.004
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(rounded2.to_f64().unwrap(), 0.0);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(49.99, "price").is_ok());
        assert!(validate_price(0.0, "price").is_ok());
        assert_eq!(
            validate_price(f64::NAN, "price"),
            Err(MoneyError::NotFinite { field: "price" })
        );
        assert_eq!(
            validate_price(f64::INFINITY, "price"),
            Err(MoneyError::NotFinite { field: "price" })
        );
        assert_eq!(
            validate_price(-1.0, "price"),
            Err(MoneyError::Negative { field: "price" })
        );
        assert_eq!(
            validate_price(MAX_PRICE + 1.0, "price"),
            Err(MoneyError::TooLarge { field: "price" })
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9999).is_ok());
        // Deliberately unbounded above
        assert!(validate_quantity(i32::MAX).is_ok());
        assert_eq!(validate_quantity(0), Err(MoneyError::NonPositiveQuantity));
        assert_eq!(validate_quantity(-3), Err(MoneyError::NonPositiveQuantity));
    }

    #[test]
    fn test_to_decimal_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }
}
