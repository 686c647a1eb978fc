//! Delivery fee and small-order surcharge arithmetic.
//!
//! All amounts are integer cents. Nothing here allocates or fails except
//! a tier lookup that the admission check should have made impossible.

use crate::error::QuoteError;
use crate::ranges::DistanceRangeTable;

/// Scale applied to `b * distance` before rounding.
pub const DISTANCE_FEE_DIVISOR: i64 = 10;

/// Rounding rule for the distance component of the fee.
pub const DISTANCE_FEE_ROUNDING: Rounding = Rounding::HalfEven;

/// How a ratio that lands exactly on `.5` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Ties go to the even neighbour (`25 / 10 -> 2`, `35 / 10 -> 4`).
    HalfEven,
    /// Ties go away from zero (`25 / 10 -> 3`, `-25 / 10 -> -3`).
    HalfUp,
}

/// Divides `numerator` by a positive `divisor`, rounding to the nearest integer.
#[must_use]
pub fn round_div(numerator: i128, divisor: i128, rounding: Rounding) -> i128 {
    debug_assert!(divisor > 0, "divisor must be positive");
    let quotient = numerator.div_euclid(divisor);
    let twice_remainder = numerator.rem_euclid(divisor) * 2;

    match twice_remainder.cmp(&divisor) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => match rounding {
            Rounding::HalfEven if quotient % 2 == 0 => quotient,
            Rounding::HalfEven => quotient + 1,
            // Euclidean quotient already floors, so a negative tie sits one
            // below the value we want to move away from zero.
            Rounding::HalfUp if numerator < 0 => quotient,
            Rounding::HalfUp => quotient + 1,
        },
    }
}

/// Rejects distances outside the service area.
///
/// # Errors
///
/// Returns [`QuoteError::OutOfServiceArea`] when `distance` is at or beyond
/// the table's [`max_allowed_distance`](DistanceRangeTable::max_allowed_distance).
pub fn check_admissible(distance: u64, table: &DistanceRangeTable) -> Result<(), QuoteError> {
    let max_allowed = table.max_allowed_distance();
    if distance >= max_allowed {
        return Err(QuoteError::OutOfServiceArea {
            distance,
            max_allowed,
        });
    }
    Ok(())
}

/// Delivery fee for `distance` meters: `base_price + a + round(b * distance / 10)`.
///
/// # Errors
///
/// - [`QuoteError::NoApplicableRange`] if the table has no tier for
///   `distance`, including every distance outside the service area.
/// - [`QuoteError::PriceOverflow`] if the fee does not fit in `i64` cents.
pub fn delivery_fee(
    distance: u64,
    base_price: i64,
    table: &DistanceRangeTable,
) -> Result<i64, QuoteError> {
    let range = table.lookup(distance)?;

    let distance_component = round_div(
        i128::from(range.b) * i128::from(distance),
        i128::from(DISTANCE_FEE_DIVISOR),
        DISTANCE_FEE_ROUNDING,
    );
    let fee = i128::from(base_price) + i128::from(range.a) + distance_component;
    let fee = i64::try_from(fee).map_err(|_| QuoteError::PriceOverflow {
        component: "delivery fee",
        distance,
    })?;

    tracing::debug!(
        distance,
        base_price,
        range_min = range.min,
        range_max = ?range.max,
        constant_fee = range.a,
        %distance_component,
        fee,
        "computed delivery fee"
    );
    Ok(fee)
}

/// Extra charge bringing `cart_value` up to `minimum_no_surcharge`, or zero.
#[must_use]
pub fn small_order_surcharge(cart_value: i64, minimum_no_surcharge: i64) -> i64 {
    let surcharge = minimum_no_surcharge.saturating_sub(cart_value).max(0);
    tracing::debug!(
        cart_value,
        minimum_no_surcharge,
        surcharge,
        "computed small order surcharge"
    );
    surcharge
}
