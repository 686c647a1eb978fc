//! Price quote assembly.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, QuoteError};
use crate::fees::{check_admissible, delivery_fee, small_order_surcharge};
use crate::geo::{distance_meters, GpsCoordinate};
use crate::ranges::{DistanceRangeTable, RawDistanceRange};

/// A venue's pricing schedule with its distance tiers already validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySpecs {
    pub order_minimum_no_surcharge: i64,
    pub base_price: i64,
    pub distance_ranges: DistanceRangeTable,
    /// Attributes the venue API sent that pricing does not use.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeliverySpecs {
    /// Builds specs from unvalidated tiers.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the tiers are malformed.
    pub fn new(
        order_minimum_no_surcharge: i64,
        base_price: i64,
        distance_ranges: Vec<RawDistanceRange>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            order_minimum_no_surcharge,
            base_price,
            distance_ranges: DistanceRangeTable::new(distance_ranges)?,
            extra: serde_json::Map::new(),
        })
    }

    #[must_use]
    pub fn max_allowed_distance(&self) -> u64 {
        self.distance_ranges.max_allowed_distance()
    }
}

/// Price breakdown for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub cart_value: i64,
    pub delivery_fee: i64,
    /// Meters between user and venue.
    pub distance: u64,
    pub small_order_surcharge: i64,
    pub total_price: i64,
}

/// Prices an order of `cart_value` cents delivered over `distance` meters.
///
/// # Errors
///
/// - [`QuoteError::OutOfServiceArea`] when `distance` is past the last tier.
/// - [`QuoteError::NoApplicableRange`] only if the tier table is inconsistent
///   with its own service area, which validation rules out.
/// - [`QuoteError::PriceOverflow`] if the fee or the total does not fit in
///   `i64` cents.
pub fn quote(cart_value: i64, distance: u64, specs: &DeliverySpecs) -> Result<PriceQuote, QuoteError> {
    check_admissible(distance, &specs.distance_ranges)?;

    let fee = delivery_fee(distance, specs.base_price, &specs.distance_ranges)?;
    let surcharge = small_order_surcharge(cart_value, specs.order_minimum_no_surcharge);
    let total_price = cart_value
        .checked_add(fee)
        .and_then(|sum| sum.checked_add(surcharge))
        .ok_or(QuoteError::PriceOverflow {
            component: "total price",
            distance,
        })?;

    tracing::info!(
        cart_value,
        distance,
        delivery_fee = fee,
        small_order_surcharge = surcharge,
        total_price,
        "priced delivery order"
    );

    Ok(PriceQuote {
        cart_value,
        delivery_fee: fee,
        distance,
        small_order_surcharge: surcharge,
        total_price,
    })
}

/// Measures the user-to-venue distance and prices the order.
///
/// # Errors
///
/// Same as [`quote`].
pub fn quote_for_locations(
    cart_value: i64,
    user: GpsCoordinate,
    venue: GpsCoordinate,
    specs: &DeliverySpecs,
) -> Result<PriceQuote, QuoteError> {
    let distance = distance_meters(venue, user);
    quote(cart_value, distance, specs)
}
