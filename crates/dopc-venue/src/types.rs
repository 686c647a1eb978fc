//! Wire types for the venue API.
//!
//! Only the fields pricing needs are typed. Everything else the API sends is
//! kept in `extra` so new upstream attributes never break deserialization.

use dopc_core::RawDistanceRange;
use serde::Deserialize;
use serde_json::{Map, Value};

/// `GET {base}/{slug}/static`
#[derive(Debug, Clone, Deserialize)]
pub struct StaticVenueResponse {
    pub venue_raw: StaticVenueRaw,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticVenueRaw {
    pub location: VenueLocation,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueLocation {
    /// `[longitude, latitude]`, GeoJSON order.
    pub coordinates: [f64; 2],
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET {base}/{slug}/dynamic`
#[derive(Debug, Clone, Deserialize)]
pub struct DynamicVenueResponse {
    pub venue_raw: DynamicVenueRaw,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DynamicVenueRaw {
    pub delivery_specs: RawDeliverySpecs,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Delivery pricing as published, before tier validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDeliverySpecs {
    pub order_minimum_no_surcharge: i64,
    pub delivery_pricing: DeliveryPricing,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeliveryPricing {
    pub base_price: i64,
    pub distance_ranges: Vec<RawDistanceRange>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawDeliverySpecs {
    /// Validates the tiers and flattens the pricing block.
    ///
    /// Unknown attributes from both the specs object and its
    /// `delivery_pricing` block are carried over.
    ///
    /// # Errors
    ///
    /// Returns the [`dopc_core::ConfigurationError`] for the first violated
    /// tier rule.
    pub fn into_delivery_specs(
        self,
    ) -> Result<dopc_core::DeliverySpecs, dopc_core::ConfigurationError> {
        let mut specs = dopc_core::DeliverySpecs::new(
            self.order_minimum_no_surcharge,
            self.delivery_pricing.base_price,
            self.delivery_pricing.distance_ranges,
        )?;
        specs.extra = self.extra;
        specs.extra.extend(self.delivery_pricing.extra);
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic_fixture() -> Value {
        serde_json::json!({
            "venue_raw": {
                "delivery_specs": {
                    "order_minimum_no_surcharge": 1000,
                    "delivery_enabled": true,
                    "delivery_pricing": {
                        "base_price": 190,
                        "max_distance_meters": 1000,
                        "distance_ranges": [
                            {"min": 0, "max": 500, "a": 0, "b": 0, "flag": null},
                            {"min": 500, "max": 1000, "a": 100, "b": 0, "flag": null},
                            {"min": 1000, "max": 0, "a": 0, "b": 0, "flag": null}
                        ]
                    }
                },
                "venue_id": "abc123"
            }
        })
    }

    #[test]
    fn dynamic_response_keeps_unknown_fields() {
        let parsed: DynamicVenueResponse =
            serde_json::from_value(dynamic_fixture()).expect("parse dynamic");
        assert_eq!(parsed.venue_raw.extra["venue_id"], "abc123");
        let specs = parsed.venue_raw.delivery_specs;
        assert_eq!(specs.extra["delivery_enabled"], true);
        assert_eq!(specs.delivery_pricing.extra["max_distance_meters"], 1000);
        assert_eq!(specs.delivery_pricing.distance_ranges.len(), 3);
    }

    #[test]
    fn into_delivery_specs_validates_and_merges_extras() {
        let parsed: DynamicVenueResponse =
            serde_json::from_value(dynamic_fixture()).expect("parse dynamic");
        let specs = parsed
            .venue_raw
            .delivery_specs
            .into_delivery_specs()
            .expect("valid specs");
        assert_eq!(specs.base_price, 190);
        assert_eq!(specs.max_allowed_distance(), 1000);
        assert!(specs.extra.contains_key("delivery_enabled"));
        assert!(specs.extra.contains_key("max_distance_meters"));
    }

    #[test]
    fn into_delivery_specs_reports_configuration_error() {
        let mut fixture = dynamic_fixture();
        fixture["venue_raw"]["delivery_specs"]["delivery_pricing"]["distance_ranges"] =
            serde_json::json!([{"min": 0, "max": 500, "a": 0, "b": 0}]);
        let parsed: DynamicVenueResponse = serde_json::from_value(fixture).expect("parse");
        let err = parsed
            .venue_raw
            .delivery_specs
            .into_delivery_specs()
            .unwrap_err();
        assert_eq!(
            err,
            dopc_core::ConfigurationError::LastRangeNotOpenEnded { max: 500 }
        );
    }

    #[test]
    fn static_response_reads_lon_lat_pair() {
        let json = serde_json::json!({
            "venue_raw": {
                "location": {
                    "coordinates": [24.92813512, 60.17012143],
                    "type": "Point"
                },
                "name": "Helsinki venue"
            }
        });
        let parsed: StaticVenueResponse = serde_json::from_value(json).expect("parse static");
        assert_eq!(parsed.venue_raw.location.coordinates, [24.928_135_12, 60.170_121_43]);
        assert_eq!(parsed.venue_raw.location.extra["type"], "Point");
        assert_eq!(parsed.venue_raw.extra["name"], "Helsinki venue");
    }
}
