use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use dopc_core::{GpsCoordinate, PriceQuote, QuoteError};
use dopc_venue::VenueError;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct DeliveryOrderPriceQuery {
    pub venue_slug: String,
    /// Cents.
    pub cart_value: i64,
    pub user_lat: f64,
    pub user_lon: f64,
}

/// A query that passed field validation.
#[derive(Debug, PartialEq)]
struct QuoteRequest {
    venue_slug: String,
    cart_value: i64,
    user: GpsCoordinate,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(super) struct DeliveryOrderPriceResponse {
    total_price: i64,
    small_order_surcharge: i64,
    cart_value: i64,
    delivery: DeliveryBreakdown,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(super) struct DeliveryBreakdown {
    fee: i64,
    distance: u64,
}

impl From<PriceQuote> for DeliveryOrderPriceResponse {
    fn from(quote: PriceQuote) -> Self {
        Self {
            total_price: quote.total_price,
            small_order_surcharge: quote.small_order_surcharge,
            cart_value: quote.cart_value,
            delivery: DeliveryBreakdown {
                fee: quote.delivery_fee,
                distance: quote.distance,
            },
        }
    }
}

pub(super) async fn delivery_order_price(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<DeliveryOrderPriceQuery>, QueryRejection>,
) -> Result<Json<DeliveryOrderPriceResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "validation_error", rejection.body_text())
    })?;
    let request = validate_query(query, state.max_cart_value)
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let venue = state
        .venues
        .fetch_venue(&request.venue_slug)
        .await
        .map_err(|e| map_venue_error(req_id.0.clone(), &e))?;

    let specs = venue.delivery_specs.into_delivery_specs().map_err(|e| {
        tracing::warn!(venue_slug = %request.venue_slug, error = %e, "venue published invalid delivery specs");
        ApiError::new(req_id.0.clone(), "invalid_venue_config", e.to_string())
    })?;

    let quote =
        dopc_core::quote_for_locations(request.cart_value, request.user, venue.location, &specs)
            .map_err(|e| map_quote_error(req_id.0.clone(), &request.venue_slug, &e))?;

    Ok(Json(quote.into()))
}

fn validate_query(
    query: DeliveryOrderPriceQuery,
    max_cart_value: i64,
) -> Result<QuoteRequest, String> {
    let venue_slug = query.venue_slug.trim();
    if venue_slug.is_empty() {
        return Err("venue_slug must not be empty".to_owned());
    }
    if !(0..=max_cart_value).contains(&query.cart_value) {
        return Err(format!(
            "cart_value must be between 0 and {max_cart_value}, got {}",
            query.cart_value
        ));
    }
    let user =
        GpsCoordinate::new(query.user_lat, query.user_lon).map_err(|e| format!("user {e}"))?;

    Ok(QuoteRequest {
        venue_slug: venue_slug.to_owned(),
        cart_value: query.cart_value,
        user,
    })
}

fn map_venue_error(request_id: String, error: &VenueError) -> ApiError {
    match error {
        VenueError::NotFound { slug } => {
            ApiError::new(request_id, "venue_not_found", format!("venue not found: {slug}"))
        }
        VenueError::InvalidCoordinates { .. } => {
            tracing::warn!(error = %error, "venue published invalid location");
            ApiError::new(request_id, "invalid_venue_config", error.to_string())
        }
        _ if error.is_timeout() => {
            tracing::error!(error = %error, "venue API timed out");
            ApiError::new(request_id, "upstream_timeout", "venue API timed out")
        }
        _ => {
            tracing::error!(error = %error, "venue API request failed");
            ApiError::new(request_id, "upstream_error", "venue API request failed")
        }
    }
}

fn map_quote_error(request_id: String, venue_slug: &str, error: &QuoteError) -> ApiError {
    match error {
        QuoteError::OutOfServiceArea { .. } => {
            tracing::info!(venue_slug, error = %error, "order outside delivery area");
            ApiError::new(request_id, "out_of_service_area", error.to_string())
        }
        QuoteError::Configuration(inner) => {
            ApiError::new(request_id, "invalid_venue_config", inner.to_string())
        }
        // The cart value is capped, so only venue prices can get this large.
        QuoteError::PriceOverflow { .. } => {
            tracing::warn!(venue_slug, error = %error, "venue prices overflow");
            ApiError::new(request_id, "invalid_venue_config", error.to_string())
        }
        QuoteError::NoApplicableRange { .. } => {
            tracing::error!(venue_slug, error = %error, "distance tiers violated their own invariants");
            ApiError::new(request_id, "internal_error", "could not price delivery")
        }
    }
}

#[cfg(test)]
#[path = "delivery_test.rs"]
mod tests;
