//! Quote command handlers.
//!
//! `quote` prices an order against the live venue API; `quote-file` and
//! `check-specs` work offline from a YAML specs file. Quotes are printed to
//! stdout as the same JSON document the HTTP service returns.

use std::path::Path;

use anyhow::Context;
use dopc_core::{AppConfig, DeliverySpecs, GpsCoordinate, PriceQuote};
use dopc_venue::VenueClient;

pub(crate) async fn run_quote(
    config: &AppConfig,
    venue_slug: &str,
    cart_value: i64,
    user_lat: f64,
    user_lon: f64,
) -> anyhow::Result<()> {
    check_cart_value(cart_value, config.max_cart_value)?;
    let user = GpsCoordinate::new(user_lat, user_lon).context("invalid user location")?;

    tracing::debug!(venue_slug, base_url = %config.venue_api_base_url, "fetching venue");
    let client = VenueClient::from_config(config)?;
    let venue = client
        .fetch_venue(venue_slug)
        .await
        .with_context(|| format!("failed to fetch venue {venue_slug}"))?;
    let specs = venue
        .delivery_specs
        .into_delivery_specs()
        .with_context(|| format!("venue {venue_slug} publishes invalid delivery specs"))?;

    let quote = dopc_core::quote_for_locations(cart_value, user, venue.location, &specs)?;
    println!("{}", serde_json::to_string_pretty(&quote_json(&quote))?);
    Ok(())
}

pub(crate) fn run_quote_file(
    specs_path: &Path,
    cart_value: i64,
    user_lat: f64,
    user_lon: f64,
    venue_override: Option<(f64, f64)>,
    max_cart_value: i64,
) -> anyhow::Result<()> {
    check_cart_value(cart_value, max_cart_value)?;
    let user = GpsCoordinate::new(user_lat, user_lon).context("invalid user location")?;
    let file = dopc_core::load_specs_file(specs_path)?;
    tracing::debug!(path = %specs_path.display(), "loaded specs file");

    let venue = match venue_override {
        Some((lat, lon)) => GpsCoordinate::new(lat, lon).context("invalid venue location")?,
        None => file.venue.with_context(|| {
            format!(
                "{} has no venue location; pass --venue-lat and --venue-lon",
                specs_path.display()
            )
        })?,
    };

    let quote = dopc_core::quote_for_locations(cart_value, user, venue, &file.delivery_specs)?;
    println!("{}", serde_json::to_string_pretty(&quote_json(&quote))?);
    Ok(())
}

pub(crate) fn run_check_specs(path: &Path) -> anyhow::Result<()> {
    let file = dopc_core::load_specs_file(path)?;
    print!("{}", describe_specs(&file.delivery_specs, file.venue));
    Ok(())
}

fn check_cart_value(cart_value: i64, max_cart_value: i64) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0..=max_cart_value).contains(&cart_value),
        "cart_value must be between 0 and {max_cart_value}, got {cart_value}"
    );
    Ok(())
}

fn quote_json(quote: &PriceQuote) -> serde_json::Value {
    serde_json::json!({
        "total_price": quote.total_price,
        "small_order_surcharge": quote.small_order_surcharge,
        "cart_value": quote.cart_value,
        "delivery": {
            "fee": quote.delivery_fee,
            "distance": quote.distance,
        },
    })
}

fn describe_specs(specs: &DeliverySpecs, venue: Option<GpsCoordinate>) -> String {
    let mut lines = Vec::new();
    if let Some(venue) = venue {
        lines.push(format!("venue: {}, {}", venue.latitude(), venue.longitude()));
    }
    lines.push(format!("base price: {}", specs.base_price));
    lines.push(format!(
        "order minimum (no surcharge): {}",
        specs.order_minimum_no_surcharge
    ));
    lines.push(format!("delivers below: {}m", specs.max_allowed_distance()));
    lines.push(format!("{:>8}  {:>8}  {:>6}  {:>6}", "min", "max", "a", "b"));
    for range in specs.distance_ranges.ranges() {
        let max = range
            .max
            .map_or_else(|| "open".to_owned(), |max| max.to_string());
        lines.push(format!(
            "{:>8}  {:>8}  {:>6}  {:>6}",
            range.min, max, range.a, range.b
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
