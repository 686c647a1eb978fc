use std::path::Path;

use serde::Deserialize;

use crate::geo::GpsCoordinate;
use crate::quote::DeliverySpecs;
use crate::ranges::RawDistanceRange;
use crate::AppConfigError;

/// A venue's location and pricing kept in a local YAML file.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecsFile {
    pub venue: Option<GpsCoordinate>,
    pub delivery_specs: DeliverySpecs,
}

#[derive(Debug, Deserialize)]
struct RawSpecsFile {
    venue: Option<RawLocation>,
    delivery_specs: RawDeliverySpecs,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawDeliverySpecs {
    order_minimum_no_surcharge: i64,
    base_price: i64,
    distance_ranges: Vec<RawDistanceRange>,
}

/// Load and validate a specs file.
///
/// # Errors
///
/// Returns `AppConfigError` if the file cannot be read or parsed, if the
/// venue location is out of range, or if the distance ranges are malformed.
pub fn load_specs_file(path: &Path) -> Result<SpecsFile, AppConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| AppConfigError::SpecsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_specs_file(&content)
}

/// Parse and validate specs file content.
///
/// # Errors
///
/// Same as [`load_specs_file`], minus I/O.
pub fn parse_specs_file(content: &str) -> Result<SpecsFile, AppConfigError> {
    let raw: RawSpecsFile = serde_yaml::from_str(content)?;

    let venue = raw
        .venue
        .map(|loc| GpsCoordinate::new(loc.latitude, loc.longitude))
        .transpose()?;

    let delivery_specs = DeliverySpecs::new(
        raw.delivery_specs.order_minimum_no_surcharge,
        raw.delivery_specs.base_price,
        raw.delivery_specs.distance_ranges,
    )?;

    Ok(SpecsFile {
        venue,
        delivery_specs,
    })
}
