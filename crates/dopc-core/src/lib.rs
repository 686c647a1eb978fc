//! Delivery order price calculation.
//!
//! Pure pricing engine shared by the HTTP service and the CLI: haversine
//! distance, validated distance tiers, fee and surcharge arithmetic, and
//! quote assembly. Also owns process configuration loading.

pub mod app_config;
pub mod config;
pub mod error;
pub mod fees;
pub mod geo;
pub mod quote;
pub mod ranges;
pub mod specs_file;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{AppConfigError, ConfigurationError, CoordinateError, QuoteError};
pub use geo::{distance_meters, GpsCoordinate};
pub use quote::{quote, quote_for_locations, DeliverySpecs, PriceQuote};
pub use ranges::{DistanceRange, DistanceRangeTable, RawDistanceRange};
pub use specs_file::{load_specs_file, SpecsFile};
