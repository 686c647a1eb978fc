//! Venue API client: fetches venue location and delivery pricing.

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::{Venue, VenueClient};
pub use error::VenueError;
pub use types::{DeliveryPricing, RawDeliverySpecs};
