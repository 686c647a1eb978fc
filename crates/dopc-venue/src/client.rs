//! HTTP client for the venue static and dynamic data endpoints.
//!
//! Each venue is published under two URLs: `{base}/{slug}/static` carries the
//! venue location, `{base}/{slug}/dynamic` carries delivery pricing. Both are
//! fetched concurrently by [`VenueClient::fetch_venue`].

use std::time::Duration;

use dopc_core::{AppConfig, GpsCoordinate};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::VenueError;
use crate::retry::retry_with_backoff;
use crate::types::{DynamicVenueResponse, RawDeliverySpecs, StaticVenueResponse};

const DEFAULT_USER_AGENT: &str = "dopc/0.1 (delivery-order-price)";

/// Everything pricing needs to know about one venue.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub slug: String,
    pub location: GpsCoordinate,
    /// Published pricing; tiers are not yet validated.
    pub delivery_specs: RawDeliverySpecs,
}

/// Client for the venue API.
///
/// Use [`VenueClient::from_config`] in the service or
/// [`VenueClient::with_base_url`] to point at a mock server in tests.
pub struct VenueClient {
    client: Client,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    backoff_base_ms: u64,
}

impl VenueClient {
    /// Builds a client from the venue settings in [`AppConfig`].
    ///
    /// # Errors
    ///
    /// - [`VenueError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    /// - [`VenueError::InvalidBaseUrl`] if the configured base URL is unusable.
    pub fn from_config(config: &AppConfig) -> Result<Self, VenueError> {
        Ok(Self::build(
            &config.venue_api_base_url,
            config.venue_request_timeout_secs,
            &config.venue_user_agent,
        )?
        .with_retry_policy(config.venue_max_retries, config.venue_retry_backoff_base_ms))
    }

    /// Creates a client with a custom base URL and no retries (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`VenueClient::from_config`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, VenueError> {
        Self::build(base_url, timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Replaces the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    fn build(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, VenueError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash keeps the last configured segment (`venues`) when
        // slug segments are appended.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| VenueError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(VenueError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Fetches location and pricing for `slug` concurrently.
    ///
    /// Fails as soon as either request fails.
    ///
    /// # Errors
    ///
    /// Any error from [`VenueClient::fetch_location`] or
    /// [`VenueClient::fetch_delivery_specs`].
    pub async fn fetch_venue(&self, slug: &str) -> Result<Venue, VenueError> {
        let (location, delivery_specs) =
            tokio::try_join!(self.fetch_location(slug), self.fetch_delivery_specs(slug))?;
        tracing::debug!(
            slug,
            latitude = location.latitude(),
            longitude = location.longitude(),
            "venue data fetched"
        );
        Ok(Venue {
            slug: slug.to_owned(),
            location,
            delivery_specs,
        })
    }

    /// Fetches the venue location from the static endpoint.
    ///
    /// # Errors
    ///
    /// - [`VenueError::NotFound`] on HTTP 404 (not retried).
    /// - [`VenueError::UnexpectedStatus`] on any other non-2xx status (5xx retried, 4xx not).
    /// - [`VenueError::Http`] on network failure after all retries.
    /// - [`VenueError::Deserialize`] if the body does not match the expected shape.
    /// - [`VenueError::InvalidCoordinates`] if the published point is off the globe.
    pub async fn fetch_location(&self, slug: &str) -> Result<GpsCoordinate, VenueError> {
        let response: StaticVenueResponse = self.fetch_json(slug, "static").await?;
        GpsCoordinate::from_lon_lat(response.venue_raw.location.coordinates).map_err(|source| {
            VenueError::InvalidCoordinates {
                slug: slug.to_owned(),
                source,
            }
        })
    }

    /// Fetches the venue delivery pricing from the dynamic endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`VenueClient::fetch_location`], minus the coordinate check.
    pub async fn fetch_delivery_specs(&self, slug: &str) -> Result<RawDeliverySpecs, VenueError> {
        let response: DynamicVenueResponse = self.fetch_json(slug, "dynamic").await?;
        Ok(response.venue_raw.delivery_specs)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        slug: &str,
        kind: &str,
    ) -> Result<T, VenueError> {
        let url = self.venue_url(slug, kind)?;

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(VenueError::NotFound {
                        slug: slug.to_owned(),
                    });
                }

                if !status.is_success() {
                    return Err(VenueError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| VenueError::Deserialize {
                    context: format!("{kind} data for venue {slug}"),
                    source: e,
                })
            }
        })
        .await
    }

    /// Builds `{base}/{slug}/{kind}`, percent-encoding the slug as one segment.
    fn venue_url(&self, slug: &str, kind: &str) -> Result<Url, VenueError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| VenueError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .push(slug)
            .push(kind);
        Ok(url)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
