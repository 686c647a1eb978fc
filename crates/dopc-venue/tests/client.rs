//! Integration tests for `VenueClient` using wiremock HTTP mocks.

use dopc_venue::{VenueClient, VenueError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SLUG: &str = "home-assignment-venue-helsinki";

fn test_client(base_url: &str) -> VenueClient {
    VenueClient::with_base_url(base_url, 5).expect("client construction should not fail")
}

fn static_body(lon: f64, lat: f64) -> serde_json::Value {
    serde_json::json!({
        "venue_raw": {
            "location": { "coordinates": [lon, lat] },
            "name": "Home Assignment Venue Helsinki"
        }
    })
}

fn dynamic_body() -> serde_json::Value {
    serde_json::json!({
        "venue_raw": {
            "delivery_specs": {
                "order_minimum_no_surcharge": 1000,
                "delivery_pricing": {
                    "base_price": 190,
                    "distance_ranges": [
                        { "min": 0, "max": 500, "a": 0, "b": 0, "flag": null },
                        { "min": 500, "max": 1000, "a": 100, "b": 0, "flag": null },
                        { "min": 1000, "max": 1500, "a": 200, "b": 0, "flag": null },
                        { "min": 1500, "max": 2000, "a": 200, "b": 1, "flag": null },
                        { "min": 2000, "max": 0, "a": 0, "b": 0, "flag": null }
                    ]
                }
            }
        }
    })
}

async fn mount_venue(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/{SLUG}/static")))
        .respond_with(ResponseTemplate::new(200).set_body_json(static_body(24.928_135_12, 60.170_121_43)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{SLUG}/dynamic")))
        .respond_with(ResponseTemplate::new(200).set_body_json(dynamic_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_venue_returns_location_and_specs() {
    let server = MockServer::start().await;
    mount_venue(&server).await;

    let client = test_client(&server.uri());
    let venue = client.fetch_venue(SLUG).await.expect("should fetch venue");

    assert_eq!(venue.slug, SLUG);
    assert!((venue.location.latitude() - 60.170_121_43).abs() < 1e-12);
    assert!((venue.location.longitude() - 24.928_135_12).abs() < 1e-12);
    assert_eq!(venue.delivery_specs.order_minimum_no_surcharge, 1000);
    assert_eq!(venue.delivery_specs.delivery_pricing.base_price, 190);
    assert_eq!(venue.delivery_specs.delivery_pricing.distance_ranges.len(), 5);

    let specs = venue
        .delivery_specs
        .into_delivery_specs()
        .expect("published specs are valid");
    assert_eq!(specs.max_allowed_distance(), 2000);
}

#[tokio::test]
async fn fetch_venue_honours_base_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/home-assignment-api/v1/venues/{SLUG}/static")))
        .respond_with(ResponseTemplate::new(200).set_body_json(static_body(24.93, 60.17)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/home-assignment-api/v1/venues/{SLUG}/dynamic")))
        .respond_with(ResponseTemplate::new(200).set_body_json(dynamic_body()))
        .mount(&server)
        .await;

    let base = format!("{}/home-assignment-api/v1/venues/", server.uri());
    let client = test_client(&base);
    client.fetch_venue(SLUG).await.expect("should fetch venue");
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry_policy(3, 0);
    let err = client.fetch_venue("nope").await.unwrap_err();

    assert!(
        matches!(&err, VenueError::NotFound { slug } if slug == "nope"),
        "expected NotFound, got {err:?}"
    );
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{SLUG}/dynamic")))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_venue(&server).await;

    let client = test_client(&server.uri()).with_retry_policy(2, 0);
    let venue = client.fetch_venue(SLUG).await.expect("should succeed after retries");
    assert_eq!(venue.delivery_specs.delivery_pricing.base_price, 190);
}

#[tokio::test]
async fn server_error_surfaces_after_retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{SLUG}/dynamic")))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry_policy(1, 0);
    let err = client.fetch_delivery_specs(SLUG).await.unwrap_err();

    assert!(
        matches!(err, VenueError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus 500, got {err:?}"
    );
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{SLUG}/static")))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry_policy(3, 0);
    let err = client.fetch_location(SLUG).await.unwrap_err();

    assert!(
        matches!(err, VenueError::UnexpectedStatus { status: 403, .. }),
        "expected UnexpectedStatus 403, got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{SLUG}/dynamic")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "venue_raw": { "delivery_specs": { "order_minimum_no_surcharge": "lots" } }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_delivery_specs(SLUG).await.unwrap_err();

    assert!(
        matches!(&err, VenueError::Deserialize { context, .. } if context.contains(SLUG)),
        "expected Deserialize, got {err:?}"
    );
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{SLUG}/static")))
        // Latitude and longitude swapped into the wrong slots.
        .respond_with(ResponseTemplate::new(200).set_body_json(static_body(60.17, 124.93)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_location(SLUG).await.unwrap_err();

    assert!(
        matches!(err, VenueError::InvalidCoordinates { .. }),
        "expected InvalidCoordinates, got {err:?}"
    );
}
