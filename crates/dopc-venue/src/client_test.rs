use super::*;

fn test_client(base_url: &str) -> VenueClient {
    VenueClient::with_base_url(base_url, 5).expect("client construction should not fail")
}

#[test]
fn venue_url_appends_slug_and_kind() {
    let client = test_client(
        "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues",
    );
    let url = client
        .venue_url("home-assignment-venue-helsinki", "static")
        .expect("url");
    assert_eq!(
        url.as_str(),
        "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues/home-assignment-venue-helsinki/static"
    );
}

#[test]
fn venue_url_tolerates_trailing_slashes() {
    let client = test_client("http://venues.test/api//");
    let url = client.venue_url("cafe", "dynamic").expect("url");
    assert_eq!(url.as_str(), "http://venues.test/api/cafe/dynamic");
}

#[test]
fn venue_url_keeps_slug_in_one_segment() {
    let client = test_client("http://venues.test");
    let url = client.venue_url("a/b c", "static").expect("url");
    assert_eq!(url.as_str(), "http://venues.test/a%2Fb%20c/static");
}

#[test]
fn rejects_unparseable_base_url() {
    let err = VenueClient::with_base_url("not a url", 5)
        .err()
        .expect("should fail");
    assert!(matches!(err, VenueError::InvalidBaseUrl { .. }), "{err}");
}

#[test]
fn rejects_non_http_scheme() {
    let err = VenueClient::with_base_url("ftp://venues.test", 5)
        .err()
        .expect("should fail");
    assert!(
        matches!(&err, VenueError::InvalidBaseUrl { reason, .. } if reason.contains("ftp")),
        "{err}"
    );
}

#[test]
fn retry_policy_defaults_to_none() {
    let client = test_client("http://venues.test");
    assert_eq!(client.max_retries, 0);
    let client = client.with_retry_policy(3, 50);
    assert_eq!(client.max_retries, 3);
    assert_eq!(client.backoff_base_ms, 50);
}
