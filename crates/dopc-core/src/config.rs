use crate::app_config::{AppConfig, Environment};
use crate::AppConfigError;

pub const DEFAULT_VENUE_API_BASE_URL: &str =
    "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues/";

/// One million euros, in cents.
pub const DEFAULT_MAX_CART_VALUE: i64 = 100_000_000;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `AppConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, AppConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `AppConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, AppConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, AppConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| AppConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, AppConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, AppConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, AppConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, AppConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("DOPC_ENV", "development"))?;
    let bind_addr = parse_addr("DOPC_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("DOPC_LOG_LEVEL", "info");

    let venue_api_base_url = or_default("DOPC_VENUE_API_BASE_URL", DEFAULT_VENUE_API_BASE_URL);
    if !(venue_api_base_url.starts_with("http://") || venue_api_base_url.starts_with("https://"))
    {
        return Err(invalid(
            "DOPC_VENUE_API_BASE_URL",
            format!("expected an http(s) URL, got '{venue_api_base_url}'"),
        ));
    }
    let venue_request_timeout_secs = parse_u64("DOPC_VENUE_REQUEST_TIMEOUT_SECS", "10")?;
    if venue_request_timeout_secs == 0 {
        return Err(invalid(
            "DOPC_VENUE_REQUEST_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }
    let venue_user_agent = or_default("DOPC_VENUE_USER_AGENT", "dopc/0.1 (delivery-order-price)");
    let venue_max_retries = parse_u32("DOPC_VENUE_MAX_RETRIES", "2")?;
    let venue_retry_backoff_base_ms = parse_u64("DOPC_VENUE_RETRY_BACKOFF_BASE_MS", "200")?;

    let max_cart_value = or_default("DOPC_MAX_CART_VALUE", &DEFAULT_MAX_CART_VALUE.to_string())
        .parse::<i64>()
        .map_err(|e| invalid("DOPC_MAX_CART_VALUE", e.to_string()))?;
    if max_cart_value < 0 {
        return Err(invalid(
            "DOPC_MAX_CART_VALUE",
            format!("must not be negative, got {max_cart_value}"),
        ));
    }

    let rate_limit_max_requests = parse_usize("DOPC_RATE_LIMIT_MAX_REQUESTS", "10000")?;
    let rate_limit_window_secs = parse_u64("DOPC_RATE_LIMIT_WINDOW_SECS", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        venue_api_base_url,
        venue_request_timeout_secs,
        venue_user_agent,
        venue_max_retries,
        venue_retry_backoff_base_ms,
        max_cart_value,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, AppConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(AppConfigError::InvalidEnvVar {
            var: "DOPC_ENV".to_string(),
            reason: format!("expected development, test, or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
