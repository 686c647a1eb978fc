use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub venue_api_base_url: String,
    pub venue_request_timeout_secs: u64,
    pub venue_user_agent: String,
    pub venue_max_retries: u32,
    pub venue_retry_backoff_base_ms: u64,
    /// Largest accepted cart value, in cents.
    pub max_cart_value: i64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("venue_api_base_url", &self.venue_api_base_url)
            .field(
                "venue_request_timeout_secs",
                &self.venue_request_timeout_secs,
            )
            .field("venue_user_agent", &self.venue_user_agent)
            .field("venue_max_retries", &self.venue_max_retries)
            .field(
                "venue_retry_backoff_base_ms",
                &self.venue_retry_backoff_base_ms,
            )
            .field("max_cart_value", &self.max_cart_value)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .finish()
    }
}
