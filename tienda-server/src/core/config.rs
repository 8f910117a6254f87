/// Server configuration
///
/// Every setting can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATA_DIR | /var/lib/tienda | data directory (embedded database) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ADMIN_TOKEN | (unset) | bearer token accepted by the admin gate |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (unset) | when set, logs also go to a daily file |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout (ms) |
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory, holds the embedded database
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Bearer token for the admin gate. When unset every admin call is
    /// refused; real identity management lives outside this service.
    pub admin_token: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional log directory for file output
    pub log_dir: Option<String>,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/var/lib/tienda".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            admin_token: std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
