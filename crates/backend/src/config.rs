/// Render service connection settings loaded from environment variables.
///
/// All fields have defaults suitable for a locally running service.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base HTTP URL of the render service (default: `http://localhost:8000`).
    pub base_url: String,
    /// HTTP request timeout in seconds (default: `30`). Render calls can
    /// be slow; this bounds how long a single request may hang.
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `STUDIO_BACKEND_URL`   | `http://localhost:8000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    pub fn from_env() -> Self {
        let base_url = std::env::var("STUDIO_BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
        }
    }
}
