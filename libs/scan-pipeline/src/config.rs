use std::env;

use tracing::info;

/// Local-development default for the scoring service.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Base URL of the scoring service, without a trailing slash.
    pub api_base_url: String,
}

/// Read configuration from the environment, falling back to the documented
/// local-development defaults. `.env` files are honored when present.
pub fn load_config() -> ScanConfig {
    dotenvy::dotenv().ok();

    let api_base_url = env::var("SCORING_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string();
    info!("Using scoring service at {}", api_base_url);

    ScanConfig { api_base_url }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(DEFAULT_API_URL, "http://127.0.0.1:8000");
    }
}
