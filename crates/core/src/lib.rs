pub mod domain;
pub mod error;
pub mod scenario;
pub mod symbol;
pub mod universe;

pub use error::ScenarioError;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub universe_url: Option<String>,
        pub universe_api_key: Option<String>,
        pub universe_file: Option<String>,
        pub cors_allowed_origin: String,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                universe_url: non_empty_var("UNIVERSE_URL"),
                universe_api_key: non_empty_var("UNIVERSE_API_KEY"),
                universe_file: non_empty_var("UNIVERSE_FILE"),
                cors_allowed_origin: non_empty_var("CORS_ALLOWED_ORIGIN")
                    .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGIN.to_string()),
            })
        }

        pub fn require_universe_url(&self) -> anyhow::Result<&str> {
            self.universe_url
                .as_deref()
                .context("UNIVERSE_URL is required")
        }

        pub fn require_universe_file(&self) -> anyhow::Result<&str> {
            self.universe_file
                .as_deref()
                .context("UNIVERSE_FILE is required")
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
