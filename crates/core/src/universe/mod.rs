use crate::config::Settings;
use crate::domain::stock::StockCandidate;
use anyhow::Result;
use std::sync::Arc;

pub mod http;
pub mod static_source;

pub use http::HttpJsonUniverseProvider;
pub use static_source::{FileUniverseProvider, StaticUniverseProvider};

/// Source of the candidate universe the scenario engine picks from.
///
/// Implementations must return candidates with a positive unit price, a non-empty tier set
/// and unique normalized symbols.
#[async_trait::async_trait]
pub trait StockUniverseProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn get_candidates(&self) -> Result<Vec<StockCandidate>>;
}

/// `UNIVERSE_URL` wins over `UNIVERSE_FILE`; with neither set the built-in universe is used.
pub fn provider_from_settings(settings: &Settings) -> Result<Arc<dyn StockUniverseProvider>> {
    if settings.universe_url.is_some() {
        return Ok(Arc::new(HttpJsonUniverseProvider::from_settings(settings)?));
    }
    if settings.universe_file.is_some() {
        return Ok(Arc::new(FileUniverseProvider::from_settings(settings)?));
    }
    Ok(Arc::new(StaticUniverseProvider::builtin()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            sentry_dsn: None,
            universe_url: None,
            universe_api_key: None,
            universe_file: None,
            cors_allowed_origin: crate::config::DEFAULT_CORS_ALLOWED_ORIGIN.to_string(),
        }
    }

    #[test]
    fn picks_provider_by_configured_source() {
        let builtin = provider_from_settings(&settings()).unwrap();
        assert_eq!(builtin.provider_name(), "builtin_static");

        let mut s = settings();
        s.universe_file = Some("/tmp/universe.json".to_string());
        assert_eq!(provider_from_settings(&s).unwrap().provider_name(), "json_file");

        s.universe_url = Some("http://127.0.0.1:9".to_string());
        assert_eq!(provider_from_settings(&s).unwrap().provider_name(), "external_http_json");
    }
}
