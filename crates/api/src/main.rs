use axum::{
    extract::{Path, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finsage_core::domain::scenario::{ExplorationResult, ScenarioRequest};
use finsage_core::domain::stock::StockCandidate;
use finsage_core::scenario::{ExplorerOptions, ScenarioExplorer};

mod error;

use error::{ApiError, ApiResult};

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finsage_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let provider = finsage_core::universe::provider_from_settings(&settings)?;
    tracing::info!(provider = provider.provider_name(), "stock universe provider ready");

    let explorer = ScenarioExplorer::new(provider, ExplorerOptions::from_env());
    let state = AppState {
        explorer: Arc::new(explorer),
    };

    let app = router(state, &settings.cors_allowed_origin)?;

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[derive(Clone)]
struct AppState {
    explorer: Arc<ScenarioExplorer>,
}

fn router(state: AppState, cors_allowed_origin: &str) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_str(cors_allowed_origin)?)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .route("/explore", post(explore))
        .route("/universe", get(list_universe))
        .route("/universe/:symbol", get(get_universe_item))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
struct HomeResponse {
    message: &'static str,
}

async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "FinSage scenario backend is running. Use POST /explore. \
                  Illustrative only, not financial advice.",
    })
}

#[derive(Debug, Deserialize)]
struct ExploreBody {
    savings: f64,
    equity_pct: f64,
    risk_profile: String,
}

async fn explore(
    State(state): State<AppState>,
    Json(body): Json<ExploreBody>,
) -> ApiResult<Json<ExplorationResult>> {
    if !(0.0..=100.0).contains(&body.equity_pct) {
        return Err(ApiError::BadRequest(
            "Equity percentage must be between 0 and 100".to_string(),
        ));
    }

    let request = ScenarioRequest::new(body.savings, body.equity_pct, body.risk_profile);
    let result = state.explorer.explore(&request).await?;
    Ok(Json(result))
}

#[derive(Debug, Serialize)]
struct UniverseListing {
    provider: &'static str,
    items: Vec<StockCandidate>,
}

async fn list_universe(State(state): State<AppState>) -> ApiResult<Json<UniverseListing>> {
    let items = state.explorer.fetch_universe().await?;
    Ok(Json(UniverseListing {
        provider: state.explorer.provider().provider_name(),
        items,
    }))
}

async fn get_universe_item(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<StockCandidate>> {
    let symbol = finsage_core::symbol::normalize_symbol(&symbol)?;

    state
        .explorer
        .fetch_universe()
        .await?
        .into_iter()
        .find(|c| c.symbol == symbol)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("{symbol} is not in the stock universe")))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &finsage_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
