use clap::{Parser, Subcommand};
use finsage_core::domain::scenario::ScenarioRequest;
use finsage_core::scenario::{ExplorerOptions, ScenarioExplorer};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "finsage_cli",
    about = "Explore illustrative savings scenarios (not financial advice)"
)]
struct Args {
    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split savings into cash and equity and list risk-matched illustrative positions.
    Explore {
        #[arg(long)]
        savings: f64,

        /// Share of savings to put in equities, 0..=100.
        #[arg(long, allow_negative_numbers = true)]
        equity_pct: f64,

        /// Conservative, Moderate or Aggressive (case-insensitive).
        #[arg(long)]
        risk_profile: String,
    },

    /// Print the candidate universe the configured provider returns.
    Universe,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finsage_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let provider = finsage_core::universe::provider_from_settings(&settings)?;
    let explorer = ScenarioExplorer::new(provider, ExplorerOptions::from_env());

    let output = match args.command {
        Command::Explore {
            savings,
            equity_pct,
            risk_profile,
        } => {
            let request = ScenarioRequest::new(savings, equity_pct, risk_profile);
            let result = explorer.explore(&request).await.map_err(|err| {
                let err = anyhow::Error::new(err);
                sentry_anyhow::capture_anyhow(&err);
                err
            })?;
            serde_json::to_value(&result)?
        }
        Command::Universe => {
            let items = explorer.fetch_universe().await?;
            tracing::info!(
                provider = explorer.provider().provider_name(),
                items = items.len(),
                "listed stock universe"
            );
            json!({
                "provider": explorer.provider().provider_name(),
                "items": items,
            })
        }
    };

    let text = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");

    Ok(())
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
