//! Wiring & DI. Entry point: bootstrap adapters, inject into the service, run UI.
//! No business logic here.

use dotenv::dotenv;
use gold_day::adapters::persistence::StateJson;
use gold_day::adapters::random::{SeededRandomSource, ThreadRandomSource};
use gold_day::adapters::ui::tui::TuiInputPort;
use gold_day::ports::{InputPort, RandomSource, SnapshotPort};
use gold_day::shared::config::AppConfig;
use gold_day::usecases::GroupService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_default();
    gold_day::adapters::ui::init_ui(cfg.banner_enabled());

    let state_json = StateJson::new(cfg.state_path());
    info!(path = %state_json.path().display(), "snapshot file");
    let snapshots: Arc<dyn SnapshotPort> = Arc::new(state_json);

    let rng: Arc<dyn RandomSource> = match cfg.shuffle_seed {
        Some(seed) => {
            info!(seed, "seeded draw enabled");
            Arc::new(SeededRandomSource::new(seed))
        }
        None => Arc::new(ThreadRandomSource),
    };

    let service = Arc::new(
        GroupService::open(snapshots, rng)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(Arc::clone(&service)));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    info!(version = service.state().await.version, "bye");
    Ok(())
}
