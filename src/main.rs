use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shift_scheduler::api::{AppState, create_router};
use shift_scheduler::config::{ConfigLoader, LogFormat, LoggingConfig};
use shift_scheduler::scheduling::ShiftScheduler;
use shift_scheduler::storage::Database;

const CONFIG_PATH_ENV: &str = "SCHEDULER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config/scheduler.yaml";

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured filter
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    match logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)?
        .with_env_overrides()
        .into_config();

    init_tracing(&config.logging);
    tracing::info!(config = %config_path, "Configuration loaded");

    let db = Database::connect(&config.database).await.map_err(|e| {
        tracing::error!("Failed to open database: {}", e);
        e
    })?;
    db.migrate().await.map_err(|e| {
        tracing::error!("Failed to apply migrations: {}", e);
        e
    })?;
    tracing::info!("Migrations applied");

    let scheduler = ShiftScheduler::new(db);
    for employee in &config.employees {
        scheduler.register_employee(employee).await?;
    }
    if !config.employees.is_empty() {
        tracing::info!(count = config.employees.len(), "Registered configured employees");
    }

    let app = create_router(AppState::new(scheduler)).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
