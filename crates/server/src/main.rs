use anyhow::Result;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize tracing once for entire process
    // The guard must be kept alive for the duration of the program to ensure logs are flushed
    let _guard = init_tracing()?;

    tracing::info!("🚀 Starting Eventbook server");

    let config = api::config::Config::from_env()?;
    tracing::info!("✓ Configuration loaded");

    let state = api::AppState::new();

    tokio::select! {
        result = api::run_api(state, &config) => {
            tracing::error!("API service exited: {:?}", result);
            result?;
        }
        _ = wait_for_shutdown() => {
            tracing::info!("📡 Shutdown signal received");
        }
    }

    tracing::info!("✓ Server stopped gracefully");
    Ok(())
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn init_tracing() -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,api=debug,eventbook_core=debug".into());

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    let enable_file_logging = std::env::var("ENABLE_FILE_LOGGING")
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(true);

    if enable_file_logging {
        let file_appender = tracing_appender::rolling::daily("logs", "eventbook.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .json();

        registry.with(file_layer).init();

        Ok(Some(guard))
    } else {
        registry.init();
        Ok(None)
    }
}
