use std::path::Path;

use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::{parse_config, ConsoleConfig};
use crate::errors::ConsoleError;

/// Load the config file (if any) and apply command-line overrides.
pub async fn load_config(args: &ServeArgs) -> Result<ConsoleConfig, ConsoleError> {
    let mut config = match &args.config {
        Some(path) => parse_config(Path::new(path)).await?,
        None => ConsoleConfig::default(),
    };

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(kind) = args.backend {
        config.backend.kind = kind;
    }

    Ok(config)
}

pub async fn handle_serve(args: ServeArgs) -> Result<(), ConsoleError> {
    let config = load_config(&args).await?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        backend = %config.backend.kind,
        env = %config.env,
        region = %config.region,
        version = crate::VERSION,
        built = crate::BUILD_TIMESTAMP,
        "Starting console API server"
    );

    let state = api::create_app_state(&config)?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ConsoleError::Internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
