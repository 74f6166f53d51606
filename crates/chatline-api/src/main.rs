//! chatline REST and WebSocket server entry point.
//!
//! Binary name: `chatline`
//!
//! Parses CLI arguments, sets up tracing, layers configuration (file, env,
//! flags), opens the database, then serves the router until Ctrl+C/SIGTERM.

mod cli;
mod http;
mod state;

use clap::Parser;

use chatline_infra::config::load_config;
use chatline_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose).to_string(),
        json: cli.log_json,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Serve(args) => serve(args).await,
    };

    shutdown_tracing();
    result
}

async fn serve(args: cli::ServeArgs) -> anyhow::Result<()> {
    let file_config = load_config(args.config.as_deref()).await?;
    let config = args.apply(file_config);

    // Storage must be ready before the listener accepts anything, so /health
    // only answers once the process can serve.
    let state = AppState::init(&config).await?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        %addr,
        reply_mode = %config.reply_mode,
        cors_origins = ?config.cors_origins,
        "chatline listening"
    );

    let router = http::router::build_router(state, &config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
