//! CloudBox Server: personal cloud storage.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use cloudbox_api::{AppState, build_app};
use cloudbox_core::config::AppConfig;
use cloudbox_core::config::database::DatabaseBackend;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_database::{DatabasePool, MemoryCatalog};

/// CloudBox: personal cloud storage server
#[derive(Debug, Parser)]
#[command(name = "cloudbox-server", version, about, long_about = None)]
struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`
    /// (defaults to `CLOUDBOX_ENV`, then `development`)
    #[arg(short, long)]
    env: Option<String>,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Clone, Copy, Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(cli.env.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run(config).await,
        Commands::Migrate => migrate(config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "CloudBox exited with an error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration(env: Option<&str>) -> Result<AppConfig, AppError> {
    let env = env
        .map(String::from)
        .or_else(|| std::env::var("CLOUDBOX_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CloudBox v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.uses_placeholder_secret() {
        tracing::warn!("auth.jwt_secret is the shipped placeholder; set CLOUDBOX__AUTH__JWT_SECRET");
    }

    // ── Step 1: Object store ─────────────────────────────────────
    tracing::info!(provider = ?config.storage.provider, "Initializing object store...");
    let object_store = cloudbox_storage::build_object_store(&config.storage).await?;
    tracing::info!(provider = object_store.provider_type(), "Object store initialized");

    // ── Step 2: Catalog + credential store ───────────────────────
    let (state, db_pool) = match config.database.backend {
        DatabaseBackend::Postgres => {
            let db_pool = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                cloudbox_database::migration::run_migrations(db_pool.pool()).await?;
            }

            let state = AppState::with_postgres(config.clone(), db_pool.clone(), object_store);
            (state, Some(db_pool))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory catalog; all data is lost on shutdown");
            let memory = Arc::new(MemoryCatalog::new());
            let state = AppState::from_parts(
                config.clone(),
                None,
                memory.clone(),
                memory.clone(),
                memory,
                object_store,
            );
            (state, None)
        }
    };

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = build_app(state, &config.server.cors);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;

    tracing::info!("CloudBox server listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("CloudBox server shut down gracefully");
    Ok(())
}

/// Apply migrations against the configured database
async fn migrate(config: AppConfig) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        return Err(AppError::configuration(
            "Migrations require database.backend = \"postgres\"",
        ));
    }

    let db_pool = DatabasePool::connect(&config.database).await?;
    cloudbox_database::migration::run_migrations(db_pool.pool()).await?;
    db_pool.close().await;
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
