mod api;
mod config;
mod db;
mod entity;
mod repository;

use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::repository::{FileService, InMemoryFileService, SeaOrmFileService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting filedepot server");
    let config = ServerConfig::load().context("failed to load server config")?;

    let files: Arc<dyn FileService> = match config.database_url.as_deref() {
        Some(url) => {
            info!("connecting to database and applying migrations");
            let db = db::init_pool_and_migrate(url)
                .await
                .context("failed to initialize database")?;
            Arc::new(SeaOrmFileService::new(db))
        }
        None => {
            warn!("no database configured, file records are kept in memory");
            Arc::new(InMemoryFileService::new())
        }
    };

    let assets_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let state = AppState::new(files, assets_dir);
    info!(archive = %state.archive_path().display(), "demo download archive");

    let mut app = api::create_router(Arc::new(state)).layer(TraceLayer::new_for_http());
    if config.cors_allow_any_origin {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// 信号监听安装失败时永不返回，服务继续运行。
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("shutdown signal received, stopping server"),
        Err(err) => {
            warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
