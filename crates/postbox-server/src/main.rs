use std::sync::Arc;

use tracing::{info, warn};

use postbox_api::state::{AppState, AppStateInner};
use postbox_db::Database;
use postbox_server::build_router;
use postbox_server::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "postbox_server=debug,postbox_api=debug,postbox_db=debug,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    // An unreachable store is logged, not fatal: static assets keep working
    // and submissions fail with 500 until the database comes back
    let db = Database::connect(&config.db_path);
    let state: AppState = Arc::new(AppStateInner {
        db,
        email_policy: config.email_policy(),
    });

    let app = build_router(state, &config.static_dirs);

    let addr = config.socket_addr()?;
    info!("Postbox listening on http://{}", addr);
    info!(
        "Serving {} and {} at /scripts",
        config.static_dirs.public.display(),
        config.static_dirs.scripts.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable ({}), waiting for Ctrl+C", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
