use std::{future::Future, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::people::repo::seaorm::SeaOrmPeopleRepository;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    // Ctrl+C everywhere
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    // SIGTERM from process managers and containers
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
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
    info!(service = "server", event = "shutdown_signal", "shutdown signal received");
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(service = "server", event = "listening", %addr, "listening on {}", addr);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: connect the datastore, build the app and run the HTTP server.
/// The connection is opened once here and closed after the server drains.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    // DB connection, schema brought up to date
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    // Build router
    let repo = Arc::new(SeaOrmPeopleRepository::new(db.clone()));
    let app = routes::build_router(AppState::new(repo), build_cors());

    // Bind and serve until a shutdown signal
    let listener = TcpListener::bind(cfg.bind_addr()).await?;
    let served = serve(listener, app, shutdown_signal()).await;

    // close the pool whether or not serving failed
    models::db::disconnect(db).await;
    served
}
