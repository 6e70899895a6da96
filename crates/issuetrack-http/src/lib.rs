pub mod handlers;
pub mod payload;
pub mod reply;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use issuetrack_service::IssueService;

pub use payload::Payload;
pub use reply::Failure;

#[derive(Clone)]
pub struct AppState {
    pub service: IssueService,
}

pub fn router(service: IssueService) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/issues/:project",
            get(handlers::list_issues)
                .post(handlers::create_issue)
                .put(handlers::update_issue)
                .delete(handlers::delete_issue),
        )
        .with_state(AppState { service })
}

/// Serve until ctrl-c.
pub async fn serve(listener: TcpListener, service: IssueService) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("issuetrack listening on {addr}");
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
