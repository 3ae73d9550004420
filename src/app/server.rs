use crate::app::handlers::generate_site;
use crate::config::toml_config::ServerConfig;
use crate::core::gateway::SiteGateway;
use crate::domain::ports::GenerationBackend;
use crate::utils::error::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state passed to all request handlers. Holds nothing mutable.
pub struct AppState<B: GenerationBackend> {
    pub gateway: Arc<SiteGateway<B>>,
    pub body_limit_bytes: usize,
}

impl<B: GenerationBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            body_limit_bytes: self.body_limit_bytes,
        }
    }
}

/// `POST /api/generate` plus static files from `server.static_dir` for
/// every other path.
pub fn build_router<B: GenerationBackend + 'static>(
    gateway: Arc<SiteGateway<B>>,
    server: &ServerConfig,
) -> Router {
    let state = AppState {
        gateway,
        body_limit_bytes: server.body_limit_bytes,
    };

    Router::new()
        .route("/api/generate", post(generate_site::<B>))
        .with_state(state)
        .fallback_service(ServeDir::new(&server.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(server.body_limit_bytes)),
        )
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: &str, router: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    tracing::info!("🚀 Site generator running on http://{}", local);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("🛑 Shutdown signal received");
        })
        .await?;

    Ok(())
}
