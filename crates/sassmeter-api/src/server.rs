//! HTTP server bootstrap.

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use sassmeter_agents::build_narrator;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ApiConfig, HttpConfig};
use crate::routes::router;
use crate::state::{AppState, SharedState};

/// Router with CORS and request tracing applied
pub fn app(state: SharedState, http: &HttpConfig) -> Router {
    router(state)
        .layer(cors_layer(&http.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the narrator, bind and serve until Ctrl+C
pub async fn serve(config: ApiConfig) -> anyhow::Result<()> {
    let narrator = build_narrator(&config.narrator).context("failed to build narrative backend")?;
    let state = AppState::shared(narrator);
    state.spawn_sweeper(
        config.http.session_idle_ttl(),
        config.http.session_sweep_interval(),
    );
    let app = app(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.http.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http.bind_addr))?;
    tracing::info!(addr = %config.http.bind_addr, "sassmeter listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sassmeter_agents::PlaceholderNarrator;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let config = ApiConfig::default();
        let app = app(AppState::shared(Arc::new(PlaceholderNarrator::new())), &config.http);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }
}
