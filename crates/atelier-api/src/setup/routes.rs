//! Route configuration and setup

mod health;

use crate::api_doc;
use crate::constants::{API_PREFIX, HTTP_CONCURRENCY_LIMIT, MAX_BODY_BYTES, OPENAPI_PATH};
use crate::handlers;
use crate::state::AppState;
use atelier_core::Config;
use atelier_infra::{request_id_middleware, security_headers_middleware};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(HTTP_CONCURRENCY_LIMIT)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = api_routes()
        .merge(health_routes())
        .route(
            OPENAPI_PATH,
            get(|| async { Json(api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_PATH).path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/contact", API_PREFIX),
            post(handlers::contact::submit_contact),
        )
        .route(
            &format!("{}/validate-email", API_PREFIX),
            get(handlers::email_validation::validate_email),
        )
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::ServerConfig;

    fn config_with_origins(origins: &str) -> Config {
        let origins = origins.to_string();
        let server = ServerConfig::from_lookup(move |key| match key {
            "DATABASE_URL" => Some("postgresql://localhost/atelier".to_string()),
            "CORS_ORIGINS" => Some(origins.clone()),
            _ => None,
        })
        .unwrap();
        Config(Box::new(server))
    }

    #[test]
    fn cors_accepts_listed_origins() {
        let config = config_with_origins("https://studio.test, https://www.studio.test");
        assert!(setup_cors(&config).is_ok());
    }

    #[test]
    fn cors_rejects_unparseable_origin() {
        let config = config_with_origins("https://studio.test,bad\norigin");
        assert!(setup_cors(&config).is_err());
    }
}
