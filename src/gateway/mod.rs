//! HTTP gateway (Axum) for answer evaluation and batch ranking.
//!
//! The two scoring routes sit behind the rate-limit middleware and an optional path
//! prefix; `/` and `/health` are always served at the root and never rate-limited.

pub mod error;
pub mod handler;
pub mod middleware;
pub mod payload;
pub mod state;


use std::any::Any;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as CorsAny, CorsLayer},
    trace::TraceLayer,
};

pub use error::GatewayError;
pub use handler::{
    evaluate_answer_handler, health_handler, rank_candidates_handler, root_handler,
};
pub use state::HandlerState;

use crate::config::Config;

pub const EVALUATE_ANSWER_PATH: &str = "/evaluate-answer";
pub const RANK_CANDIDATES_PATH: &str = "/rank-candidates";
pub const HEALTH_PATH: &str = "/health";

/// Router settings that come from configuration rather than shared state.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Empty, or a path such as `/api/v1` (leading `/`, no trailing `/`).
    pub api_prefix: String,
    /// `["*"]` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            api_prefix: String::new(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl RouterOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_prefix: config.api_prefix.clone(),
            cors_origins: config.cors_origins.clone(),
        }
    }
}

pub fn create_router_with_state(state: HandlerState, options: &RouterOptions) -> Router {
    let scoring = Router::new()
        .route(EVALUATE_ANSWER_PATH, post(evaluate_answer_handler))
        .route(RANK_CANDIDATES_PATH, post(rank_candidates_handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ));

    let router = Router::new()
        .route("/", get(root_handler))
        .route(HEALTH_PATH, get(health_handler));

    let router = if options.api_prefix.is_empty() {
        router.merge(scoring)
    } else {
        router.nest(&options.api_prefix, scoring)
    };

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

fn request_span(request: &Request) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %uuid::Uuid::new_v4(),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(CorsAny);

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(CorsAny);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    GatewayError::Internal(format!("handler panicked: {detail}")).into_response()
}
