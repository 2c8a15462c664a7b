use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::ratelimit::client_identity;

pub const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Admits or rejects the request before any scoring work starts.
pub async fn rate_limit_middleware(
    State(state): State<HandlerState>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let identity = client_identity(request.headers(), peer);

    let admission = state.limiter.check(&identity).inspect_err(|e| {
        warn!(client = %identity, path = %request.uri().path(), error = %e, "Rate limit exceeded");
    })?;

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(RATE_LIMIT_LIMIT_HEADER, HeaderValue::from(admission.limit));
    headers.insert(
        RATE_LIMIT_REMAINING_HEADER,
        HeaderValue::from(admission.remaining),
    );

    Ok(response)
}
