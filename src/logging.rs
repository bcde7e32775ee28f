//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::Response,
};

/// The number of bytes of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Requests for view partials are polled every few seconds, so they are
/// logged at the `debug` level. Everything else is logged at the `info`
/// level. If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let is_partial = request.uri().path().starts_with(PARTIALS_PREFIX);

    let (parts, body_text) = match read_body(request.into_parts()).await {
        Ok(request) => request,
        Err((parts, error)) => {
            tracing::warn!("could not read body of request to {}: {error}", parts.uri);
            (parts, String::new())
        }
    };
    log_request(&parts, &body_text, is_partial);

    let request = Request::from_parts(parts, Body::from(body_text));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return Response::from_parts(parts, Body::empty());
        }
    };
    log_response(&parts, &body_text, is_partial);

    Response::from_parts(parts, Body::from(body_text))
}

const PARTIALS_PREFIX: &str = "/partials/";

async fn read_body(
    (parts, body): (request::Parts, Body),
) -> Result<(request::Parts, String), (request::Parts, axum::Error)> {
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => Ok((parts, String::from_utf8_lossy(&bytes).to_string())),
        Err(error) => Err((parts, error)),
    }
}

/// Shorten `body` to at most [LOG_BODY_LENGTH_LIMIT] bytes without
/// splitting a character.
fn truncate(body: &str) -> Option<&str> {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    Some(&body[..end])
}

fn log_request(parts: &request::Parts, body: &str, is_partial: bool) {
    let (method, uri) = (&parts.method, &parts.uri);

    match truncate(body) {
        Some(short_body) if is_partial => {
            tracing::debug!("Received request: {method} {uri}\nbody: {short_body}...")
        }
        Some(short_body) => {
            tracing::info!("Received request: {method} {uri}\nbody: {short_body}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None if is_partial => tracing::debug!("Received request: {method} {uri}\nbody: {body:?}"),
        None => tracing::info!("Received request: {method} {uri}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str, is_partial: bool) {
    let status = parts.status;

    match truncate(body) {
        Some(short_body) if is_partial => {
            tracing::debug!("Sending response: {status}\nbody: {short_body}...")
        }
        Some(short_body) => {
            tracing::info!("Sending response: {status}\nbody: {short_body}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None if is_partial => tracing::debug!("Sending response: {status}\nbody: {body:?}"),
        None => tracing::info!("Sending response: {status}\nbody: {body:?}"),
    }
}
