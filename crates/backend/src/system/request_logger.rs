use axum::body::Body;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Logs one line per request: status, duration, response size, method and path.
/// Server errors are logged at warn level.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();
    let size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    if status.is_server_error() {
        tracing::warn!(
            "{} | {:>5}ms | {:>8} | {:>6} {}",
            status.as_u16(),
            duration.as_millis(),
            size,
            method,
            uri.path()
        );
    } else {
        tracing::info!(
            "{} | {:>5}ms | {:>8} | {:>6} {}",
            status.as_u16(),
            duration.as_millis(),
            size,
            method,
            uri.path()
        );
    }

    response
}
