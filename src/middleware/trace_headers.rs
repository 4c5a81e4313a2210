use axum::{extract::Request, middleware::Next, response::Response};

/// Middleware to trace request and response headers.
pub async fn trace_headers(req: Request, next: Next) -> Response {
    tracing::trace!(
        method = %req.method(),
        uri = %req.uri(),
        incoming_headers = ?req.headers(),
        "Request headers"
    );

    let response = next.run(req).await;

    tracing::trace!(
        status = %response.status(),
        outgoing_headers = ?response.headers(),
        "Response headers"
    );

    response
}
