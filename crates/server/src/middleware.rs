use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

/// Propagates an incoming `x-request-id` or mints one, making it available to
/// handlers via request extensions and echoing it on the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(id.clone());
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Logs one line per completed request with method, path, status, and latency.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let id = request
        .extensions()
        .get::<String>()
        .cloned()
        .unwrap_or_default();

    let start = std::time::Instant::now();
    let response = next.run(request).await;

    metrics::counter!(
        crate::metrics::HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.clone(),
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status(),
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %id,
        "request completed"
    );
    response
}
