//! Prometheus metrics recorder and metric name constants.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::error::{ServerError, ServerResult};

/// HTTP requests total (counter, labels: method, path, status).
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
/// Topics inserted into the registry (counter).
pub const TOPICS_INSERTED_TOTAL: &str = "topics_inserted_total";
/// Candidates skipped as duplicates during registration (counter).
pub const TOPICS_DEDUPLICATED_TOTAL: &str = "topics_deduplicated_total";
/// Candidates skipped because extraction or embedding failed (counter).
pub const TOPIC_REGISTRATION_FAILURES_TOTAL: &str = "topic_registration_failures_total";

/// Install the process-global Prometheus recorder.
///
/// Must be called once at startup, before any metrics are recorded. The
/// returned handle renders the `/metrics` endpoint.
pub fn install_recorder() -> ServerResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|err| ServerError::Internal(format!("failed to install metrics recorder: {err}")))
}

/// Handle backed by a recorder that is never installed globally. Used where
/// a second global install would fail, e.g. tests building several server
/// states in one process.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_handle_renders() {
        let handle = detached_handle();
        let output = handle.render();
        assert!(output.is_empty() || output.contains('\n'));
    }

    #[test]
    fn metric_names_are_snake_case() {
        for name in [
            HTTP_REQUESTS_TOTAL,
            TOPICS_INSERTED_TOTAL,
            TOPICS_DEDUPLICATED_TOTAL,
            TOPIC_REGISTRATION_FAILURES_TOTAL,
        ] {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "metric name '{name}' must be snake_case"
            );
        }
    }
}
