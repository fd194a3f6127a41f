//! Response status classification

use tracing::warn;
use wms_core::domain::outcome::ResponseOutcome;

use crate::error::{MonitorError, Result};

/// Turns response status codes into outcomes or fatal errors
///
/// 404, 401, 403 and 500 are always errors. Any other non-200 code is only
/// logged unless `strict_mode` is set, in which case it is an error too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseClassifier {
    pub strict_mode: bool,
}

impl ResponseClassifier {
    pub fn new(strict_mode: bool) -> Self {
        Self { strict_mode }
    }

    /// Classify the status of a response from `endpoint`
    ///
    /// # Returns
    /// `Success`, or `Unrecognized` when a lenient classifier lets an unknown
    /// code through. Every other outcome is returned as an error.
    pub fn classify(&self, status: u16, endpoint: &str) -> Result<ResponseOutcome> {
        let outcome = ResponseOutcome::from_status(status);
        let endpoint = endpoint.to_string();

        match outcome {
            ResponseOutcome::Success => Ok(outcome),
            ResponseOutcome::NotFound => Err(MonitorError::EndpointNotFound { endpoint }),
            ResponseOutcome::Unauthorized => Err(MonitorError::Unauthorized { endpoint }),
            ResponseOutcome::Forbidden => Err(MonitorError::Forbidden { endpoint }),
            ResponseOutcome::ServerError => Err(MonitorError::ServerFault { endpoint }),
            ResponseOutcome::Unrecognized(status) => {
                let err = MonitorError::Unrecognized { endpoint, status };
                if self.strict_mode {
                    return Err(err);
                }
                warn!("{}", err);
                Ok(outcome)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn classify_with_logs(
        classifier: ResponseClassifier,
        status: u16,
        endpoint: &str,
    ) -> (Result<ResponseOutcome>, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            classifier.classify(status, endpoint)
        });
        (result, logs.contents())
    }

    #[test]
    fn test_success_passes_silently() {
        let (result, logs) =
            classify_with_logs(ResponseClassifier::default(), 200, "/create_workflow");
        assert_eq!(result.unwrap(), ResponseOutcome::Success);
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_known_failures_are_fatal_and_name_endpoint() {
        let classifier = ResponseClassifier::default();
        for status in [404, 401, 403, 500] {
            let err = classifier
                .classify(status, "/update_workflow_status")
                .unwrap_err();
            assert!(err.is_classified());
            assert!(
                err.to_string().contains("/update_workflow_status"),
                "status {status}: {err}"
            );
        }
    }

    #[test]
    fn test_known_failure_variants() {
        let classifier = ResponseClassifier::default();
        assert!(matches!(
            classifier.classify(404, "/a"),
            Err(MonitorError::EndpointNotFound { .. })
        ));
        assert!(matches!(
            classifier.classify(401, "/a"),
            Err(MonitorError::Unauthorized { .. })
        ));
        assert!(matches!(
            classifier.classify(403, "/a"),
            Err(MonitorError::Forbidden { .. })
        ));
        assert!(matches!(
            classifier.classify(500, "/a"),
            Err(MonitorError::ServerFault { .. })
        ));
    }

    #[test]
    fn test_unauthorized_mentions_token() {
        let err = ResponseClassifier::default()
            .classify(401, "/x")
            .unwrap_err();
        assert!(err.to_string().contains("WMS_MONITOR_TOKEN"));
    }

    #[test]
    fn test_unrecognized_warns_but_is_not_fatal_by_default() {
        let (result, logs) =
            classify_with_logs(ResponseClassifier::default(), 503, "/create_workflow");

        assert_eq!(result.unwrap(), ResponseOutcome::Unrecognized(503));
        assert!(logs.contains("WARN"), "{logs}");
        assert!(
            logs.contains("The /create_workflow response code 503 is not recognized."),
            "{logs}"
        );
    }

    #[test]
    fn test_unrecognized_codes_pass_by_default() {
        let classifier = ResponseClassifier::default();
        for status in [201, 204, 302, 400, 502] {
            assert_eq!(
                classifier.classify(status, "/create_workflow").unwrap(),
                ResponseOutcome::Unrecognized(status)
            );
        }
    }

    #[test]
    fn test_unrecognized_is_fatal_in_strict_mode() {
        let (result, logs) =
            classify_with_logs(ResponseClassifier::new(true), 503, "/create_workflow");

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            MonitorError::Unrecognized { status: 503, .. }
        ));
        assert_eq!(
            err.to_string(),
            "The /create_workflow response code 503 is not recognized."
        );
        assert!(logs.is_empty(), "{logs}");
        assert!(
            ResponseClassifier::new(true)
                .classify(200, "/create_workflow")
                .is_ok()
        );
    }
}
