//! Log event input
//!
//! Reads newline-delimited JSON log events and hands them, in order, to a
//! [`LogHandler`].

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;
use wms_client::LogHandler;
use wms_core::domain::event::LogEvent;

/// Forward every event from `reader` to `handler`
///
/// Blank lines are skipped. The first line that is not a JSON object, or the
/// first handler failure, stops forwarding.
///
/// # Returns
/// The number of events forwarded
pub async fn forward_events<R>(reader: R, handler: &dyn LogHandler) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_number = 0;
    let mut forwarded = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read log events")? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: LogEvent = serde_json::from_str(line)
            .with_context(|| format!("Line {} is not a JSON log event", line_number))?;

        debug!("Forwarding event from line {}", line_number);
        handler.handle(event).await?;
        forwarded += 1;
    }

    Ok(forwarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wms_client::MonitorError;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<LogEvent>>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl LogHandler for RecordingHandler {
        async fn handle(&self, event: LogEvent) -> wms_client::Result<()> {
            let mut events = self.events.lock().unwrap();
            if self.fail_after == Some(events.len()) {
                return Err(MonitorError::Unauthorized {
                    endpoint: "/update_workflow_status".to_string(),
                });
            }
            events.push(event);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_forwards_events_in_order() {
        let input = b"{\"msg\": \"first\"}\n\n{\"job\": \"align\", \"msg\": \"second\"}\n";
        let handler = RecordingHandler::default();

        let forwarded = forward_events(&input[..], &handler).await.unwrap();

        assert_eq!(forwarded, 2);
        let events = handler.events.lock().unwrap();
        assert_eq!(events[0].normalize().unwrap(), r#"{"msg":"first"}"#);
        assert_eq!(events[1].job().unwrap().name, "align");
    }

    #[tokio::test]
    async fn test_rejects_non_object_line() {
        let input = b"{\"msg\": \"ok\"}\n[1, 2]\n{\"msg\": \"never\"}\n";
        let handler = RecordingHandler::default();

        let err = forward_events(&input[..], &handler).await.unwrap_err();

        assert!(err.to_string().contains("Line 2"));
        assert_eq!(handler.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stops_on_handler_failure() {
        let input = b"{\"a\": 1}\n{\"b\": 2}\n{\"c\": 3}\n";
        let handler = RecordingHandler {
            fail_after: Some(1),
            ..Default::default()
        };

        let err = forward_events(&input[..], &handler).await.unwrap_err();

        let monitor_err = err.downcast_ref::<MonitorError>().unwrap();
        assert!(matches!(monitor_err, MonitorError::Unauthorized { .. }));
        assert_eq!(monitor_err.exit_code(), 1);
        assert_eq!(handler.events.lock().unwrap().len(), 1);
    }
}
