// ── Command dispatch ──
//
// Sends a `Command` to the service and reports the outcome through the
// notification sink. Commands never touch the snapshot store: refreshed
// state arrives with the next poll tick.

use std::sync::Arc;
use std::time::Duration;

use overseer_api::SkynetClient;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{Command, Notice};
use crate::error::CoreError;
use crate::notify::{Notification, NotificationSink};

/// Fire-and-forget command sender.
///
/// Cheap to clone. Each dispatched command runs in its own task, so
/// concurrent commands proceed independently and are never retried.
#[derive(Clone)]
pub struct CommandDispatcher {
    client: SkynetClient,
    sink: Arc<dyn NotificationSink>,
    ttl: Duration,
}

impl CommandDispatcher {
    pub fn new(client: SkynetClient, sink: Arc<dyn NotificationSink>, ttl: Duration) -> Self {
        Self { client, sink, ttl }
    }

    /// Spawn the command in the background and return immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            // Outcome already notified and logged.
            let _ = this.execute(command).await;
        })
    }

    /// Send the command and wait for the service's answer.
    ///
    /// Notifies the sink either way (except for failures that have no
    /// failure notice) and hands the result back for callers that need it.
    pub async fn execute(&self, command: Command) -> Result<(), CoreError> {
        let path = command.path();
        let payload = command.payload();
        debug!(
            command = command.name(),
            target = command.target_id(),
            method = %command.method(),
            "dispatching command"
        );

        match self
            .client
            .operation(command.method(), &path, payload.as_ref())
            .await
        {
            Ok(()) => {
                let Notice { title, message } = command.success_notice();
                self.sink.notify(Notification::success(title, message).with_ttl(self.ttl));
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(
                    command = command.name(),
                    target = command.target_id(),
                    error = %err,
                    "command failed"
                );
                if let Some(Notice { title, message }) = command.failure_notice() {
                    self.sink.notify(Notification::error(title, message).with_ttl(self.ttl));
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use overseer_api::TransportConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::sync::mpsc;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::command::{CANCEL_FAILED, CHANGE_CONFIRMED, PRINT_CANCELED, PRINTER_TOGGLED};
    use crate::notify::Severity;

    async fn setup() -> (
        MockServer,
        CommandDispatcher,
        mpsc::UnboundedReceiver<Notification>,
    ) {
        let server = MockServer::start().await;
        let base = Url::parse(&format!("{}/skynet/", server.uri())).unwrap();
        let client = SkynetClient::new(base, &TransportConfig::default()).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = CommandDispatcher::new(client, Arc::new(tx), Duration::from_secs(10));
        (server, dispatcher, rx)
    }

    #[tokio::test]
    async fn filament_confirmation_notifies_success_once() {
        let (server, dispatcher, mut rx) = setup().await;
        Mock::given(method("PUT"))
            .and(path("/skynet/operations/confirm_filament_change/7/"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        dispatcher
            .execute(Command::ConfirmFilamentChange { printer_id: 7 })
            .await
            .unwrap();

        let n = rx.try_recv().unwrap();
        assert_eq!(n.severity, Severity::Success);
        assert_eq!(n.title, CHANGE_CONFIRMED);
        assert_eq!(n.message, "Printer ID: 7");
        assert_eq!(n.ttl, Duration::from_secs(10));
        assert!(rx.try_recv().is_err());

        // No list endpoint is touched by a command.
        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
    }

    #[tokio::test]
    async fn failed_filament_confirmation_is_only_logged() {
        let (server, dispatcher, mut rx) = setup().await;
        Mock::given(method("PUT"))
            .and(path("/skynet/operations/confirm_filament_change/7/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = dispatcher
            .execute(Command::ConfirmFilamentChange { printer_id: 7 })
            .await;

        assert!(result.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_cancel_notifies_error_once() {
        let (server, dispatcher, mut rx) = setup().await;
        Mock::given(method("GET"))
            .and(path("/skynet/operations/cancel_active_task/3/"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let result = dispatcher.execute(Command::CancelPrint { printer_id: 3 }).await;

        assert!(matches!(result, Err(CoreError::Api { status: Some(500), .. })));
        let n = rx.try_recv().unwrap();
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.title, PRINT_CANCELED);
        assert_eq!(n.message, CANCEL_FAILED);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn job_result_sends_success_flag() {
        let (server, dispatcher, mut rx) = setup().await;
        Mock::given(method("PUT"))
            .and(path("/skynet/operations/confirm_job_result/12/"))
            .and(body_json(json!({ "success": false })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        dispatcher
            .execute(Command::ConfirmJobResult {
                job_id: 12,
                success: false,
            })
            .await
            .unwrap();

        let n = rx.try_recv().unwrap();
        assert_eq!(n.title, PRINT_CANCELED);
        assert_eq!(n.message, "Printer ID: 12");
    }

    #[tokio::test]
    async fn dispatch_runs_in_background() {
        let (server, dispatcher, mut rx) = setup().await;
        Mock::given(method("GET"))
            .and(path("/skynet/operations/toggle_printer_en_dis/5/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        dispatcher
            .dispatch(Command::TogglePrinter { printer_id: 5 })
            .await
            .unwrap();

        let n = rx.recv().await.unwrap();
        assert_eq!(n.title, PRINTER_TOGGLED);
        assert_eq!(n.message, "Printer ID: 5");
    }
}
