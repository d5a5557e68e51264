//! Long-polling update loop

use super::TelegramClient;
use crate::controller::SessionController;
use crate::store::KvStore;
use crate::transport::Transport;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Pause after a failed poll before asking again
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

pub struct UpdatePoller {
    client: Arc<TelegramClient>,
    timeout: Duration,
    /// Next `update_id` to request
    offset: Option<i64>,
}

impl UpdatePoller {
    pub fn new(client: Arc<TelegramClient>, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            offset: None,
        }
    }

    /// Poll until `shutdown` fires, running each event on its own task.
    /// In-flight events are allowed to finish before this returns.
    pub async fn run<K, T>(mut self, controller: Arc<SessionController<K, T>>, shutdown: CancellationToken)
    where
        K: KvStore + 'static,
        T: Transport + 'static,
    {
        let tasks = TaskTracker::new();
        tracing::info!("Polling for updates");

        loop {
            let polled = tokio::select! {
                () = shutdown.cancelled() => break,
                polled = self.client.get_updates(self.offset, self.timeout) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        self.offset = Some(update.update_id + 1);
                        let Some(inbound) = update.into_inbound() else {
                            continue;
                        };
                        tracing::debug!(chat_id = %inbound.chat_id(), kind = inbound.kind(), "Update received");
                        let controller = Arc::clone(&controller);
                        tasks.spawn(async move {
                            controller.dispatch(inbound).await;
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Polling for updates failed");
                    tokio::select! {
                        () = shutdown.cancelled() => break,
                        () = tokio::time::sleep(POLL_RETRY_DELAY) => {}
                    }
                }
            }
        }

        tasks.close();
        tracing::info!(in_flight = tasks.len(), "Waiting for in-flight events");
        tasks.wait().await;
        tracing::info!("Update polling stopped");
    }
}
