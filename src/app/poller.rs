use super::events::AppEvent;
use crate::player::{PlaybackService, ServiceResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use crate::player::PollSnapshot;

pub fn poll_once(service: &dyn PlaybackService) -> ServiceResult<PollSnapshot> {
    service.snapshot()
}

/// Poll the service every `interval` until the event loop goes away.
///
/// A failing service is reported once per outage rather than on every tick.
pub fn spawn_poller(
    service: Arc<dyn PlaybackService>,
    tx: mpsc::Sender<AppEvent>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut failing = false;
        loop {
            let service_ref = service.clone();
            let result = tokio::task::spawn_blocking(move || poll_once(service_ref.as_ref())).await;

            let event = match result {
                Ok(Ok(snapshot)) => {
                    if failing {
                        tracing::info!("status poll recovered");
                        failing = false;
                    }
                    Some(AppEvent::Poll(snapshot))
                }
                Ok(Err(e)) if !failing => {
                    failing = true;
                    Some(AppEvent::PollFailed(e.to_string()))
                }
                Ok(Err(_)) => None,
                Err(e) => Some(AppEvent::PollFailed(e.to_string())),
            };

            if let Some(event) = event {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            tokio::time::sleep(interval).await;
        }
    })
}
