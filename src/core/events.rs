/// Shell notifications
///
/// Fire-and-forget events other parts of the app listen for.

use std::time::Duration;
use tokio::sync::broadcast;

/// Path the preview server "opens"
pub const PREVIEW_PATH: &str = "/frontend/preview";

/// Delay between `npm run dev` and the navigation request
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(500);

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// A guestbook comment was stored; commit log views should refetch
    CommitRecorded,
    /// Request to open a route
    Navigate(String),
}

/// Broadcast sender shared by the interpreter and its tasks
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ShellEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.sender.subscribe()
    }

    /// Send an event; nobody listening is fine
    pub fn emit(&self, event: ShellEvent) {
        if self.sender.send(event.clone()).is_err() {
            tracing::debug!("No listeners for {:?}", event);
        }
    }

    /// Emit `Navigate(path)` after `delay`
    ///
    /// Outside a Tokio runtime the request is sent right away.
    pub fn navigate_after(&self, path: &str, delay: Duration) {
        let event = ShellEvent::Navigate(path.to_string());

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let bus = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    bus.emit(event);
                });
            }
            Err(_) => self.emit(event),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_subscribers() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(ShellEvent::CommitRecorded);
        assert_eq!(rx.recv().await.unwrap(), ShellEvent::CommitRecorded);
    }

    #[tokio::test]
    async fn test_navigation_is_delayed() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.navigate_after(PREVIEW_PATH, Duration::from_millis(50));
        assert!(rx.try_recv().is_err());

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event, ShellEvent::Navigate(PREVIEW_PATH.to_string()));
    }

    #[test]
    fn test_navigation_without_runtime() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.navigate_after(PREVIEW_PATH, NAVIGATION_DELAY);
        assert_eq!(
            rx.try_recv().unwrap(),
            ShellEvent::Navigate(PREVIEW_PATH.to_string())
        );
    }
}
