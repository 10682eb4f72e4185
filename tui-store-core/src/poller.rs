//! Terminal event polling on a background task

use std::time::Duration;

use crossterm::event;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::event::EventKind;

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
}

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
    /// Upper bound on events read per cycle.
    pub max_batch: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
            max_batch: 20,
        }
    }
}

/// Spawn the event polling task with cancellation support
///
/// Polls crossterm for key and resize events and sends them through `tx`.
/// The task stops when the token is cancelled or the receiver is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    let mut processed = 0;
                    while processed < config.max_batch
                        && event::poll(config.poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            Ok(_) => continue,
                            Err(err) => {
                                debug!(error = %err, "Failed to read terminal event");
                                continue;
                            }
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an EventKind
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::key;

    #[test]
    fn test_process_raw_event() {
        let k = key("enter");
        assert_eq!(process_raw_event(RawEvent::Key(k)), EventKind::Key(k));
        assert_eq!(
            process_raw_event(RawEvent::Resize(80, 24)),
            EventKind::Resize(80, 24)
        );
    }

    #[test]
    fn test_default_config() {
        let config = PollerConfig::default();
        assert!(config.poll_timeout < config.loop_sleep);
        assert!(config.max_batch > 0);
    }
}
