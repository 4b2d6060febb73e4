//! Protocol-to-Application ingestion layer.
//!
//! The [`Bridge`] runs the [`ChatService`] sync loop on its own task and adapts
//! its output to the application event stream.
//!
//! # Responsibilities
//!
//! - Threads the `next_batch` token from one sync call into the next.
//! - Translates each [`ProtocolEvent`] into an [`AppEvent`] and delivers it to
//!   the runtime inbox, in the order the sync response listed them.
//! - Retries failed syncs forever with exponential backoff.
//! - Queues outbound sends to a single sender task, so the UI loop never
//!   waits on the network and sends reach the service in submit order.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::AbortHandle};
use trellis_client::{ChatService, ProtocolEvent, RoomId};

use crate::AppEvent;

/// Retry policy for the sync loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Delay after the first consecutive failure. Zero retries immediately.
    pub initial_backoff: Duration,
    /// Upper bound on the delay.
    pub max_backoff: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { initial_backoff: Duration::from_secs(1), max_backoff: Duration::from_secs(30) }
    }
}

impl SyncConfig {
    /// Delay before the next attempt after `failures` consecutive failures.
    pub fn backoff(&self, failures: u32) -> Duration {
        if failures == 0 {
            return Duration::ZERO;
        }
        let exponent = (failures - 1).min(16);
        self.initial_backoff.saturating_mul(1 << exponent).min(self.max_backoff)
    }
}

/// Translate a protocol event into its application event.
pub fn translate(event: ProtocolEvent) -> AppEvent {
    match event {
        ProtocolEvent::Message(m) => AppEvent::Message {
            room_id: m.room_id,
            sender: m.sender_id,
            timestamp: m.timestamp_unix,
            body: m.body,
        },
        ProtocolEvent::RoomRename(r) => AppEvent::Room { room_id: r.room_id, name: r.name },
    }
}

/// Bridge between the chat service and the App inbox.
///
/// Dropping the bridge abandons the sync loop. Sends already queued are
/// still attempted; the sender task exits once the queue is drained.
pub struct Bridge<S: ChatService> {
    outbox: mpsc::UnboundedSender<(RoomId, String)>,
    sync_task: AbortHandle,
    _service: PhantomData<fn() -> S>,
}

impl<S: ChatService> Bridge<S> {
    /// Start the sync loop. Must be called within a tokio runtime.
    pub fn spawn(
        service: Arc<S>,
        inbox: mpsc::UnboundedSender<AppEvent>,
        config: SyncConfig,
    ) -> Self {
        let (outbox, queue) = mpsc::unbounded_channel();
        tokio::spawn(run_send_loop(Arc::clone(&service), queue, inbox.clone()));
        let sync_task = tokio::spawn(run_sync_loop(service, inbox, config));

        Self { outbox, sync_task: sync_task.abort_handle(), _service: PhantomData }
    }

    /// Queue a text message without waiting for the result.
    ///
    /// Messages are sent one at a time in queue order. Failures are logged
    /// and reported to the inbox as [`AppEvent::Error`].
    pub fn send_text(&self, room_id: RoomId, body: String) {
        if self.outbox.send((room_id, body)).is_err() {
            tracing::warn!("Sender task gone, dropping message");
        }
    }

    /// Whether the sync loop is still running.
    pub fn is_running(&self) -> bool {
        !self.sync_task.is_finished()
    }

    /// Abort the sync loop.
    pub fn stop(&self) {
        self.sync_task.abort();
    }
}

impl<S: ChatService> Drop for Bridge<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_send_loop<S: ChatService>(
    service: Arc<S>,
    mut queue: mpsc::UnboundedReceiver<(RoomId, String)>,
    inbox: mpsc::UnboundedSender<AppEvent>,
) {
    while let Some((room_id, body)) = queue.recv().await {
        if let Err(e) = service.send_text(&room_id, &body).await {
            tracing::warn!(%room_id, error = %e, "Send failed");
            let message = format!("send to {room_id} failed: {e}");
            let _ = inbox.send(AppEvent::Error { message });
        }
    }
}

async fn run_sync_loop<S: ChatService>(
    service: Arc<S>,
    inbox: mpsc::UnboundedSender<AppEvent>,
    config: SyncConfig,
) {
    let mut since: Option<String> = None;
    let mut failures: u32 = 0;

    loop {
        match service.sync(since.as_deref()).await {
            Ok(batch) => {
                failures = 0;
                let count = batch.events.len();
                for event in batch.events {
                    if inbox.send(translate(event)).is_err() {
                        tracing::info!("Inbox closed, stopping sync loop");
                        return;
                    }
                }
                tracing::debug!(count, next_batch = %batch.next_batch, "Sync batch delivered");
                since = Some(batch.next_batch);
            },
            Err(e) => {
                if inbox.is_closed() {
                    tracing::info!("Inbox closed, stopping sync loop");
                    return;
                }
                failures = failures.saturating_add(1);
                let delay = config.backoff(failures);
                tracing::warn!(error = %e, failures, ?delay, "Sync failed, retrying");
                if delay.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::time::sleep(delay).await;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex};

    use tokio::time::Instant;
    use trellis_client::{ClientError, MessageEvent, RoomRenameEvent, SyncBatch};

    use super::*;

    /// Scripted service: replays `syncs` in order, then blocks like an idle
    /// long-poll.
    #[derive(Default)]
    struct ScriptedService {
        syncs: Mutex<VecDeque<Result<SyncBatch, ClientError>>>,
        calls: Mutex<Vec<(Option<String>, Instant)>>,
        sent: Mutex<Vec<String>>,
        fail_sends: bool,
        /// Body whose send takes longer than the rest.
        slow_send: Option<&'static str>,
    }

    impl ScriptedService {
        fn new(syncs: Vec<Result<SyncBatch, ClientError>>) -> Self {
            Self { syncs: Mutex::new(syncs.into()), ..Self::default() }
        }

        fn calls(&self) -> Vec<(Option<String>, Instant)> {
            self.calls.lock().unwrap().clone()
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl ChatService for ScriptedService {
        async fn sync(&self, since: Option<&str>) -> Result<SyncBatch, ClientError> {
            self.calls.lock().unwrap().push((since.map(str::to_owned), Instant::now()));
            let next = self.syncs.lock().unwrap().pop_front();
            match next {
                Some(result) => result,
                None => std::future::pending().await,
            }
        }

        async fn send_text(&self, _room_id: &str, body: &str) -> Result<(), ClientError> {
            let latency = if self.slow_send == Some(body) { 50 } else { 5 };
            tokio::time::sleep(Duration::from_millis(latency)).await;
            if self.fail_sends {
                return Err(ClientError::Http("connection reset".into()));
            }
            self.sent.lock().unwrap().push(body.to_owned());
            Ok(())
        }
    }

    fn message(room: &str, body: &str) -> ProtocolEvent {
        ProtocolEvent::Message(MessageEvent {
            room_id: room.into(),
            sender_id: "@a:hs".into(),
            timestamp_unix: 7,
            body: body.into(),
        })
    }

    fn rename(room: &str, name: &str) -> ProtocolEvent {
        ProtocolEvent::RoomRename(RoomRenameEvent { room_id: room.into(), name: name.into() })
    }

    fn batch(next: &str, events: Vec<ProtocolEvent>) -> Result<SyncBatch, ClientError> {
        Ok(SyncBatch { next_batch: next.into(), events })
    }

    fn failure() -> Result<SyncBatch, ClientError> {
        Err(ClientError::Status { status: 502, body: String::new() })
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let config = SyncConfig::default();

        assert_eq!(config.backoff(0), Duration::ZERO);
        assert_eq!(config.backoff(1), Duration::from_secs(1));
        assert_eq!(config.backoff(2), Duration::from_secs(2));
        assert_eq!(config.backoff(3), Duration::from_secs(4));
        assert_eq!(config.backoff(10), Duration::from_secs(30));
        assert_eq!(config.backoff(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn zero_initial_backoff_retries_immediately() {
        let config = SyncConfig { initial_backoff: Duration::ZERO, max_backoff: Duration::from_secs(5) };
        assert_eq!(config.backoff(7), Duration::ZERO);
    }

    #[test]
    fn translate_maps_both_shapes() {
        assert_eq!(translate(message("!r1", "hi")), AppEvent::Message {
            room_id: "!r1".into(),
            sender: "@a:hs".into(),
            timestamp: 7,
            body: "hi".into(),
        });
        assert_eq!(translate(rename("!r1", "general")), AppEvent::Room {
            room_id: "!r1".into(),
            name: "general".into(),
        });
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_in_order_and_threads_token() {
        let service = Arc::new(ScriptedService::new(vec![
            batch("s1", vec![rename("!r1", "general"), message("!r1", "one")]),
            batch("s2", vec![message("!r1", "two")]),
        ]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _bridge = Bridge::spawn(Arc::clone(&service), tx, SyncConfig::default());

        let mut received = Vec::new();
        for _ in 0..3 {
            received.push(rx.recv().await.unwrap());
        }
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert!(matches!(&received[0], AppEvent::Room { name, .. } if name == "general"));
        assert!(matches!(&received[1], AppEvent::Message { body, .. } if body == "one"));
        assert!(matches!(&received[2], AppEvent::Message { body, .. } if body == "two"));

        let sinces: Vec<_> = service.calls().into_iter().map(|(since, _)| since).collect();
        assert_eq!(sinces, vec![None, Some("s1".into()), Some("s2".into())]);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_back_off_then_recover() {
        let service = Arc::new(ScriptedService::new(vec![
            failure(),
            failure(),
            batch("s1", vec![message("!r1", "after")]),
        ]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _bridge = Bridge::spawn(Arc::clone(&service), tx, SyncConfig::default());

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::Message { body, .. } if body == "after"));

        let calls = service.calls();
        assert!(calls.len() >= 3);
        assert!(calls[1].1 - calls[0].1 >= Duration::from_secs(1));
        assert!(calls[2].1 - calls[1].1 >= Duration::from_secs(2));
        // Failed attempts do not advance the token.
        assert!(calls[..3].iter().all(|(since, _)| since.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_inbox_closed() {
        let service = Arc::new(ScriptedService::new(vec![
            batch("s1", vec![message("!r1", "one")]),
            batch("s2", vec![message("!r1", "two")]),
        ]));
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let bridge = Bridge::spawn(Arc::clone(&service), tx, SyncConfig::default());

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(!bridge.is_running());
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_aborts_sync_loop() {
        let service = Arc::new(ScriptedService::new(vec![]));
        let (tx, _rx) = mpsc::unbounded_channel();
        let bridge = Bridge::spawn(service, tx, SyncConfig::default());
        tokio::task::yield_now().await;
        assert!(bridge.is_running());

        bridge.stop();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(!bridge.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn send_failure_reported_to_inbox() {
        let service = Arc::new(ScriptedService { fail_sends: true, ..ScriptedService::default() });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = Bridge::spawn(service, tx, SyncConfig::default());

        bridge.send_text("!r1".into(), "hello".into());

        match rx.recv().await.unwrap() {
            AppEvent::Error { message } => assert!(message.contains("!r1")),
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sends_delivered_in_submit_order() {
        let service =
            Arc::new(ScriptedService { slow_send: Some("first"), ..ScriptedService::default() });
        let (tx, _rx) = mpsc::unbounded_channel();
        let bridge = Bridge::spawn(Arc::clone(&service), tx, SyncConfig::default());

        bridge.send_text("!r1".into(), "first".into());
        bridge.send_text("!r1".into(), "second".into());
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(service.sent(), vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn queued_sends_survive_stop() {
        let service = Arc::new(ScriptedService::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let bridge = Bridge::spawn(Arc::clone(&service), tx, SyncConfig::default());

        bridge.send_text("!r1".into(), "bye".into());
        bridge.stop();
        drop(bridge);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(service.sent(), vec!["bye"]);
    }
}
