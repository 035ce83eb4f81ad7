use crate::map_event;
use core_events::{
    CHANNEL_SEND_FAILURES, Event, InputEvent, KEYPRESS_TOTAL, PASTE_BYTES, PASTE_EVENTS,
};
use crossterm::event::{Event as CEvent, EventStream};
use std::io;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::{Notify, mpsc::Sender};
use tokio::task;
use tokio_stream::StreamExt;
use tracing::{info, trace, warn};

#[derive(Clone, Debug)]
pub struct AsyncInputShutdown {
    notify: Arc<Notify>,
}

impl AsyncInputShutdown {
    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

#[derive(Clone, Debug)]
struct ShutdownListener {
    notify: Arc<Notify>,
}

impl ShutdownListener {
    fn new_pair() -> (AsyncInputShutdown, Self) {
        let notify = Arc::new(Notify::new());
        (
            AsyncInputShutdown {
                notify: notify.clone(),
            },
            ShutdownListener { notify },
        )
    }

    async fn wait(&self) {
        self.notify.notified().await;
    }
}

/// Spawn the input task backed by `crossterm::EventStream`.
///
/// Returns the task handle alongside a shutdown handle that stops the task
/// without waiting for another terminal event.
pub fn spawn_async_input(sender: Sender<Event>) -> (task::JoinHandle<()>, AsyncInputShutdown) {
    let (shutdown, listener) = ShutdownListener::new_pair();
    let handle = task::spawn(async move {
        let span = tracing::debug_span!(target: "input", "input_async_task");
        let _enter = span.enter();
        InputTask::new(sender, EventStream::new(), listener)
            .run()
            .await;
    });
    (handle, shutdown)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitReason {
    ShutdownSignal,
    ChannelClosed,
    StreamEnded,
    StreamError,
}

impl ExitReason {
    fn as_str(&self) -> &'static str {
        match self {
            ExitReason::ShutdownSignal => "shutdown_signal",
            ExitReason::ChannelClosed => "channel_closed",
            ExitReason::StreamEnded => "stream_ended",
            ExitReason::StreamError => "stream_error",
        }
    }
}

struct InputTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    sender: Sender<Event>,
    stream: S,
    shutdown: ShutdownListener,
}

impl<S> InputTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    fn new(sender: Sender<Event>, stream: S, shutdown: ShutdownListener) -> Self {
        Self {
            sender,
            stream,
            shutdown,
        }
    }

    async fn run(mut self) -> ExitReason {
        info!(target: "input", "async_input_task_started");
        let reason = loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.wait() => break ExitReason::ShutdownSignal,
                next = self.stream.next() => next,
            };
            let event = match next {
                None => break ExitReason::StreamEnded,
                Some(Err(err)) => {
                    warn!(
                        target: "input",
                        error_kind = ?err.kind(),
                        "async_input_task_stream_error"
                    );
                    break ExitReason::StreamError;
                }
                Some(Ok(event)) => event,
            };
            let Some(mapped) = map_event(event) else {
                continue;
            };
            match &mapped {
                InputEvent::Key(key) => {
                    trace!(target: "input", code = ?key.code, mods = ?key.mods, "keypress");
                    KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
                }
                InputEvent::Paste(data) => {
                    PASTE_EVENTS.fetch_add(1, Ordering::Relaxed);
                    PASTE_BYTES.fetch_add(data.len() as u64, Ordering::Relaxed);
                }
                InputEvent::Resize(w, h) => trace!(target: "input", w, h, "resize"),
            }
            if self.sender.send(Event::Input(mapped)).await.is_err() {
                CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
                break ExitReason::ChannelClosed;
            }
        };
        info!(target: "input", reason = reason.as_str(), "async_input_task_stopped");
        reason
    }
}
