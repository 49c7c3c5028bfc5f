//! Live setlist tracking: a bounded polling loop bound to one message slot.
//!
//! At most one session runs at a time. The loop polls the resolver at a fixed
//! cadence, overwriting a single status message each tick, and winds down on
//! cancellation or when the session ceiling is reached. Ticks are strictly
//! sequential, so message edits never interleave.

use crate::api::client::RecordSource;
use crate::setlist::{NormalizedShow, ShowResolver};
use async_trait::async_trait;
use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Content for the tracked status message.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveUpdate {
    /// A resolved show, refreshed while the session is live.
    Live(NormalizedShow),
    /// Nothing resolved for the tracked date yet; the loop will retry.
    Waiting { date: String },
    /// Final state of the tracked message once the session ends. Carries the
    /// last show seen during the session, if any.
    Closing(Option<NormalizedShow>),
}

/// One chat-platform message slot plus a channel for standalone notices.
///
/// Implemented by the chat collaborator (or the CLI). The tracker only ever
/// overwrites the single slot.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Overwrite the tracked status message.
    async fn replace(&self, update: LiveUpdate) -> anyhow::Result<()>;

    /// Post a separate one-off notice to the bound channel.
    async fn announce(&self, text: &str) -> anyhow::Result<()>;
}

/// Tick cadence and session ceiling. Injectable so tests can run the whole
/// session lifecycle in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct LiveTiming {
    pub tick_interval: Duration,
    pub session_ceiling: Duration,
}

impl Default for LiveTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(300),
            // long enough to cover a two-set show plus encore
            session_ceiling: Duration::from_secs(3 * 3600 + 1800),
        }
    }
}

/// Acknowledgment returned by `start` and `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerAck {
    Started,
    AlreadyRunning,
    Stopped,
    NotRunning,
}

impl TrackerAck {
    /// User-facing acknowledgment text.
    pub fn message(&self) -> &'static str {
        match self {
            TrackerAck::Started => "Live setlist tracking has started.",
            TrackerAck::AlreadyRunning => "Live setlist tracking is already in progress.",
            TrackerAck::Stopped => "Live setlist tracking has been stopped.",
            TrackerAck::NotRunning => "Live setlist tracking is not active.",
        }
    }
}

struct Session {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Live session controller with `Idle -> Running -> Idle` lifecycle.
///
/// `running` is the only state shared with the loop; the loop reads it at
/// tick boundaries and `stop` clears it before requesting cancellation, so no
/// further locking is needed.
pub struct LiveTracker<S> {
    resolver: Arc<ShowResolver<S>>,
    sink: Arc<dyn MessageSink>,
    timing: LiveTiming,
    running: Arc<AtomicBool>,
    session: Mutex<Option<Session>>,
}

impl<S: RecordSource + 'static> LiveTracker<S> {
    pub fn new(resolver: Arc<ShowResolver<S>>, sink: Arc<dyn MessageSink>) -> Self {
        Self::with_timing(resolver, sink, LiveTiming::default())
    }

    pub fn with_timing(
        resolver: Arc<ShowResolver<S>>,
        sink: Arc<dyn MessageSink>,
        timing: LiveTiming,
    ) -> Self {
        Self {
            resolver,
            sink,
            timing,
            running: Arc::new(AtomicBool::new(false)),
            session: Mutex::new(None),
        }
    }

    /// True while a session loop is active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start a session for today's date. No-op if one is already running.
    ///
    /// The date is captured once here; a show that runs past midnight keeps
    /// tracking the date it started on. The loop runs detached and is not
    /// awaited by the caller.
    pub async fn start(&self) -> TrackerAck {
        let mut session = self.session.lock().await;
        if self.running.load(Ordering::SeqCst) {
            return TrackerAck::AlreadyRunning;
        }
        self.running.store(true, Ordering::SeqCst);

        let date = Local::now().format("%Y-%m-%d").to_string();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_session(
            Arc::clone(&self.resolver),
            Arc::clone(&self.sink),
            self.timing,
            Arc::clone(&self.running),
            cancel.clone(),
            date,
        ));

        *session = Some(Session { cancel, handle });
        TrackerAck::Started
    }

    /// Stop the running session and wait for its loop to wind down.
    ///
    /// Cancellation is cooperative: the loop observes it at the next tick
    /// boundary, performs its final render, and only then does this return.
    pub async fn stop(&self) -> TrackerAck {
        let mut session = self.session.lock().await;
        let was_running = self.running.swap(false, Ordering::SeqCst);
        let Some(Session { cancel, handle }) = session.take() else {
            return TrackerAck::NotRunning;
        };

        cancel.cancel();
        if let Err(err) = handle.await {
            tracing::error!(error = %err, "Live session task failed to join cleanly");
        }

        if was_running {
            TrackerAck::Stopped
        } else {
            // The loop already wound down on its own (session ceiling).
            TrackerAck::NotRunning
        }
    }
}

async fn run_session<S: RecordSource>(
    resolver: Arc<ShowResolver<S>>,
    sink: Arc<dyn MessageSink>,
    timing: LiveTiming,
    running: Arc<AtomicBool>,
    cancel: CancellationToken,
    date: String,
) {
    tracing::info!(date = %date, "Live setlist tracking started");
    let started = tokio::time::Instant::now();
    let mut last_shown: Option<NormalizedShow> = None;

    while running.load(Ordering::SeqCst)
        && !cancel.is_cancelled()
        && started.elapsed() < timing.session_ceiling
    {
        // A failed tick is logged and retried at the same cadence; nothing
        // short of cancellation or the ceiling ends the loop.
        match resolver.resolve(&date).await {
            Some(show) => {
                last_shown = Some(show.clone());
                if let Err(err) = sink.replace(LiveUpdate::Live(show)).await {
                    tracing::warn!(date = %date, error = %err, "Live message update failed");
                }
            }
            None => {
                if let Err(err) = sink
                    .replace(LiveUpdate::Waiting { date: date.clone() })
                    .await
                {
                    tracing::warn!(date = %date, error = %err, "Waiting notice update failed");
                }
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(timing.tick_interval) => {}
        }
    }

    // Final render without the live tag, then the terminal notice. Errors
    // here are only logged; the session is over either way.
    if let Err(err) = sink.replace(LiveUpdate::Closing(last_shown)).await {
        tracing::warn!(date = %date, error = %err, "Final live message render failed");
    }
    if let Err(err) = sink.announce("Live setlist tracking has ended.").await {
        tracing::warn!(date = %date, error = %err, "Terminal notice failed");
    }

    running.store(false, Ordering::SeqCst);
    tracing::info!(date = %date, "Live setlist tracking ended");
}
