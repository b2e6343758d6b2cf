//! Transient success/error feedback.
//!
//! The presenter shows one notification at a time and owns at most one timer:
//!
//! ```text
//!            show()                    10 s
//! Hidden ───────────► Shown ──────────────────► Hidden
//!                       │ hide()
//!                       ▼            500 ms
//!                     Hiding ─────────────────► Hidden
//! ```
//!
//! Calling [`NotificationPresenter::show`] while a notification is up replaces
//! it and restarts the 10 s countdown; the previous timer is cancelled, never
//! left to fire later.  Last call wins.
//!
//! Timers are Tokio tasks, so `show` and `hide` must be called from inside a
//! Tokio runtime.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long a notification stays up on its own.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(10);

/// How long the hide transition lasts.
pub const HIDE_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        write!(f, "[{label}] {}", self.text)
    }
}

/// Where the notification is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Shown,
    Hiding,
}

#[derive(Debug)]
struct State {
    phase: Phase,
    current: Option<Notification>,
    deadline: Option<Instant>,
    /// Bumped on every show/hide; a timer only acts if it still matches.
    generation: u64,
}

/// Shows notifications and dismisses them on a timer.
#[derive(Debug)]
pub struct NotificationPresenter {
    state: Arc<Mutex<State>>,
    timer: Option<JoinHandle<()>>,
}

impl Default for NotificationPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPresenter {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                phase: Phase::Hidden,
                current: None,
                deadline: None,
                generation: 0,
            })),
            timer: None,
        }
    }

    /// Shows `text` and arms the auto-dismiss timer.
    pub fn show(&mut self, text: impl Into<String>, kind: NotificationKind) {
        self.cancel_timer();
        let notification = Notification {
            text: text.into(),
            kind,
        };
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.phase = Phase::Shown;
            state.current = Some(notification);
            state.deadline = Some(Instant::now() + DISPLAY_DURATION);
            state.generation
        };
        self.timer = Some(self.arm(DISPLAY_DURATION, generation));
    }

    /// Starts hiding the notification now.
    pub fn hide(&mut self) {
        self.cancel_timer();
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.phase = Phase::Hiding;
            state.deadline = Some(Instant::now() + HIDE_DURATION);
            state.generation
        };
        self.timer = Some(self.arm(HIDE_DURATION, generation));
    }

    pub fn phase(&self) -> Phase {
        lock(&self.state).phase
    }

    /// The notification on screen, if any.
    ///
    /// Returns `None` once the notification has started hiding.
    pub fn current(&self) -> Option<Notification> {
        let state = lock(&self.state);
        match state.phase {
            Phase::Shown => state.current.clone(),
            Phase::Hidden | Phase::Hiding => None,
        }
    }

    /// The most recently shown notification, whether or not it is still up.
    pub fn last(&self) -> Option<Notification> {
        lock(&self.state).current.clone()
    }

    /// When the pending timer fires.
    pub fn deadline(&self) -> Option<Instant> {
        lock(&self.state).deadline
    }

    pub fn has_pending_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Spawns the single timer; it moves to `Hidden` after `delay`.
    fn arm(&self, delay: Duration, generation: u64) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            if state.generation == generation {
                state.phase = Phase::Hidden;
                state.deadline = None;
            }
        })
    }
}

impl Drop for NotificationPresenter {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// Locks the state, recovering it if a timer task panicked while holding it.
fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
