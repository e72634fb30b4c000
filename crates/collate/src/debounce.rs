//! Cooperative debouncing for configuration values.
//!
//! The search engine must not re-scan the collection on every keystroke, so
//! it reads its query through a [`Debouncer`]: a committed value plus an
//! optional pending value that becomes committed once a quiescence window
//! has elapsed with no further changes.
//!
//! There are no threads or timers here. The caller drives the clock by
//! passing `Instant`s to [`submit`](Debouncer::submit) and
//! [`poll`](Debouncer::poll), which keeps the model single-threaded and
//! makes the window fully testable.

use std::time::{Duration, Instant};

/// Default quiescence window.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// A value that settles after a quiescence window.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use collate::Debouncer;
///
/// let mut query = Debouncer::with_window(String::new(), Duration::from_millis(150));
/// let start = Instant::now();
///
/// query.submit("al".to_string(), start);
/// query.submit("alice".to_string(), start + Duration::from_millis(100));
///
/// // The first keystroke's window was superseded
/// assert!(!query.poll(start + Duration::from_millis(200)));
/// assert_eq!(query.value(), "");
///
/// // 150ms after the last change, the query settles
/// assert!(query.poll(start + Duration::from_millis(250)));
/// assert_eq!(query.value(), "alice");
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    committed: T,
    pending: Option<Pending<T>>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Creates a debouncer with the default 150ms window.
    pub fn new(initial: T) -> Self {
        Debouncer::with_window(initial, DEBOUNCE_WINDOW)
    }

    /// Creates a debouncer with a custom quiescence window.
    pub fn with_window(initial: T, window: Duration) -> Self {
        Debouncer {
            window,
            committed: initial,
            pending: None,
        }
    }

    /// The committed value.
    pub fn value(&self) -> &T {
        &self.committed
    }

    /// Returns `true` if a change is waiting out its window.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Observes a new value, resetting the quiescence window.
    ///
    /// Submitting the value already observed most recently (pending if one
    /// exists, committed otherwise) is a no-op and does not reset the
    /// window.
    pub fn submit(&mut self, value: T, now: Instant) {
        let latest = self
            .pending
            .as_ref()
            .map(|p| &p.value)
            .unwrap_or(&self.committed);
        if *latest == value {
            return;
        }
        self.pending = Some(Pending {
            value,
            deadline: now + self.window,
        });
    }

    /// Commits the pending value if its window has elapsed.
    ///
    /// Returns `true` if a commit happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = matches!(&self.pending, Some(p) if now >= p.deadline);
        if due {
            if let Some(pending) = self.pending.take() {
                self.committed = pending.value;
            }
        }
        due
    }

    /// Commits the pending value immediately, window or not.
    ///
    /// Returns `true` if a commit happened.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.committed = pending.value;
                true
            }
            None => false,
        }
    }

    /// Drops the pending value so a later poll is a no-op.
    ///
    /// This is the teardown path: once cancelled, nothing a stale clock
    /// tick can do will mutate the committed value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
