//! Observable per-instance progress logs.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// The ordered list of states a flow instance has passed through.
///
/// Clones share the same log. Observers either read it with [`log`] or
/// [`subscribe`] to be woken on every transition.
///
/// [`log`]: ProgressTracker::log
/// [`subscribe`]: ProgressTracker::subscribe
#[derive(Clone)]
pub struct ProgressTracker<S> {
    flow: &'static str,
    log: Arc<watch::Sender<Vec<S>>>,
}

impl<S> ProgressTracker<S>
where
    S: Clone + fmt::Debug + PartialEq + Send + Sync,
{
    pub fn new(flow: &'static str, initial: S) -> Self {
        let (log, _) = watch::channel(vec![initial]);
        Self {
            flow,
            log: Arc::new(log),
        }
    }

    /// Append `state`, unless it is already the current one.
    pub fn set(&self, state: S) {
        tracing::debug!(flow = self.flow, state = ?state, "progress");
        self.log.send_modify(|log| {
            if log.last() != Some(&state) {
                log.push(state);
            }
        });
    }

    pub fn current(&self) -> Option<S> {
        self.log.borrow().last().cloned()
    }

    pub fn log(&self) -> Vec<S> {
        self.log.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<S>> {
        self.log.subscribe()
    }
}

impl<S: fmt::Debug> fmt::Debug for ProgressTracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("flow", &self.flow)
            .field("log", &*self.log.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Step {
        One,
        Two,
    }

    #[test]
    fn log_records_transitions_once() {
        let tracker = ProgressTracker::new("test", Step::One);
        let observer = tracker.clone();
        tracker.set(Step::Two);
        tracker.set(Step::Two);
        assert_eq!(observer.log(), vec![Step::One, Step::Two]);
        assert_eq!(observer.current(), Some(Step::Two));
    }

    #[tokio::test]
    async fn subscribers_are_woken() {
        let tracker = ProgressTracker::new("test", Step::One);
        let mut rx = tracker.subscribe();
        tracker.set(Step::Two);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().last(), Some(&Step::Two));
    }
}
