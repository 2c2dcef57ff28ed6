//! Cancellable timer tasks.
//!
//! A [`TimerSlot`] holds at most one pending task. Arming the slot aborts
//! whatever was pending first. Tasks publish through a `watch` channel whose
//! value carries an epoch; owners bump the epoch on every cancel, and
//! [`publish_if_current`] checks it under the channel's write lock, so a
//! task that was already running when it got cancelled cannot publish.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A value published by a timer task, stamped with the epoch it belongs to.
pub(crate) trait Stamped {
    fn epoch(&self) -> u64;
}

/// Apply `update` to the published value if `epoch` is still current.
///
/// Returns `false`, without notifying receivers, once the epoch is stale.
pub(crate) fn publish_if_current<T, F>(tx: &watch::Sender<T>, epoch: u64, update: F) -> bool
where
    T: Stamped,
    F: FnOnce(&mut T),
{
    tx.send_if_modified(|value| {
        if value.epoch() != epoch {
            return false;
        }
        update(value);
        true
    })
}

/// Holder for at most one pending timer task.
#[derive(Debug)]
pub(crate) struct TimerSlot {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl TimerSlot {
    pub(crate) fn new(name: &'static str) -> Self {
        Self { name, handle: None }
    }

    /// Cancel any pending task, then spawn `task` on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub(crate) fn arm<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        tracing::trace!(timer = self.name, "armed");
        self.handle = Some(tokio::spawn(task));
    }

    /// Abort the pending task. Returns `true` if one was still running.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    tracing::trace!(timer = self.name, "cancelled");
                }
                was_running
            }
            None => false,
        }
    }

    /// Whether a task is armed and has not finished.
    pub(crate) fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct Counter {
        epoch: u64,
        hits: u32,
    }

    impl Stamped for Counter {
        fn epoch(&self) -> u64 {
            self.epoch
        }
    }

    #[test]
    fn test_publish_rejects_stale_epoch() {
        let (tx, rx) = watch::channel(Counter::default());
        assert!(publish_if_current(&tx, 0, |c| c.hits += 1));
        tx.send_modify(|c| c.epoch = 1);
        assert!(!publish_if_current(&tx, 0, |c| c.hits += 1));
        assert_eq!(rx.borrow().hits, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_replaces_pending_task() {
        let (tx, rx) = watch::channel(Counter::default());
        let tx = std::sync::Arc::new(tx);
        let mut slot = TimerSlot::new("test");

        let first = tx.clone();
        slot.arm(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            first.send_modify(|c| c.hits += 10);
        });
        let second = tx.clone();
        slot.arm(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            second.send_modify(|c| c.hits += 1);
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.borrow().hits, 1);
        assert!(!slot.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_task() {
        let (tx, rx) = watch::channel(Counter::default());
        let mut slot = TimerSlot::new("test");

        slot.arm(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            tx.send_modify(|c| c.hits += 1);
        });
        assert!(slot.is_pending());
        assert!(slot.cancel());
        assert!(!slot.cancel());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.borrow().hits, 0);
    }
}
