//! Repeating background task with a cancel handle.

use std::{future::Future, ops::ControlFlow, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

/// Handle to a task started by [`spawn_repeating`].
///
/// Cancelling is idempotent, and dropping the handle cancels the task.
#[derive(Debug)]
pub struct TaskHandle {
    handle: JoinHandle<()>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Calls `on_tick` once per `period`, starting one period from now, until it
/// returns `Break` or the handle is cancelled.
pub fn spawn_repeating<F, Fut>(period: Duration, mut on_tick: F) -> TaskHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ControlFlow<()>> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await; // first tick completes immediately

        loop {
            ticker.tick().await;
            if on_tick().await.is_break() {
                break;
            }
        }
    });

    TaskHandle { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tokio::time::sleep;

    fn counting(period: Duration, count: &Arc<AtomicUsize>) -> TaskHandle {
        let count = Arc::clone(count);
        spawn_repeating(period, move || {
            let count = Arc::clone(&count);
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let task = counting(Duration::from_millis(1000), &count);

        sleep(Duration::from_millis(999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        task.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_further_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let task = counting(Duration::from_millis(1000), &count);

        sleep(Duration::from_millis(1_500)).await;
        task.cancel();
        task.cancel();
        sleep(Duration::from_millis(5_000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels() {
        let count = Arc::new(AtomicUsize::new(0));
        drop(counting(Duration::from_millis(1000), &count));
        sleep(Duration::from_millis(3_000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn break_ends_the_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let task = spawn_repeating(Duration::from_millis(100), move || {
            let inner = Arc::clone(&inner);
            async move {
                if inner.fetch_add(1, Ordering::SeqCst) + 1 >= 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        });

        sleep(Duration::from_millis(1_000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(task.is_finished());
    }
}
