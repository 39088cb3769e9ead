// ============================================================================
// Debouncer
// Cancel-and-reschedule timer on the Tokio runtime
// ============================================================================

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delivers only the last submitted value, once `quiet_period` has passed
/// without a newer submission.
///
/// Each [`submit`] aborts the pending delivery, so intermediate values are
/// never seen by the callback. Dropping the debouncer aborts the pending
/// delivery as well.
///
/// # Example
/// ```
/// use market_stats::debounce::Debouncer;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let debouncer = Debouncer::new(Duration::from_millis(10), |value: String| {
///     println!("percentage settled at {value}");
/// });
/// debouncer.submit("1".to_string());
/// debouncer.submit("1.23".to_string());
/// tokio::time::sleep(Duration::from_millis(20)).await;
/// # }
/// ```
///
/// [`submit`]: Debouncer::submit
pub struct Debouncer<T> {
    quiet_period: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(quiet_period: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            quiet_period,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedule `value` for delivery, superseding any pending value.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, value: T) {
        let callback = Arc::clone(&self.callback);
        let quiet_period = self.quiet_period;

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                tracing::trace!("superseding pending debounced value");
            }
            previous.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            callback(value);
        }));
    }

    /// Drop the pending value, if any. Returns `true` if one was waiting.
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                if was_waiting {
                    tracing::trace!("cancelled pending debounced value");
                }
                was_waiting
            },
            None => false,
        }
    }

    /// A value is waiting for its quiet period to elapse
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, Debouncer<String>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let debouncer = Debouncer::new(Duration::from_millis(500), move |value: String| {
            sink.lock().push(value);
        });
        (seen, debouncer)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_inputs_collapse_to_last() {
        let (seen, debouncer) = recorder();

        for value in ["1", "1.2", "1.23"] {
            debouncer.submit(value.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*seen.lock(), vec!["1.23".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_inputs_are_all_delivered() {
        let (seen, debouncer) = recorder();

        debouncer.submit("10".to_string());
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.submit("20".to_string());
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(*seen.lock(), vec!["10".to_string(), "20".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_delivered_before_quiet_period() {
        let (seen, debouncer) = recorder();

        debouncer.submit("5".to_string());
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(seen.lock().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(seen.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (seen, debouncer) = recorder();

        assert!(!debouncer.cancel());
        debouncer.submit("5".to_string());
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(seen.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let (seen, debouncer) = recorder();

        debouncer.submit("5".to_string());
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(seen.lock().is_empty());
    }
}
