//! Background refresh of a screen's source data
//!
//! A poller periodically calls a [`RecordSource`] and publishes each
//! successful result on a `tokio::sync::watch` channel. The channel only
//! keeps the latest collection: the screen cares about "current data" versus
//! "next data", never about a queue of past fetches.
//!
//! # Architecture
//!
//! ```text
//! interval tick ──▶ RecordSource::fetch_records() ──▶ watch channel ──▶ RefreshHandle
//!                                                                         │
//!                               ViewController::apply_refresh() ◀────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut handle = RefreshPoller::spawn("contacts", source, ctx, Duration::from_secs(30));
//!
//! // On the screen's own thread, e.g. once per frame or after `changed()`:
//! controller.apply_refresh(&mut handle);
//! ```

use crate::config::ScreenConfig;
use crate::core::record::Record;
use crate::core::source::{ClientContext, RecordSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

type Latest<T> = Option<Arc<Vec<T>>>;

/// Receiving end of a background poller
///
/// Dropping the handle stops the poller.
pub struct RefreshHandle<T> {
    screen: String,
    receiver: watch::Receiver<Latest<T>>,
    task: JoinHandle<()>,
}

impl<T: Record> RefreshHandle<T> {
    /// Name of the screen this poller feeds
    pub fn screen(&self) -> &str {
        &self.screen
    }

    /// Take the newest collection if one arrived since the last call
    pub fn take_latest(&mut self) -> Option<Vec<T>> {
        let latest = self.receiver.borrow_and_update();
        if !latest.has_changed() {
            return None;
        }
        latest.as_deref().cloned()
    }

    /// Wait until the poller publishes new data
    ///
    /// Returns `false` once the poller has stopped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Whether the polling task is still running
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop polling
    pub fn stop(self) {
        drop(self);
    }
}

impl<T> Drop for RefreshHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns background pollers
pub struct RefreshPoller;

impl RefreshPoller {
    /// Poll `source` every `period`, starting immediately
    ///
    /// Must be called from within a tokio runtime. Fetch errors are logged
    /// and skipped; the previous data stays current.
    pub fn spawn<T, S>(
        screen: impl Into<String>,
        source: Arc<S>,
        ctx: ClientContext,
        period: Duration,
    ) -> RefreshHandle<T>
    where
        T: Record,
        S: RecordSource<T> + ?Sized + 'static,
    {
        let screen = screen.into();
        let (sender, receiver) = watch::channel::<Latest<T>>(None);
        let task_screen = screen.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                screen = %task_screen,
                period_ms = period.as_millis() as u64,
                "Refresh poller started"
            );

            loop {
                ticker.tick().await;

                match source.fetch_records(&ctx).await {
                    Ok(records) => {
                        tracing::debug!(
                            screen = %task_screen,
                            records = records.len(),
                            "Background refresh delivered records"
                        );
                        if sender.send(Some(Arc::new(records))).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            screen = %task_screen,
                            error = %err,
                            "Background refresh failed; keeping current data"
                        );
                    }
                }
            }

            tracing::info!(screen = %task_screen, "Refresh poller stopped");
        });

        RefreshHandle {
            screen,
            receiver,
            task,
        }
    }

    /// Poll with the screen's configured interval
    ///
    /// Returns `None` when the screen disables polling.
    pub fn spawn_for_screen<T, S>(
        config: &ScreenConfig,
        source: Arc<S>,
        ctx: ClientContext,
    ) -> Option<RefreshHandle<T>>
    where
        T: Record,
        S: RecordSource<T> + ?Sized + 'static,
    {
        let period = config.refresh_interval()?;
        Some(Self::spawn(config.name.clone(), source, ctx, period))
    }
}
