use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::events::CoreEvent;
use crate::store::CaseRepository;

/// Slot holding the event sender. Emptied on cancel so nothing can be
/// sent afterwards, even by a tick that is already running.
type EventSink = Arc<Mutex<Option<UnboundedSender<CoreEvent>>>>;

/// Periodic reload of the activity feed.
///
/// The first tick fires immediately, then every `period`. Each tick sends
/// [`CoreEvent::ActivitiesRefreshed`] (or [`CoreEvent::RefreshFailed`]).
/// The task stops on [`RefreshTask::cancel`] or when the handle is dropped,
/// and the receiver then sees the channel close.
pub struct RefreshTask {
    sink: EventSink,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTask {
    /// Must be called from inside a tokio runtime
    pub fn spawn(
        repo: Arc<dyn CaseRepository>,
        period: Duration,
        events: UnboundedSender<CoreEvent>,
    ) -> Self {
        let sink: EventSink = Arc::new(Mutex::new(Some(events)));
        let task_sink = Arc::clone(&sink);
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let event = match repo.list_activities() {
                    Ok(items) => {
                        tracing::debug!(count = items.len(), "refreshed activity feed");
                        CoreEvent::ActivitiesRefreshed(items)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "activity refresh failed");
                        CoreEvent::RefreshFailed {
                            message: e.user_message(),
                            retryable: e.is_retryable(),
                        }
                    }
                };

                let guard = task_sink.lock();
                match guard.as_ref() {
                    Some(tx) if tx.send(event).is_ok() => {}
                    // Cancelled, or nobody is listening any more
                    _ => break,
                }
            }
        });

        Self {
            sink,
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        self.sink.lock().take();
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("activity refresh cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_none()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, CoreResult};
    use crate::models::{
        ActivityItem, Comment, ReplyPlacement, Suspect, Task, TaskStatus, TeamMember, Thread,
        User, Witness,
    };
    use crate::store::{CaseData, MemoryRepository, SavedSearch};
    use tokio::sync::mpsc::unbounded_channel;
    use tokio::time::Instant;

    fn repo() -> Arc<dyn CaseRepository> {
        Arc::new(MemoryRepository::seeded().unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_immediate_then_periodic() {
        let (tx, mut rx) = unbounded_channel();
        let _task = RefreshTask::spawn(repo(), Duration::from_secs(30), tx);

        let start = Instant::now();
        match rx.recv().await {
            Some(CoreEvent::ActivitiesRefreshed(items)) => assert_eq!(items.len(), 10),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(start.elapsed() < Duration::from_secs(1));

        assert!(matches!(rx.recv().await, Some(CoreEvent::ActivitiesRefreshed(_))));
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_events_after_cancel() {
        let (tx, mut rx) = unbounded_channel();
        let mut task = RefreshTask::spawn(repo(), Duration::from_secs(30), tx);
        assert!(rx.recv().await.is_some());

        task.cancel();
        assert!(task.is_cancelled());
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(rx.recv().await.is_none());

        // Cancelling twice is harmless
        task.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_the_task() {
        let (tx, mut rx) = unbounded_channel();
        let task = RefreshTask::spawn(repo(), Duration::from_secs(30), tx);
        assert!(rx.recv().await.is_some());
        drop(task);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_ends_when_receiver_is_gone() {
        let (tx, rx) = unbounded_channel();
        let task = RefreshTask::spawn(repo(), Duration::from_secs(30), tx);
        drop(rx);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(task.handle.as_ref().map_or(true, |h| h.is_finished()));
    }

    /// Repository whose activity feed is unavailable
    struct OfflineRepository;

    impl CaseRepository for OfflineRepository {
        fn list_threads(&self, _: &str) -> CoreResult<Vec<Thread>> {
            Ok(Vec::new())
        }
        fn get_thread(&self, id: &str) -> CoreResult<Thread> {
            Err(CoreError::not_found("thread", id))
        }
        fn create_thread(&self, thread: Thread) -> CoreResult<Thread> {
            Ok(thread)
        }
        fn add_comment(&self, _: &str, _: Option<&str>, _: Comment, _: usize) -> CoreResult<ReplyPlacement> {
            Err(CoreError::TransientIo("offline".into()))
        }
        fn record_view(&self, _: &str) -> CoreResult<u64> {
            Ok(0)
        }
        fn list_users(&self) -> CoreResult<Vec<User>> {
            Ok(Vec::new())
        }
        fn list_witnesses(&self) -> CoreResult<Vec<Witness>> {
            Ok(Vec::new())
        }
        fn list_suspects(&self) -> CoreResult<Vec<Suspect>> {
            Ok(Vec::new())
        }
        fn list_activities(&self) -> CoreResult<Vec<ActivityItem>> {
            Err(CoreError::TransientIo("connection reset".into()))
        }
        fn record_activity(&self, _: ActivityItem) -> CoreResult<()> {
            Ok(())
        }
        fn list_tasks(&self) -> CoreResult<Vec<Task>> {
            Ok(Vec::new())
        }
        fn update_task_status(&self, id: &str, _: TaskStatus, _: u64) -> CoreResult<Task> {
            Err(CoreError::not_found("task", id))
        }
        fn list_team_members(&self) -> CoreResult<Vec<TeamMember>> {
            Ok(Vec::new())
        }
        fn list_saved_searches(&self) -> CoreResult<Vec<SavedSearch>> {
            Ok(Vec::new())
        }
        fn save_search(&self, _: SavedSearch) -> CoreResult<()> {
            Ok(())
        }
        fn snapshot(&self) -> CoreResult<CaseData> {
            Ok(CaseData::default())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_is_reported_as_retryable() {
        let (tx, mut rx) = unbounded_channel();
        let _task = RefreshTask::spawn(Arc::new(OfflineRepository), Duration::from_secs(30), tx);
        match rx.recv().await {
            Some(CoreEvent::RefreshFailed { message, retryable }) => {
                assert!(retryable);
                assert_eq!(message, "Failed to load data. Please try again.");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
