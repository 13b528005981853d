//! The recurring notification tick.
//!
//! [`NotificationPoller`] runs a [`NotificationScheduler`] on a fixed period in
//! one tokio task. Ticks are sequential: the next one starts only after the
//! previous one has returned. The event list is read from a `watch` channel,
//! so every tick sees the latest list the session has published, and newly
//! fired reminders are pushed on an unbounded channel in discovery order.
//!
//! Dropping the handle aborts the task. No tick runs against a session that
//! has already released its poller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::clock::Clock;
use crate::error::{EngineError, Result};
use crate::event::Event;
use crate::notification::{NotificationRecord, NotificationScheduler};

/// Default polling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct NotificationPoller {
    state: Arc<Mutex<NotificationScheduler>>,
    task: Option<JoinHandle<()>>,
}

fn lock(state: &Mutex<NotificationScheduler>) -> MutexGuard<'_, NotificationScheduler> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NotificationPoller {
    /// Spawn the polling task. The first tick happens one `period` after the
    /// call; ticks missed while the runtime was busy are skipped, not replayed.
    ///
    /// Returns the handle and the receiver of newly fired reminders.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if `period` is zero.
    ///
    /// # Panics
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start<C>(
        events: watch::Receiver<Vec<Event>>,
        clock: C,
        period: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<NotificationRecord>)>
    where
        C: Clock + 'static,
    {
        if period.is_zero() {
            return Err(EngineError::Config(
                "notification poll interval must be greater than zero".to_string(),
            ));
        }

        let state = Arc::new(Mutex::new(NotificationScheduler::new()));
        let (tx, rx) = mpsc::unbounded_channel();

        let task_state = Arc::clone(&state);
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let now = clock.now();
                let fired = {
                    let events = events.borrow();
                    lock(&task_state).tick(&events, now)
                };

                for record in fired {
                    // A closed receiver only means nobody is listening; the
                    // visible list in `state` is still updated.
                    let _ = tx.send(record);
                }
            }
        });

        tracing::debug!(period_ms = period.as_millis() as u64, "notification poller started");

        Ok((
            NotificationPoller {
                state,
                task: Some(task),
            },
            rx,
        ))
    }

    /// Snapshot of the visible reminders.
    pub fn notifications(&self) -> Vec<NotificationRecord> {
        lock(&self.state).notifications().to_vec()
    }

    /// Dismiss the visible reminder at `index`; its event stays suppressed.
    pub fn remove_notification(&self, index: usize) -> Option<NotificationRecord> {
        lock(&self.state).remove_notification(index)
    }

    pub fn is_notified(&self, id: &str) -> bool {
        lock(&self.state).is_notified(id)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("notification poller stopped");
        }
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::event::RepeatRule;
    use chrono::{NaiveDate, NaiveDateTime};
    use tokio::sync::mpsc::error::TryRecvError;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: &str, title: &str, date: &str, start: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: "23:00".to_string(),
            description: String::new(),
            location: String::new(),
            category: "업무".to_string(),
            repeat: RepeatRule::none(),
            notification_time: 30,
        }
    }

    fn events() -> Vec<Event> {
        vec![
            event("1", "이벤트 1", "2024-07-01", "10:00"),
            event("2", "이벤트 2", "2024-07-02", "11:00"),
            event("3", "event 3", "2024-07-03", "12:00"),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_notification_before_first_tick() {
        let (_events_tx, events_rx) = watch::channel(events());
        let (poller, mut fired) =
            NotificationPoller::start(events_rx, ManualClock::new(at(9, 30)), DEFAULT_POLL_INTERVAL)
                .unwrap();

        assert!(poller.notifications().is_empty());
        assert!(matches!(fired.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_one_period() {
        let (_events_tx, events_rx) = watch::channel(events());
        let (poller, mut fired) =
            NotificationPoller::start(events_rx, ManualClock::new(at(9, 30)), DEFAULT_POLL_INTERVAL)
                .unwrap();

        let record = fired.recv().await.unwrap();
        assert_eq!(record.id, "1");
        assert_eq!(record.message, "30분 후 이벤트 1 일정이 시작됩니다.");
        assert_eq!(poller.notifications(), vec![record]);
        assert!(poller.is_notified("1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_ticks_do_not_duplicate() {
        let clock = ManualClock::new(at(9, 30));
        let (_events_tx, events_rx) = watch::channel(events());
        let (poller, mut fired) =
            NotificationPoller::start(events_rx, clock.clone(), DEFAULT_POLL_INTERVAL).unwrap();

        fired.recv().await.unwrap();

        tokio::time::sleep(Duration::from_secs(1)).await;
        clock.advance(chrono::Duration::minutes(10));
        tokio::time::sleep(Duration::from_secs(600)).await;

        assert!(matches!(fired.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(poller.notifications().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismissed_notification_is_not_refired() {
        let (_events_tx, events_rx) = watch::channel(events());
        let (poller, mut fired) =
            NotificationPoller::start(events_rx, ManualClock::new(at(9, 30)), DEFAULT_POLL_INTERVAL)
                .unwrap();

        fired.recv().await.unwrap();
        assert!(poller.remove_notification(0).is_some());
        assert!(poller.notifications().is_empty());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(poller.notifications().is_empty());
        assert!(matches!(fired.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_picks_up_published_event_list() {
        let (events_tx, events_rx) = watch::channel(Vec::new());
        let (poller, mut fired) =
            NotificationPoller::start(events_rx, ManualClock::new(at(9, 30)), DEFAULT_POLL_INTERVAL)
                .unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(poller.notifications().is_empty());

        events_tx.send(events()).unwrap();
        let record = fired.recv().await.unwrap();
        assert_eq!(record.id, "1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_prevents_further_ticks() {
        let (events_tx, events_rx) = watch::channel(Vec::new());
        let (mut poller, mut fired) =
            NotificationPoller::start(events_rx, ManualClock::new(at(9, 30)), DEFAULT_POLL_INTERVAL)
                .unwrap();

        poller.stop();
        poller.stop();
        events_tx.send_replace(events());
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(!poller.is_running());
        assert!(poller.notifications().is_empty());
        assert!(fired.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_zero_period_is_rejected() {
        let (_events_tx, events_rx) = watch::channel(events());
        let result = NotificationPoller::start(
            events_rx,
            ManualClock::new(at(9, 30)),
            Duration::ZERO,
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
