use anyhow::{Context, Result};
use schedule_engine::{NotificationPoller, SystemClock};
use tokio::sync::watch;

use crate::session::Session;

/// Run the poller against the store until Ctrl-C. The store is re-read every
/// poll period so edits from other invocations are picked up.
pub fn run(mut session: Session) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async move {
        let period = session.config.poll_interval();
        let (events_tx, events_rx) = watch::channel(session.ops.events().to_vec());
        let (mut poller, mut fired) = NotificationPoller::start(events_rx, SystemClock, period)?;
        let mut reload = tokio::time::interval(period);

        tracing::info!(
            store = %session.ops.store().path().display(),
            period_ms = period.as_millis() as u64,
            "watching for reminders"
        );
        eprintln!("알림 대기 중... (Ctrl-C로 종료)");

        loop {
            tokio::select! {
                Some(record) = fired.recv() => {
                    if session.json {
                        println!("{}", serde_json::to_string(&record)?);
                    } else {
                        println!("{}", record.message);
                    }
                }
                _ = reload.tick() => {
                    let notice = session.ops.fetch_events();
                    if notice.is_error() {
                        tracing::warn!("{notice}");
                    } else {
                        events_tx.send_if_modified(|current| {
                            let latest = session.ops.events();
                            if current.as_slice() == latest {
                                return false;
                            }
                            *current = latest.to_vec();
                            true
                        });
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        poller.stop();
        Ok::<(), anyhow::Error>(())
    })
}
