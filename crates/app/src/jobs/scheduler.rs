use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::jobs::JobError;

pub async fn run_interval<F, Fut>(
    name: &'static str,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut job: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), JobError>>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        if *shutdown.borrow() {
            break;
        }
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
        }
        let started = Instant::now();
        match job().await {
            Ok(()) => debug!(
                job = name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "job run finished"
            ),
            Err(err) => warn!(error = %err, job = name, "job execution failed"),
        }
    }
    info!(job = name, "scheduler stopped");
}
