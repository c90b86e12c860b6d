//! Cron-driven trigger for the daily push.

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Utc;
use cron::Schedule;
use log::debug;
use log::error;
use log::info;
use tokio::time::sleep;

use crate::service::daily_push_service::DailyPushService;
use crate::service::daily_push_service::PushOutcome;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SchedulerError {
    #[error("Invalid cron expression `{expr}`: {message}")]
    InvalidCron { expr: String, message: String },

    #[error("Invalid UTC offset: {seconds}s")]
    InvalidOffset { seconds: i32 },
}

/// Fires [`DailyPushService::run_daily_push`] on a cron schedule evaluated in
/// a fixed UTC offset. Missed fires are not replayed.
pub struct DailyPushScheduler {
    service: Arc<DailyPushService>,
    schedule: Schedule,
    offset: FixedOffset,
    running: AtomicBool,
}

impl DailyPushScheduler {
    /// Accepts 5-field or 6-field (leading seconds) cron expressions.
    pub fn new(
        service: Arc<DailyPushService>,
        cron_expr: &str,
        utc_offset_secs: i32,
    ) -> Result<Arc<Self>, SchedulerError> {
        let expr = normalize_cron_expr(cron_expr);
        let schedule = Schedule::from_str(&expr).map_err(|e| SchedulerError::InvalidCron {
            expr: cron_expr.to_string(),
            message: e.to_string(),
        })?;
        let offset = FixedOffset::east_opt(utc_offset_secs).ok_or(SchedulerError::InvalidOffset {
            seconds: utc_offset_secs,
        })?;

        info!("Initializing DailyPushScheduler with schedule `{expr}` at {offset}");
        Ok(Arc::new(Self {
            service,
            schedule,
            offset,
            running: AtomicBool::new(false),
        }))
    }

    /// Starts the schedule loop.
    pub fn start(self: Arc<Self>) {
        if !self.running.swap(true, Ordering::SeqCst) {
            info!("Starting DailyPushScheduler loop.");
            self.spawn_loop();
        }
    }

    /// Stops the loop after the current wait ends.
    pub fn stop(&self) {
        info!("Stopping DailyPushScheduler loop.");
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Next fire time strictly after `after`.
    pub fn next_fire_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule
            .after(&after.with_timezone(&self.offset))
            .next()
            .map(|next| next.with_timezone(&Utc))
    }

    fn spawn_loop(self: Arc<Self>) {
        tokio::spawn(async move {
            loop {
                let now = Utc::now();
                let Some(next) = self.next_fire_after(now) else {
                    error!("Schedule has no upcoming fire time. Stopping.");
                    self.running.store(false, Ordering::SeqCst);
                    break;
                };
                let wait = (next - now).to_std().unwrap_or_default();
                debug!(
                    "Next daily push at {} (in {:?}).",
                    next.with_timezone(&self.offset),
                    wait
                );
                sleep(wait).await;

                if !self.is_running() {
                    info!("Stopping schedule loop.");
                    break;
                }
                self.fire().await;
            }
        });
    }

    async fn fire(&self) {
        info!("Scheduled daily push triggered.");
        match self.service.run_daily_push().await {
            PushOutcome::Completed(report) => debug!("Scheduled push report: {report:?}"),
            PushOutcome::NotConfigured => debug!("Scheduled push skipped: not configured."),
            PushOutcome::AlreadyRunning => info!("Scheduled push skipped: already running."),
            PushOutcome::StoreUnavailable { message } => {
                error!("Scheduled push aborted: {message}")
            }
        }
    }
}

/// The `cron` crate wants a leading seconds field. A 5-field expression gets
/// `0` seconds prepended.
fn normalize_cron_expr(expr: &str) -> String {
    let trimmed = expr.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {trimmed}")
    } else {
        trimmed.to_string()
    }
}
