use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, instrument};

use autosign_infrastructure::logging::RunLogger;

use super::SignJob;

/// Cron trigger: runs the sign job on a fixed schedule (UTC)
pub struct SignScheduler {
    scheduler: JobScheduler,
}

impl SignScheduler {
    /// Register the job and start ticking
    #[instrument(skip(job))]
    pub async fn start(schedule: &str, job: Arc<SignJob>) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create scheduler: {}", e))?;

        let cron = schedule.to_string();
        let cron_job = Job::new_async(schedule, move |_id, _scheduler| {
            let job = Arc::clone(&job);
            let cron = cron.clone();
            Box::pin(async move {
                info!("{}", trigger_message(Utc::now(), &cron));
                let summary = job.run(&RunLogger::process_only()).await;
                info!(
                    total = summary.total,
                    succeeded = summary.succeeded,
                    failed = summary.failed,
                    already_signed = summary.already_signed,
                    "Scheduled run finished"
                );
            })
        })
        .map_err(|e| anyhow!("Invalid cron expression '{}': {}", schedule, e))?;

        scheduler
            .add(cron_job)
            .await
            .map_err(|e| anyhow!("Failed to register scheduled job: {}", e))?;
        scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start scheduler: {}", e))?;

        info!("✅ Scheduler started ({})", schedule);

        Ok(Self { scheduler })
    }

    pub async fn shutdown(mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("Failed to stop scheduler: {}", e))?;
        info!("🛑 Scheduler stopped");
        Ok(())
    }
}

/// Cron fires in UTC, so the logged time is UTC too
fn trigger_message(at: DateTime<Utc>, cron: &str) -> String {
    format!(
        "Triggering scheduled task at {} ({})",
        at.format("%Y-%m-%d %H:%M:%S UTC"),
        cron
    )
}
