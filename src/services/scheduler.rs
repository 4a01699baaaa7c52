use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use sqlx::PgPool;
use uuid::Uuid;
use std::error::Error;

use crate::config::settings::SchedulerSettings;
use crate::league::form::FormService;

pub struct SchedulerService {
    scheduler: Arc<Mutex<JobScheduler>>,
    pool: PgPool,
    settings: SchedulerSettings,
}

impl SchedulerService {
    pub async fn new(pool: PgPool, settings: SchedulerSettings) -> Result<Self, Box<dyn Error>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            pool,
            settings,
        })
    }

    /// Register the periodic jobs and start ticking. Does nothing when disabled.
    pub async fn start(&self) -> Result<(), Box<dyn Error>> {
        if !self.settings.enabled {
            tracing::info!("Scheduler disabled by configuration");
            return Ok(());
        }

        self.schedule_form_refresh().await?;

        let scheduler = self.scheduler.lock().await;
        scheduler.start().await?;

        tracing::info!("Scheduler service started");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), Box<dyn Error>> {
        let mut scheduler = self.scheduler.lock().await;
        scheduler.shutdown().await?;

        tracing::info!("Scheduler service stopped");
        Ok(())
    }

    /// Refresh every club's form on the configured cron, so the upcoming
    /// fixture flag drops once scheduled kickoffs have passed
    async fn schedule_form_refresh(&self) -> Result<Uuid, JobSchedulerError> {
        let cron_expr = self.settings.form_refresh_cron.clone();
        let pool = self.pool.clone();

        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _l| {
            let forms = FormService::new(pool.clone());

            Box::pin(async move {
                tracing::info!("Running scheduled club form refresh");
                match forms.refresh_all().await {
                    Ok(summary) => {
                        tracing::info!(
                            "Scheduled form refresh done: {} clubs refreshed, {} failed",
                            summary.refreshed,
                            summary.failed.len()
                        );
                    }
                    Err(e) => {
                        tracing::error!("Scheduled form refresh failed: {}", e);
                    }
                }
            })
        })?;

        let job_id = job.guid();
        let scheduler = self.scheduler.lock().await;
        scheduler.add(job).await?;

        tracing::info!("Scheduled club form refresh ({})", cron_expr);
        Ok(job_id)
    }
}
