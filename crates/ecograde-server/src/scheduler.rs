//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the daily
//! history-retention purge.

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised, a
/// job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(pool: PgPool) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_retention_job(&scheduler, pool).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the daily comparison-retention purge.
///
/// Runs every day at 03:10 UTC. Reads already filter expired rows, so the
/// purge is pure housekeeping: it reclaims storage rather than enforcing
/// visibility.
async fn register_retention_job(
    scheduler: &JobScheduler,
    pool: PgPool,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async("0 10 3 * * *", move |_uuid, _lock| {
        let pool = pool.clone();

        Box::pin(async move {
            match ecograde_db::purge_expired(&pool).await {
                Ok(0) => tracing::debug!("scheduler: no expired comparisons to purge"),
                Ok(n) => tracing::info!(purged = n, "scheduler: purged expired comparisons"),
                Err(e) => tracing::error!(error = %e, "scheduler: retention purge failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
