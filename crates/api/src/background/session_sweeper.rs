//! Periodic cleanup of dead session rows.
//!
//! Deletes expired or revoked refresh sessions and inactive device bindings
//! past their retention window. Neither deletion changes any gate decision:
//! expired refresh sessions are already unusable and inactive bindings
//! already redirect, so this is purely table hygiene. Runs on a fixed
//! interval using `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use vitrine_db::repositories::{AuthSessionRepo, DeviceSessionRepo};

/// Default retention for inactive device bindings: 30 days.
const DEFAULT_DEVICE_RETENTION_DAYS: i64 = 30;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the session sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let retention_days: i64 = std::env::var("DEVICE_SESSION_RETENTION_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DEVICE_RETENTION_DAYS);

    tracing::info!(
        retention_days,
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Session sweeper started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match AuthSessionRepo::cleanup_expired(&pool).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session sweep: purged dead refresh sessions");
                    }
                    Ok(_) => {
                        tracing::debug!("Session sweep: no refresh sessions to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session sweep: refresh cleanup failed");
                    }
                }

                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match DeviceSessionRepo::cleanup_stale(&pool, cutoff).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session sweep: purged stale device bindings");
                    }
                    Ok(_) => {
                        tracing::debug!("Session sweep: no device bindings to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session sweep: device cleanup failed");
                    }
                }
            }
        }
    }
}
