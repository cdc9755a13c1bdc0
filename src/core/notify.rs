use crate::core::calculator::schedule::schedule_for;
use crate::db::log::{ttlog, ttlog_quiet};
use crate::db::pool::DbPool;
use crate::db::queries::{has_unread_watering, insert_notification, load_plants};
use crate::errors::AppResult;
use crate::models::notification::NewNotification;
use crate::models::plant::Plant;
use crate::ui::messages::error;
use chrono::{DateTime, Utc};

/// Outcome of one generator pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub checked: usize,
    pub due: usize,
    pub created: usize,
    pub already_notified: usize,
    pub failed: usize,
}

enum PlantOutcome {
    Created,
    AlreadyNotified,
}

/// Scans the plant collection and creates one unread watering reminder per
/// due plant.
pub struct NotificationGenerator;

impl NotificationGenerator {
    /// Run one pass at instant `now`.
    ///
    /// Only the initial plant read can fail the pass; a failure on a single
    /// plant is logged and the remaining plants are still processed.
    pub fn run(pool: &mut DbPool, now: DateTime<Utc>) -> AppResult<GenerationReport> {
        let plants = load_plants(pool)?;
        let mut report = GenerationReport {
            checked: plants.len(),
            ..Default::default()
        };

        for plant in plants.iter().filter(|p| schedule_for(p, now).is_due()) {
            report.due += 1;

            match Self::notify_plant(pool, plant, now) {
                Ok(PlantOutcome::Created) => report.created += 1,
                Ok(PlantOutcome::AlreadyNotified) => report.already_notified += 1,
                Err(e) => {
                    report.failed += 1;
                    error(format!(
                        "Failed to create watering notification for '{}': {}",
                        plant.name, e
                    ));
                    ttlog_quiet(
                        &pool.conn,
                        "notify_failed",
                        &format!("plant#{}", plant.id),
                        &e.to_string(),
                    );
                }
            }
        }

        Ok(report)
    }

    fn notify_plant(
        pool: &mut DbPool,
        plant: &Plant,
        now: DateTime<Utc>,
    ) -> AppResult<PlantOutcome> {
        if has_unread_watering(&pool.conn, plant.id)? {
            return Ok(PlantOutcome::AlreadyNotified);
        }

        let notification = NewNotification::watering(plant.id, &plant.name, now);

        // the unique index may still reject it if another run got here first
        if !insert_notification(&pool.conn, &notification)? {
            return Ok(PlantOutcome::AlreadyNotified);
        }

        ttlog(
            &pool.conn,
            "notify",
            &format!("plant#{}", plant.id),
            &notification.title,
        )?;

        Ok(PlantOutcome::Created)
    }
}
