use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_plant, mark_watered};
use crate::errors::{AppError, AppResult};
use crate::models::plant::Plant;
use chrono::{DateTime, Utc};

pub struct WaterLogic;

impl WaterLogic {
    /// Record that plant `id` was watered at `at`. Returns the updated plant.
    /// A watering time later than now is rejected.
    pub fn apply(pool: &mut DbPool, id: i64, at: DateTime<Utc>) -> AppResult<Plant> {
        if at > Utc::now() {
            return Err(AppError::InvalidDate(format!(
                "{} is in the future",
                at.to_rfc3339()
            )));
        }

        mark_watered(&pool.conn, id, &at)?;

        let plant = load_plant(&pool.conn, id)?.ok_or(AppError::PlantNotFound(id))?;

        ttlog(
            &pool.conn,
            "water",
            &format!("plant#{}", id),
            &format!("'{}' watered at {}", plant.name, at.to_rfc3339()),
        )?;

        Ok(plant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::schedule::schedule_for;
    use crate::db::initialize::init_db;
    use crate::db::queries::insert_plant;
    use crate::models::frequency::WateringFrequency;
    use crate::models::plant::NewPlant;
    use chrono::Duration;

    fn pool_with_plant() -> (DbPool, i64) {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let id = insert_plant(&pool.conn, &NewPlant::new("Basil", "", WateringFrequency::Daily))
            .unwrap();
        (pool, id)
    }

    #[test]
    fn records_watering_and_resets_schedule() {
        let (mut pool, id) = pool_with_plant();
        let plant = WaterLogic::apply(&mut pool, id, Utc::now()).unwrap();

        let s = schedule_for(&plant, Utc::now());
        assert_eq!(s.days_until_watering, 1);
        assert!(!s.is_due());
    }

    #[test]
    fn future_watering_is_rejected_and_not_stored() {
        let (mut pool, id) = pool_with_plant();
        let err = WaterLogic::apply(&mut pool, id, Utc::now() + Duration::days(30)).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));

        let plant = load_plant(&pool.conn, id).unwrap().unwrap();
        assert!(plant.last_watered.is_none());
    }

    #[test]
    fn unknown_plant_is_reported() {
        let (mut pool, _) = pool_with_plant();
        assert!(matches!(
            WaterLogic::apply(&mut pool, 999, Utc::now()),
            Err(AppError::PlantNotFound(999))
        ));
    }
}
