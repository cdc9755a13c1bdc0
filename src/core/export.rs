use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_plants;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, PlantExport, ensure_writable, export_csv, export_json};
use crate::ui::messages::warning;
use chrono::{DateTime, Utc};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the plant inventory, with each plant's schedule computed at
    /// `now`. `file` must be an absolute path.
    ///
    /// Returns the number of exported plants.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        force: bool,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let rows: Vec<PlantExport> = load_plants(pool)?
            .iter()
            .map(|p| PlantExport::from_plant(p, now))
            .collect();

        if rows.is_empty() {
            warning("No plants found. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            file,
            &format!("Exported {} plants as {}", rows.len(), format.as_str()),
        )?;

        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{insert_plant, mark_watered};
    use crate::models::frequency::WateringFrequency;
    use crate::models::plant::NewPlant;
    use chrono::{Duration, TimeZone};
    use std::fs;

    fn out(name: &str, ext: &str) -> String {
        let mut p = std::env::temp_dir();
        p.push(format!("{}_ecopot_export.{}", name, ext));
        let s = p.to_string_lossy().to_string();
        fs::remove_file(&s).ok();
        s
    }

    #[test]
    fn exports_schedule_columns() {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();

        let monstera = NewPlant::new("Monstera", "", WateringFrequency::Monthly);
        let id = insert_plant(&pool.conn, &monstera).unwrap();
        mark_watered(&pool.conn, id, &(now - Duration::days(5))).unwrap();

        let csv_file = out("schedule_columns", "csv");
        let n = ExportLogic::export(&mut pool, ExportFormat::Csv, &csv_file, true, now).unwrap();
        assert_eq!(n, 1);

        let content = fs::read_to_string(&csv_file).unwrap();
        assert!(content.starts_with("id,name,species,watering_frequency,last_watered"));
        assert!(content.contains("Monstera"));
        assert!(content.contains(",25,good,"));

        let json_file = out("schedule_columns", "json");
        ExportLogic::export(&mut pool, ExportFormat::Json, &json_file, true, now).unwrap();
        let text = fs::read_to_string(&json_file).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(rows[0]["days_until_watering"], 25);
        assert_eq!(rows[0]["watering_frequency"], "Monthly");
    }

    #[test]
    fn relative_paths_are_rejected() {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let res = ExportLogic::export(
            &mut pool,
            ExportFormat::Json,
            "plants.json",
            true,
            Utc::now(),
        );
        assert!(matches!(res, Err(AppError::Export(_))));
    }
}
