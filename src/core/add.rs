use crate::db::log::{ttlog, ttlog_quiet};
use crate::db::pool::DbPool;
use crate::db::queries::insert_plant;
use crate::errors::{AppError, AppResult};
use crate::models::frequency::WateringFrequency;
use crate::models::plant::NewPlant;
use crate::remote::PlantIdentifier;
use crate::remote::plant_id::Suggestion;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::PathBuf;

/// Input of the `add` command.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub frequency: WateringFrequency,
    pub image: Option<PathBuf>,
    pub notes: String,
    pub identify: bool,
}

fn blank(s: &Option<String>) -> bool {
    s.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Create a plant. With `identify` set, the image is sent to the
    /// identifier first and the top suggestion fills in whatever name or
    /// species the user left empty. A failed identification only warns.
    pub fn apply<I: PlantIdentifier + ?Sized>(
        pool: &mut DbPool,
        mut req: AddRequest,
        identifier: Option<&I>,
    ) -> AppResult<i64> {
        let mut identification = None;

        if req.identify {
            let image = req.image.clone().ok_or_else(|| {
                AppError::Validation("--identify needs a plant photo (--image)".into())
            })?;
            let bytes = fs::read(&image)?;

            if let Some(identifier) = identifier {
                match identifier.identify(&bytes) {
                    Ok(resp) => match resp.suggestions.first() {
                        Some(top) => {
                            Self::fill_from_suggestion(&mut req, top);
                            identification = Some(serde_json::to_string(top)?);
                        }
                        None => warning(
                            "Could not identify this plant. Please enter details manually.",
                        ),
                    },
                    Err(e) => {
                        warning(format!(
                            "Failed to identify plant ({}). Please enter details manually.",
                            e
                        ));
                        ttlog_quiet(
                            &pool.conn,
                            "identify_failed",
                            &image.to_string_lossy(),
                            &e.to_string(),
                        );
                    }
                }
            }
        }

        if blank(&req.name) {
            return Err(AppError::Validation("Please enter a plant name".into()));
        }

        let mut plant = NewPlant::new(
            req.name.as_deref().unwrap_or_default(),
            req.species.as_deref().unwrap_or_default(),
            req.frequency,
        );
        plant.image_ref = req.image.as_ref().map(|p| p.to_string_lossy().to_string());
        plant.identification = identification;
        plant.notes = req.notes;

        let id = insert_plant(&pool.conn, &plant)?;

        ttlog(
            &pool.conn,
            "add",
            &format!("plant#{}", id),
            &format!("Added '{}' ({}, {})", plant.name, plant.species, plant.frequency),
        )?;

        success(format!("Plant '{}' added with ID {}.", plant.name, id));
        Ok(id)
    }

    fn fill_from_suggestion(req: &mut AddRequest, top: &Suggestion) {
        info(format!(
            "Plant identified: {} (confidence {}%)",
            top.display_name(),
            top.confidence_pct()
        ));

        if blank(&req.name) {
            req.name = Some(top.display_name());
        }
        if blank(&req.species) {
            req.species = Some(top.species());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::load_plant;
    use crate::remote::plant_id::{IdentifyResponse, PlantDetails};

    struct Identifies;

    impl PlantIdentifier for Identifies {
        fn identify(&self, _image: &[u8]) -> AppResult<IdentifyResponse> {
            Ok(IdentifyResponse {
                suggestions: vec![Suggestion {
                    plant_name: "Dracaena trifasciata".into(),
                    probability: 0.93,
                    plant_details: Some(PlantDetails {
                        common_names: Some(vec!["Snake plant".into()]),
                        name_authority: Some("Dracaena trifasciata (Prain) Mabb.".into()),
                    }),
                }],
            })
        }
    }

    struct Offline;

    impl PlantIdentifier for Offline {
        fn identify(&self, _image: &[u8]) -> AppResult<IdentifyResponse> {
            Err(AppError::Remote("offline".into()))
        }
    }

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn image(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("{}_ecopot_photo.jpg", name));
        fs::write(&p, b"\xFF\xD8\xFFfake-jpeg").unwrap();
        p
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut pool = pool();
        let req = AddRequest {
            name: Some("   ".into()),
            ..Default::default()
        };
        let res = AddLogic::apply::<Offline>(&mut pool, req, None);
        assert!(matches!(res, Err(AppError::Validation(_))));
    }

    #[test]
    fn identification_fills_missing_fields_only() {
        let mut pool = pool();
        let req = AddRequest {
            name: Some("Sansa".into()),
            image: Some(image("fills")),
            identify: true,
            ..Default::default()
        };

        let id = AddLogic::apply(&mut pool, req, Some(&Identifies)).unwrap();
        let plant = load_plant(&pool.conn, id).unwrap().unwrap();

        assert_eq!(plant.name, "Sansa");
        assert_eq!(plant.species, "Dracaena trifasciata (Prain) Mabb.");
        assert!(plant.identification.unwrap().contains("Snake plant"));
        assert!(plant.last_watered.is_none());
    }

    #[test]
    fn failed_identification_still_needs_a_name() {
        let mut pool = pool();
        let req = AddRequest {
            image: Some(image("offline")),
            identify: true,
            ..Default::default()
        };
        assert!(matches!(
            AddLogic::apply(&mut pool, req.clone(), Some(&Offline)),
            Err(AppError::Validation(_))
        ));

        let req = AddRequest {
            name: Some("Fern".into()),
            ..req
        };
        let id = AddLogic::apply(&mut pool, req, Some(&Offline)).unwrap();
        assert!(load_plant(&pool.conn, id).unwrap().unwrap().identification.is_none());
    }
}
