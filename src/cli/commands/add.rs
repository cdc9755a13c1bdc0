use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, AddRequest};
use crate::errors::AppResult;
use crate::remote::plant_id::PlantIdClient;
use crate::utils::path::expand_tilde;

/// Add a plant, optionally identifying it from a photo first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        name,
        species,
        frequency,
        image,
        notes,
        identify,
    } = cmd
    {
        let mut pool = open_db(cfg)?;

        let req = AddRequest {
            name: name.clone(),
            species: species.clone(),
            frequency: frequency.unwrap_or(cfg.default_frequency),
            image: image.as_deref().map(expand_tilde),
            notes: notes.clone(),
            identify: *identify,
        };

        let client = if *identify {
            Some(PlantIdClient::new(&cfg.plant_id)?)
        } else {
            None
        };

        AddLogic::apply(&mut pool, req, client.as_ref())?;
    }

    Ok(())
}
