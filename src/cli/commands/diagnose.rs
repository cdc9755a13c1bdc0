use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::advisor::{self, Reply};
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::remote::plant_id::PlantIdClient;
use crate::ui::messages::{info, warning};
use crate::utils::path::expand_tilde;
use std::fs;

/// Print an assistant reply, wrapped to the terminal-friendly width.
pub(crate) fn print_reply(reply: &Reply) {
    if reply.fallback {
        warning("The assistant service is unavailable, showing offline advice.");
    }
    println!();
    for line in reply.text.lines() {
        if line.is_empty() {
            println!();
        } else {
            for wrapped in textwrap::wrap(line, 80) {
                println!("{}", wrapped);
            }
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Diagnose { image } = cmd {
        let path = expand_tilde(image);
        let bytes = fs::read(&path)?;

        info(format!("Analyzing {}…", path.display()));

        let client = PlantIdClient::new(&cfg.plant_id)?;
        let reply = advisor::diagnose(&client, &bytes);

        print_reply(&reply);

        // the reply is already shown; logging it is best effort
        if let Some(e) = &reply.error {
            if let Ok(pool) = open_db(cfg) {
                ttlog_quiet(&pool.conn, "diagnose_fallback", &path.to_string_lossy(), e);
            }
        }
    }
    Ok(())
}
