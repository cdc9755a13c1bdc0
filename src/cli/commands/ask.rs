use crate::cli::commands::diagnose::print_reply;
use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::advisor;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::remote::chat::ChatClient;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ask { question } = cmd {
        let question = question.join(" ");
        if question.trim().is_empty() {
            return Err(AppError::Validation("Please type a question".into()));
        }

        let client = ChatClient::new(&cfg.chat)?;
        let reply = advisor::ask(&client, &question);

        print_reply(&reply);

        // the reply is already shown; logging it is best effort
        if let Some(e) = &reply.error {
            if let Ok(pool) = open_db(cfg) {
                ttlog_quiet(&pool.conn, "ask_fallback", "chat", e);
            }
        }
    }
    Ok(())
}
