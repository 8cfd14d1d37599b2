//! CSV export command handler

use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::services::{ExportService, Session};

use super::open_store;

pub async fn cmd_export(
    config: &Config,
    username: &str,
    password: &str,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let mut session = Session::new();
    let Some(user) = session.login(&store, username, password).await? else {
        println!("Invalid credentials.");
        return Ok(());
    };
    let user_id = user.id;

    let csv = ExportService::new(store).csv_for_user(user_id).await?;

    match output {
        Some(path) => {
            std::fs::write(&path, &csv)?;
            println!("✓ History exported to {}", path.display());
        }
        None => {
            std::io::stdout().write_all(&csv)?;
        }
    }

    Ok(())
}
