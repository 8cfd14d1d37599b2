//! History listing command handler

use crate::config::Config;
use crate::services::Session;

use super::open_store;

pub async fn cmd_list_vitals(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let mut session = Session::new();
    let Some(user) = session.login(&store, username, password).await? else {
        println!("Invalid credentials.");
        return Ok(());
    };
    let user_id = user.id;

    let vitals = store.list_vitals(user_id).await?;

    if vitals.is_empty() {
        println!("No readings recorded yet.");
        println!();
        println!("Record one with: vitalog add -u <user> -p <pass> --pressure \"120/80\"");
        return Ok(());
    }

    println!("Reading history ({} total)", vitals.len());
    println!("{:-<70}", "");

    for vital in vitals {
        let mut parts = Vec::new();
        if let Some(systolic) = vital.pressure_systolic {
            let diastolic = vital
                .pressure_diastolic
                .map(|d| d.to_string())
                .unwrap_or_default();
            parts.push(format!("BP {systolic}/{diastolic}"));
        }
        if let Some(glucose) = vital.glucose {
            parts.push(format!("Glucose {glucose} mg/dL"));
        }
        if let Some(notes) = &vital.notes {
            parts.push(notes.clone());
        }

        let summary = if parts.is_empty() {
            "(no values)".to_string()
        } else {
            parts.join(" | ")
        };
        println!("{}  {}", vital.date, summary);
    }

    Ok(())
}
