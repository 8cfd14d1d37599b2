//! Record-a-reading command handler

use crate::config::Config;
use crate::models::outbox::{OutboxPayload, VitalPayload};
use crate::parser::{parse_glucose, parse_pressure};
use crate::services::Session;

use super::{open_store, sync_after_mutation};

pub async fn cmd_add_vital(
    config: &Config,
    username: &str,
    password: &str,
    date: Option<String>,
    pressure: Option<String>,
    glucose: Option<String>,
    notes: Option<String>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let mut session = Session::new();
    let Some(user) = session.login(&store, username, password).await? else {
        println!("Invalid credentials. Log in to record readings.");
        return Ok(());
    };
    let user_id = user.id;
    let user_external = user.username.clone();

    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string());
    let pressure_text = pressure.unwrap_or_default();
    let glucose_text = glucose.unwrap_or_default();
    let notes_text = notes.unwrap_or_default();

    let vital_id = store
        .add_vital(user_id, &date, &pressure_text, &glucose_text, &notes_text)
        .await?;

    println!("✓ Reading saved (id={vital_id})");

    // The payload carries the parsed values, not the raw form text.
    let (systolic, diastolic) = parse_pressure(&pressure_text);
    let payload = OutboxPayload::Vital(VitalPayload {
        user_external,
        date,
        pressure_systolic: systolic,
        pressure_diastolic: diastolic,
        glucose: parse_glucose(&glucose_text),
        notes: {
            let trimmed = notes_text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        },
    });
    store.enqueue(vital_id, &payload).await?;

    let synced = sync_after_mutation(config, &store).await?;
    if synced > 0 {
        println!("Replicated {synced} pending entries to the backend.");
    } else if config.sync.after_mutation {
        println!("Backend offline, reading queued for a later sync.");
    }

    Ok(())
}
