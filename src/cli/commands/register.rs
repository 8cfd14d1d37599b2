//! Account registration command handler

use crate::config::Config;
use crate::db::{NewUser, StoreError};
use crate::models::outbox::{OutboxPayload, UserPayload};

use super::{open_store, sync_after_mutation};

pub async fn cmd_register(
    config: &Config,
    username: &str,
    password: &str,
    birthdate: &str,
    full_name: Option<String>,
    email: Option<String>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let full_name = full_name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let email = email.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let new = NewUser {
        username: username.trim().to_string(),
        password: password.trim().to_string(),
        full_name: full_name.clone(),
        birthdate: birthdate.trim().to_string(),
        email: email.clone(),
    };

    let user_id = match store.register_user(&new).await {
        Ok(id) => id,
        Err(StoreError::Validation(errors)) => {
            println!("Could not register:");
            for error in errors {
                println!("  - {error}");
            }
            return Ok(());
        }
        Err(StoreError::DuplicateUser(name)) => {
            println!("Username '{name}' already exists. Pick another one.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!("✓ Account created (id={user_id})");

    let payload = OutboxPayload::User(UserPayload {
        username: new.username,
        password: new.password,
        full_name,
        birthdate: new.birthdate,
        email,
    });
    store.enqueue(user_id, &payload).await?;

    let synced = sync_after_mutation(config, &store).await?;
    if synced > 0 {
        println!("Replicated {synced} pending entries to the backend.");
    } else if config.sync.after_mutation {
        println!("Backend offline, account queued for a later sync.");
    }

    Ok(())
}
