//! Credential check command handler

use crate::config::Config;
use crate::services::Session;

use super::open_store;

pub async fn cmd_login(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let mut session = Session::new();
    match session.login(&store, username, password).await? {
        Some(user) => {
            println!("Welcome, {}!", user.username);
            if let Some(name) = &user.full_name {
                println!("  Name:      {name}");
            }
            println!("  Birthdate: {}", user.birthdate);
            if let Some(email) = &user.email {
                println!("  Email:     {email}");
            }
            println!("  Member since {}", user.created_at);
        }
        None => println!("Invalid credentials."),
    }

    Ok(())
}
