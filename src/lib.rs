pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod parser;
pub mod services;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};
pub use config::Config;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    // .env is optional; the only variable read is VITALOG_BACKEND_URL.
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Register {
            username,
            password,
            birthdate,
            full_name,
            email,
        } => {
            cli::cmd_register(&config, &username, &password, &birthdate, full_name, email).await
        }

        Commands::Login { username, password } => {
            cli::cmd_login(&config, &username, &password).await
        }

        Commands::Add {
            username,
            password,
            date,
            pressure,
            glucose,
            notes,
        } => {
            cli::cmd_add_vital(&config, &username, &password, date, pressure, glucose, notes).await
        }

        Commands::List { username, password } => {
            cli::cmd_list_vitals(&config, &username, &password).await
        }

        Commands::Export {
            username,
            password,
            output,
        } => cli::cmd_export(&config, &username, &password, output).await,

        Commands::Sync => cli::cmd_sync(&config).await,

        Commands::Outbox { limit } => cli::cmd_outbox(&config, limit).await,

        Commands::Serve => cli::cmd_serve(&config).await,

        Commands::Init => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }
    }
}
