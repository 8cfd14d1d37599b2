//! Replication endpoint command handler

use crate::api;
use crate::config::Config;

pub async fn cmd_serve(config: &Config) -> anyhow::Result<()> {
    api::serve(&config.server).await
}
