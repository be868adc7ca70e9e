//! Applies or reverts the schema migrations against the configured database.
//!
//! Usage: `migration [up|down|fresh|status]` (default `up`).

use anyhow::{bail, Context};
use migrations::{Migrator, MigratorTrait};
use modulaptop_store::{config, db};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    info!("Starting database migration: {}", command);

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to database")?;

    match command.as_str() {
        "up" => Migrator::up(&pool, None).await?,
        "down" => Migrator::down(&pool, Some(1)).await?,
        "fresh" => Migrator::fresh(&pool).await?,
        "status" => Migrator::status(&pool).await?,
        other => bail!("unknown migration command '{other}', expected up, down, fresh or status"),
    }

    info!("Migration completed successfully");
    Ok(())
}
