//! Database migration utilities

use sqlx::sqlite::SqliteConnectOptions;
use sqlx_migrator::{Migrate, Plan};
use std::str::FromStr;

use crate::config::Config;

/// Apply every pending migration, creating the database file if needed.
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;

    larder_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    drop(conn);
    pool.close().await;

    tracing::info!("Migrated {}", config.database.url);

    Ok(())
}

/// Drop the database file and migrate from scratch.
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?;
    let path = options.get_filename();

    if path.exists() {
        for suffix in ["", "-wal", "-shm"] {
            let file = format!("{}{suffix}", path.display());
            if std::path::Path::new(&file).exists() {
                std::fs::remove_file(&file)?;
            }
        }
        tracing::info!("Dropped database: {}", path.display());
    }

    migrate(config).await
}
