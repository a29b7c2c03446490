pub mod inventory;
pub mod meal;
pub mod shopping;

use larder_shared::Metadata;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::config::Config;

/// Everything a subcommand needs once configuration is loaded.
pub struct Context {
    pub config: Config,
    pub metadata: Metadata,
    pub write_pool: SqlitePool,
    pub read_pool: SqlitePool,
    pub json: bool,
}

impl Context {
    pub async fn connect(config: Config, tenant: Option<String>, json: bool) -> anyhow::Result<Self> {
        let write_pool = crate::db::create_write_pool(&config.database.url).await?;
        let read_pool =
            crate::db::create_read_pool(&config.database.url, config.database.max_connections)
                .await?;

        Ok(Self {
            config,
            metadata: Metadata::new(tenant),
            write_pool,
            read_pool,
            json,
        })
    }

    pub fn tenant(&self) -> anyhow::Result<String> {
        Ok(self.metadata.tenant()?)
    }

    /// Prints `value` as JSON when `--json` was given, `text` otherwise.
    pub fn print<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }

        Ok(())
    }
}

pub(crate) fn quantity(quantity: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{quantity} {unit}"),
        None => format!("{quantity}"),
    }
}
