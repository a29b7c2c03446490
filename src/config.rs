use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use larder_shared::{mealplan::SlotPolicy, shopping::GenerationMode};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShoppingConfig {
    /// `atomic` or `pipeline`
    #[serde(default)]
    pub generation: GenerationMode,
    /// Rows per insert statement for the pipeline generator
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            generation: GenerationMode::default(),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_chunk_size() -> usize {
    larder_shopping::DEFAULT_CHUNK_SIZE
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerConfig {
    /// `reject` or `replace`
    #[serde(default)]
    pub slot_policy: SlotPolicy,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LARDER__DATABASE__URL, DATABASE_URL)
    /// 2. Config file specified by path or CONFIG_PATH
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("database.url", "sqlite:larder.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Missing file is fine, defaults and env still apply
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LARDER")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.shopping.chunk_size < 1 {
            return Err("Shopping chunk_size must be at least 1".to_string());
        }
        Ok(())
    }

    /// Generator selected by `shopping.generation`.
    pub fn generator(&self, pool: sqlx::SqlitePool) -> Box<dyn larder_shopping::Generator> {
        match self.shopping.generation {
            GenerationMode::Atomic => Box::new(larder_shopping::AtomicGenerator(pool)),
            GenerationMode::Pipeline => Box::new(
                larder_shopping::PipelineGenerator::new(pool).chunk_size(self.shopping.chunk_size),
            ),
        }
    }
}
