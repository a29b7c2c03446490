use larder::config::{Config, DatabaseConfig, ObservabilityConfig, PlannerConfig, ShoppingConfig};
use larder_shared::{Metadata, shopping::GenerationMode};
use temp_dir::TempDir;

pub fn config(dir: &TempDir, generation: GenerationMode) -> Config {
    Config {
        database: DatabaseConfig {
            url: format!("sqlite:{}", dir.child("larder.db").to_str().unwrap()),
            max_connections: 2,
        },
        observability: ObservabilityConfig::default(),
        shopping: ShoppingConfig {
            generation,
            chunk_size: 2,
        },
        planner: PlannerConfig::default(),
    }
}

/// A recipe for four with pasta and basil, planned for two on 2024-01-03.
pub async fn seed(config: &Config, tenant_id: &str) -> anyhow::Result<String> {
    let pool = larder::create_pool(&config.database.url, 1).await?;
    let metadata = Metadata::by(tenant_id);

    let recipe_id = larder_recipe::Command(pool.clone())
        .create(
            &metadata,
            larder_recipe::CreateInput {
                name: "Pasta".to_owned(),
                base_servings: 4,
                ingredients: vec![
                    larder_recipe::IngredientInput {
                        name: "Pâtes".to_owned(),
                        quantity: Some(400.0),
                        unit: Some("g".to_owned()),
                        aisle: Some("dry_goods".to_owned()),
                    },
                    larder_recipe::IngredientInput {
                        name: "Basilic".to_owned(),
                        quantity: Some(1.0),
                        unit: None,
                        aisle: Some("produce".to_owned()),
                    },
                ],
            },
        )
        .await?;

    larder_inventory::Command(pool.clone())
        .create(
            &metadata,
            larder_inventory::CreateInput {
                name: "pâtes".to_owned(),
                quantity: 300.0,
                unit: Some("g".to_owned()),
                min_quantity: 400.0,
                ..Default::default()
            },
        )
        .await?;

    pool.close().await;

    Ok(recipe_id)
}
