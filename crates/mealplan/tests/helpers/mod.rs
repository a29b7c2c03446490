use std::{path::PathBuf, str::FromStr};

use larder_recipe::{CreateInput, IngredientInput};
use larder_shared::Metadata;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    larder_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

pub async fn create_recipe(
    pool: &SqlitePool,
    tenant_id: &str,
    name: &str,
) -> anyhow::Result<String> {
    Ok(larder_recipe::Command(pool.clone())
        .create(
            &Metadata::by(tenant_id),
            CreateInput {
                name: name.to_owned(),
                base_servings: 4,
                ingredients: vec![IngredientInput {
                    name: "Oignon".to_owned(),
                    quantity: Some(1.0),
                    unit: None,
                    aisle: Some("produce".to_owned()),
                }],
            },
        )
        .await?)
}
