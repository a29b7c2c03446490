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

#[allow(dead_code)]
pub fn ingredient(name: &str, quantity: Option<f64>, unit: Option<&str>) -> IngredientInput {
    IngredientInput {
        name: name.to_owned(),
        quantity,
        unit: unit.map(ToOwned::to_owned),
        aisle: None,
    }
}

#[allow(dead_code)]
pub async fn create_recipe(
    cmd: &larder_recipe::Command,
    tenant_id: &str,
    name: &str,
    base_servings: u32,
    ingredients: Vec<IngredientInput>,
) -> anyhow::Result<String> {
    Ok(cmd
        .create(
            &Metadata::by(tenant_id),
            CreateInput {
                name: name.to_owned(),
                base_servings,
                ingredients,
            },
        )
        .await?)
}
