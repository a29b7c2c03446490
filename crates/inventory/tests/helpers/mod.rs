use std::{path::PathBuf, str::FromStr, time::Duration};

use larder_inventory::CreateInput;
use larder_mealplan::ScheduleInput;
use larder_recipe::IngredientInput;
use larder_shared::{
    Metadata,
    mealplan::{MealType, SlotPolicy},
};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(10))
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(opts)
        .await?;
    let mut conn = pool.acquire().await?;
    larder_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

#[allow(dead_code)]
pub async fn create_item(
    pool: &SqlitePool,
    tenant_id: &str,
    name: &str,
    quantity: f64,
    unit: Option<&str>,
) -> anyhow::Result<String> {
    Ok(larder_inventory::Command(pool.clone())
        .create(
            &Metadata::by(tenant_id),
            CreateInput {
                name: name.to_owned(),
                quantity,
                unit: unit.map(ToOwned::to_owned),
                ..Default::default()
            },
        )
        .await?)
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

/// Creates a recipe and plans it for dinner on 2024-01-01.
#[allow(dead_code)]
pub async fn plan_meal(
    pool: &SqlitePool,
    tenant_id: &str,
    base_servings: u32,
    servings: u32,
    ingredients: Vec<IngredientInput>,
) -> anyhow::Result<String> {
    let metadata = Metadata::by(tenant_id);
    let recipe_id = larder_recipe::Command(pool.clone())
        .create(
            &metadata,
            larder_recipe::CreateInput {
                name: "Dîner".to_owned(),
                base_servings,
                ingredients,
            },
        )
        .await?;

    Ok(larder_mealplan::Command(pool.clone())
        .schedule(
            &metadata,
            ScheduleInput {
                recipe_id,
                date: time::macros::date!(2024 - 01 - 01),
                meal_type: MealType::Dinner,
                servings,
            },
            SlotPolicy::Reject,
        )
        .await?)
}
