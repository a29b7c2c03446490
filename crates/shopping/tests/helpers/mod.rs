use std::{path::PathBuf, str::FromStr};

use larder_inventory::CreateInput;
use larder_mealplan::ScheduleInput;
use larder_recipe::IngredientInput;
use larder_shared::{
    Metadata,
    mealplan::{MealType, SlotPolicy},
};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use time::Date;

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
pub fn ingredient(
    name: &str,
    quantity: Option<f64>,
    unit: Option<&str>,
    aisle: Option<&str>,
) -> IngredientInput {
    IngredientInput {
        name: name.to_owned(),
        quantity,
        unit: unit.map(ToOwned::to_owned),
        aisle: aisle.map(ToOwned::to_owned),
    }
}

#[allow(dead_code)]
pub async fn create_recipe(
    pool: &SqlitePool,
    tenant_id: &str,
    name: &str,
    base_servings: u32,
    ingredients: Vec<IngredientInput>,
) -> anyhow::Result<String> {
    Ok(larder_recipe::Command(pool.clone())
        .create(
            &Metadata::by(tenant_id),
            larder_recipe::CreateInput {
                name: name.to_owned(),
                base_servings,
                ingredients,
            },
        )
        .await?)
}

#[allow(dead_code)]
pub async fn schedule(
    pool: &SqlitePool,
    tenant_id: &str,
    recipe_id: &str,
    date: Date,
    meal_type: MealType,
    servings: u32,
) -> anyhow::Result<String> {
    Ok(larder_mealplan::Command(pool.clone())
        .schedule(
            &Metadata::by(tenant_id),
            ScheduleInput {
                recipe_id: recipe_id.to_owned(),
                date,
                meal_type,
                servings,
            },
            SlotPolicy::Reject,
        )
        .await?)
}

#[allow(dead_code)]
pub async fn stock(
    pool: &SqlitePool,
    tenant_id: &str,
    name: &str,
    quantity: f64,
    unit: Option<&str>,
    min_quantity: f64,
) -> anyhow::Result<String> {
    Ok(larder_inventory::Command(pool.clone())
        .create(
            &Metadata::by(tenant_id),
            CreateInput {
                name: name.to_owned(),
                quantity,
                unit: unit.map(ToOwned::to_owned),
                min_quantity,
                ..Default::default()
            },
        )
        .await?)
}

/// Items of a list as comparable tuples, sorted.
#[allow(dead_code)]
pub async fn item_set(
    pool: &SqlitePool,
    tenant_id: &str,
    list_id: &str,
) -> anyhow::Result<Vec<(String, String, Option<String>, Option<String>, String)>> {
    let mut items = larder_shopping::Query(pool.clone())
        .items(tenant_id, list_id)
        .await?
        .into_iter()
        .map(|item| {
            (
                item.name,
                format!("{:.2}", item.quantity),
                item.unit,
                item.aisle,
                item.origin.0.to_string(),
            )
        })
        .collect::<Vec<_>>();
    items.sort();

    Ok(items)
}

/// A week with a few overlapping recipes and some stock.
#[allow(dead_code)]
pub async fn seed_week(pool: &SqlitePool, tenant_id: &str) -> anyhow::Result<()> {
    let soupe = create_recipe(
        pool,
        tenant_id,
        "Soupe à l'oignon",
        4,
        vec![
            ingredient("Oignons", Some(6.0), None, Some("produce")),
            ingredient("Beurre", Some(50.0), Some("g"), Some("dairy")),
            ingredient("Bouillon", Some(1.0), Some("litre"), None),
        ],
    )
    .await?;
    let tarte = create_recipe(
        pool,
        tenant_id,
        "Tarte aux tomates",
        6,
        vec![
            ingredient("tomatoes", Some(3.0), None, Some("produce")),
            ingredient("Onion", Some(1.0), None, None),
            ingredient("butter", Some(30.0), Some("grams"), None),
            ingredient("Sel", None, Some("pincée"), Some("spices")),
        ],
    )
    .await?;

    schedule(pool, tenant_id, &soupe, time::macros::date!(2024 - 01 - 01), MealType::Dinner, 2).await?;
    schedule(pool, tenant_id, &tarte, time::macros::date!(2024 - 01 - 02), MealType::Lunch, 3).await?;
    schedule(pool, tenant_id, &soupe, time::macros::date!(2024 - 01 - 05), MealType::Dinner, 4).await?;
    schedule(pool, tenant_id, &tarte, time::macros::date!(2024 - 01 - 09), MealType::Dinner, 6).await?;

    stock(pool, tenant_id, "oignon", 2.0, None, 0.0).await?;
    stock(pool, tenant_id, "Beurre", 500.0, Some("g"), 0.0).await?;
    stock(pool, tenant_id, "Lessive", 1.0, None, 2.0).await?;

    Ok(())
}
