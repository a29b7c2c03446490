use std::collections::HashMap;

use larder_db::table::{ShoppingList, ShoppingListItem};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;
use time::Date;

use crate::{ListLine, PlannedRecipe, RecipeIngredient, Snapshot, StockItem};

/// Reads the planned meals of the range with their recipes, and the whole
/// inventory. Meals whose recipe is gone contribute nothing.
pub async fn load_snapshot(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    start: Date,
    end: Date,
) -> anyhow::Result<Snapshot> {
    let planned = larder_mealplan::filter_range(&mut *conn, tenant_id, start, end).await?;

    let mut recipes: HashMap<String, Option<(u32, Vec<RecipeIngredient>)>> = HashMap::new();
    let mut meals = Vec::with_capacity(planned.len());

    for meal in planned {
        if !recipes.contains_key(&meal.recipe_id) {
            let recipe = match larder_recipe::find(&mut *conn, tenant_id, &meal.recipe_id).await? {
                Some(recipe) => {
                    let ingredients = larder_recipe::ingredients(&mut *conn, &recipe.id)
                        .await?
                        .into_iter()
                        .map(|i| RecipeIngredient {
                            name: i.name,
                            quantity: i.quantity,
                            unit: i.unit,
                            aisle: i.aisle,
                        })
                        .collect();

                    Some((recipe.base_servings, ingredients))
                }
                None => {
                    tracing::warn!(
                        planned_meal_id = %meal.id,
                        recipe_id = %meal.recipe_id,
                        "planned meal without recipe skipped"
                    );

                    None
                }
            };

            recipes.insert(meal.recipe_id.to_owned(), recipe);
        }

        if let Some(Some((base_servings, ingredients))) = recipes.get(&meal.recipe_id) {
            meals.push(PlannedRecipe {
                base_servings: *base_servings,
                servings: meal.servings,
                ingredients: ingredients.clone(),
            });
        }
    }

    let stock = larder_inventory::list(&mut *conn, tenant_id)
        .await?
        .into_iter()
        .map(|item| StockItem {
            name: item.name,
            unit: item.unit,
            aisle: item.aisle,
            quantity: item.quantity,
            min_quantity: item.min_quantity,
        })
        .collect();

    Ok(Snapshot { meals, stock })
}

pub async fn insert_list(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    start: Date,
    end: Date,
) -> anyhow::Result<String> {
    let id = ulid::Ulid::new().to_string();
    let statment = Query::insert()
        .into_table(ShoppingList::Table)
        .columns([
            ShoppingList::Id,
            ShoppingList::TenantId,
            ShoppingList::StartDate,
            ShoppingList::EndDate,
            ShoppingList::CreatedAt,
        ])
        .values_panic([
            id.to_owned().into(),
            tenant_id.into(),
            larder_shared::date_to_timestamp(start).into(),
            larder_shared::date_to_timestamp(end).into(),
            larder_shared::now().into(),
        ])
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(id)
}

pub async fn insert_items(
    conn: &mut SqliteConnection,
    list_id: &str,
    lines: &[ListLine],
) -> anyhow::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }

    let mut statment = Query::insert()
        .into_table(ShoppingListItem::Table)
        .columns([
            ShoppingListItem::Id,
            ShoppingListItem::ShoppingListId,
            ShoppingListItem::Name,
            ShoppingListItem::Quantity,
            ShoppingListItem::Unit,
            ShoppingListItem::Aisle,
            ShoppingListItem::Origin,
            ShoppingListItem::Checked,
        ])
        .to_owned();

    for line in lines {
        statment.values_panic([
            ulid::Ulid::new().to_string().into(),
            list_id.into(),
            line.name.to_owned().into(),
            line.quantity.into(),
            line.unit.to_owned().into(),
            line.aisle.to_owned().into(),
            line.origin.to_string().into(),
            false.into(),
        ]);
    }

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(())
}

/// Ids of the tenant's lists covering exactly `start..=end`.
pub async fn find_by_range(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    start: Date,
    end: Date,
) -> anyhow::Result<Vec<String>> {
    let statment = Query::select()
        .column(ShoppingList::Id)
        .from(ShoppingList::Table)
        .and_where(Expr::col(ShoppingList::TenantId).eq(tenant_id))
        .and_where(Expr::col(ShoppingList::StartDate).eq(larder_shared::date_to_timestamp(start)))
        .and_where(Expr::col(ShoppingList::EndDate).eq(larder_shared::date_to_timestamp(end)))
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, String, _>(&sql, values)
        .fetch_all(conn)
        .await?)
}

/// Deletes a list of the tenant and its items. Returns false when there was
/// no such list.
pub async fn delete_list(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    list_id: &str,
) -> anyhow::Result<bool> {
    let statment = Query::delete()
        .from_table(ShoppingListItem::Table)
        .and_where(Expr::col(ShoppingListItem::ShoppingListId).in_subquery(owned(tenant_id, list_id)))
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let statment = Query::delete()
        .from_table(ShoppingList::Table)
        .and_where(Expr::col(ShoppingList::Id).eq(list_id))
        .and_where(Expr::col(ShoppingList::TenantId).eq(tenant_id))
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(result.rows_affected() > 0)
}

/// `SELECT id FROM shopping_list` restricted to one list of one tenant, used
/// to authorize access to items.
pub(crate) fn owned(tenant_id: &str, list_id: &str) -> sea_query::SelectStatement {
    Query::select()
        .column(ShoppingList::Id)
        .from(ShoppingList::Table)
        .and_where(Expr::col(ShoppingList::Id).eq(list_id))
        .and_where(Expr::col(ShoppingList::TenantId).eq(tenant_id))
        .to_owned()
}
