use larder_db::table::{Ingredient, Recipe};
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeRow {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub base_servings: u32,
    pub created_at: u64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IngredientRow {
    pub id: String,
    pub recipe_id: String,
    pub position: u32,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub aisle: Option<String>,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(
        &self,
        tenant_id: impl Into<String>,
        id: impl Into<String>,
    ) -> anyhow::Result<Option<RecipeRow>> {
        let mut conn = self.0.acquire().await?;
        find(&mut conn, tenant_id, id).await
    }

    pub async fn list(&self, tenant_id: impl Into<String>) -> anyhow::Result<Vec<RecipeRow>> {
        let statment = sea_query::Query::select()
            .columns([
                Recipe::Id,
                Recipe::TenantId,
                Recipe::Name,
                Recipe::BaseServings,
                Recipe::CreatedAt,
            ])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::TenantId).eq(tenant_id.into()))
            .order_by(Recipe::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn ingredients(
        &self,
        recipe_id: impl Into<String>,
    ) -> anyhow::Result<Vec<IngredientRow>> {
        let mut conn = self.0.acquire().await?;
        ingredients(&mut conn, recipe_id).await
    }
}

/// Recipe owned by `tenant_id`. A recipe of another tenant reads as absent.
pub async fn find(
    conn: &mut SqliteConnection,
    tenant_id: impl Into<String>,
    id: impl Into<String>,
) -> anyhow::Result<Option<RecipeRow>> {
    let statment = sea_query::Query::select()
        .columns([
            Recipe::Id,
            Recipe::TenantId,
            Recipe::Name,
            Recipe::BaseServings,
            Recipe::CreatedAt,
        ])
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id.into()))
        .and_where(Expr::col(Recipe::TenantId).eq(tenant_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(conn)
        .await?)
}

pub async fn ingredients(
    conn: &mut SqliteConnection,
    recipe_id: impl Into<String>,
) -> anyhow::Result<Vec<IngredientRow>> {
    let statment = sea_query::Query::select()
        .columns([
            Ingredient::Id,
            Ingredient::RecipeId,
            Ingredient::Position,
            Ingredient::Name,
            Ingredient::Quantity,
            Ingredient::Unit,
            Ingredient::Aisle,
        ])
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::RecipeId).eq(recipe_id.into()))
        .order_by(Ingredient::Position, Order::Asc)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_all(conn)
        .await?)
}
