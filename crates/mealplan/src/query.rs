use larder_db::table::PlannedMeal;
use larder_shared::mealplan::MealType;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};
use time::Date;

#[derive(Debug, Clone, FromRow)]
pub struct PlannedMealRow {
    pub id: String,
    pub tenant_id: String,
    pub recipe_id: String,
    pub date: u64,
    pub meal_type: sqlx::types::Text<MealType>,
    pub servings: u32,
    pub created_at: u64,
}

impl PlannedMealRow {
    pub fn day(&self) -> larder_shared::Result<Date> {
        larder_shared::timestamp_to_date(self.date)
    }
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(
        &self,
        tenant_id: impl Into<String>,
        id: impl Into<String>,
    ) -> anyhow::Result<Option<PlannedMealRow>> {
        let mut conn = self.0.acquire().await?;
        find(&mut conn, tenant_id, id).await
    }

    /// Planned meals with `start <= date <= end`, ordered by date then meal type.
    pub async fn filter_range(
        &self,
        tenant_id: impl Into<String>,
        start: Date,
        end: Date,
    ) -> anyhow::Result<Vec<PlannedMealRow>> {
        let mut conn = self.0.acquire().await?;
        filter_range(&mut conn, tenant_id, start, end).await
    }
}

fn select() -> sea_query::SelectStatement {
    sea_query::Query::select()
        .columns([
            PlannedMeal::Id,
            PlannedMeal::TenantId,
            PlannedMeal::RecipeId,
            PlannedMeal::Date,
            PlannedMeal::MealType,
            PlannedMeal::Servings,
            PlannedMeal::CreatedAt,
        ])
        .from(PlannedMeal::Table)
        .to_owned()
}

pub async fn find(
    conn: &mut SqliteConnection,
    tenant_id: impl Into<String>,
    id: impl Into<String>,
) -> anyhow::Result<Option<PlannedMealRow>> {
    let statment = select()
        .and_where(Expr::col(PlannedMeal::Id).eq(id.into()))
        .and_where(Expr::col(PlannedMeal::TenantId).eq(tenant_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, PlannedMealRow, _>(&sql, values)
        .fetch_optional(conn)
        .await?)
}

pub async fn filter_range(
    conn: &mut SqliteConnection,
    tenant_id: impl Into<String>,
    start: Date,
    end: Date,
) -> anyhow::Result<Vec<PlannedMealRow>> {
    let statment = select()
        .and_where(Expr::col(PlannedMeal::TenantId).eq(tenant_id.into()))
        .and_where(Expr::col(PlannedMeal::Date).gte(larder_shared::date_to_timestamp(start)))
        .and_where(Expr::col(PlannedMeal::Date).lte(larder_shared::date_to_timestamp(end)))
        .order_by(PlannedMeal::Date, Order::Asc)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    let mut rows = sqlx::query_as_with::<_, PlannedMealRow, _>(&sql, values)
        .fetch_all(conn)
        .await?;

    // meal types sort by time of day, not alphabetically
    rows.sort_by_key(|row| (row.date, row.meal_type.0));

    Ok(rows)
}
