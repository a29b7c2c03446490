use larder_db::table::{InventoryItem, InventoryTransaction};
use larder_shared::inventory::{InventoryCategory, TransactionKind};
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};
use time::Date;

#[derive(Debug, Clone, FromRow)]
pub struct InventoryItemRow {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub name_key: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_key: String,
    pub category: sqlx::types::Text<InventoryCategory>,
    pub aisle: Option<String>,
    pub min_quantity: f64,
    pub expires_on: Option<u64>,
    pub location: Option<String>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl InventoryItemRow {
    pub fn is_low_stock(&self) -> bool {
        self.min_quantity > 0.0 && self.quantity <= self.min_quantity
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TransactionRow {
    pub id: String,
    pub inventory_id: String,
    pub kind: sqlx::types::Text<TransactionKind>,
    pub quantity: f64,
    pub requested_quantity: f64,
    pub quantity_before: f64,
    pub quantity_after: f64,
    pub planned_meal_id: Option<String>,
    pub note: Option<String>,
    pub created_at: u64,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(
        &self,
        tenant_id: impl Into<String>,
        id: impl Into<String>,
    ) -> anyhow::Result<Option<InventoryItemRow>> {
        let mut conn = self.0.acquire().await?;
        find(&mut conn, tenant_id, id).await
    }

    pub async fn find_by_name(
        &self,
        tenant_id: impl Into<String>,
        name: &str,
        unit: Option<&str>,
    ) -> anyhow::Result<Option<InventoryItemRow>> {
        let mut conn = self.0.acquire().await?;
        find_by_key(
            &mut conn,
            tenant_id,
            larder_shared::normalize::normalize_ingredient_name(name),
            larder_shared::normalize::normalize_unit(unit),
        )
        .await
    }

    pub async fn list(&self, tenant_id: impl Into<String>) -> anyhow::Result<Vec<InventoryItemRow>> {
        let mut conn = self.0.acquire().await?;
        list(&mut conn, tenant_id).await
    }

    /// Items with a positive minimum whose quantity fell to or below it.
    pub async fn low_stock(
        &self,
        tenant_id: impl Into<String>,
    ) -> anyhow::Result<Vec<InventoryItemRow>> {
        let statment = select()
            .and_where(Expr::col(InventoryItem::TenantId).eq(tenant_id.into()))
            .and_where(Expr::col(InventoryItem::MinQuantity).gt(0.0))
            .and_where(Expr::col(InventoryItem::Quantity).lte(Expr::col(InventoryItem::MinQuantity)))
            .order_by(InventoryItem::NameKey, Order::Asc)
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, InventoryItemRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Items expiring on or before `before`, soonest first.
    pub async fn expiring(
        &self,
        tenant_id: impl Into<String>,
        before: Date,
    ) -> anyhow::Result<Vec<InventoryItemRow>> {
        let statment = select()
            .and_where(Expr::col(InventoryItem::TenantId).eq(tenant_id.into()))
            .and_where(Expr::col(InventoryItem::ExpiresOn).is_not_null())
            .and_where(
                Expr::col(InventoryItem::ExpiresOn).lte(larder_shared::date_to_timestamp(before)),
            )
            .order_by(InventoryItem::ExpiresOn, Order::Asc)
            .order_by(InventoryItem::NameKey, Order::Asc)
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, InventoryItemRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Ledger of one item, newest first.
    pub async fn history(
        &self,
        tenant_id: impl Into<String>,
        id: impl Into<String>,
    ) -> anyhow::Result<Vec<TransactionRow>> {
        let owned = sea_query::Query::select()
            .column(InventoryItem::Id)
            .from(InventoryItem::Table)
            .and_where(Expr::col(InventoryItem::Id).eq(id.into()))
            .and_where(Expr::col(InventoryItem::TenantId).eq(tenant_id.into()))
            .to_owned();

        let statment = sea_query::Query::select()
            .columns([
                InventoryTransaction::Id,
                InventoryTransaction::InventoryId,
                InventoryTransaction::Kind,
                InventoryTransaction::Quantity,
                InventoryTransaction::RequestedQuantity,
                InventoryTransaction::QuantityBefore,
                InventoryTransaction::QuantityAfter,
                InventoryTransaction::PlannedMealId,
                InventoryTransaction::Note,
                InventoryTransaction::CreatedAt,
            ])
            .from(InventoryTransaction::Table)
            .and_where(Expr::col(InventoryTransaction::InventoryId).in_subquery(owned))
            .order_by(InventoryTransaction::CreatedAt, Order::Desc)
            .order_by_expr(Expr::cust("rowid"), Order::Desc)
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TransactionRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}

fn select() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            InventoryItem::Id,
            InventoryItem::TenantId,
            InventoryItem::Name,
            InventoryItem::NameKey,
            InventoryItem::Quantity,
            InventoryItem::Unit,
            InventoryItem::UnitKey,
            InventoryItem::Category,
            InventoryItem::Aisle,
            InventoryItem::MinQuantity,
            InventoryItem::ExpiresOn,
            InventoryItem::Location,
            InventoryItem::CreatedAt,
            InventoryItem::UpdatedAt,
        ])
        .from(InventoryItem::Table)
        .to_owned()
}

pub async fn find(
    conn: &mut SqliteConnection,
    tenant_id: impl Into<String>,
    id: impl Into<String>,
) -> anyhow::Result<Option<InventoryItemRow>> {
    let statment = select()
        .and_where(Expr::col(InventoryItem::Id).eq(id.into()))
        .and_where(Expr::col(InventoryItem::TenantId).eq(tenant_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, InventoryItemRow, _>(&sql, values)
        .fetch_optional(conn)
        .await?)
}

/// Lookup by merge key: normalized ingredient name and normalized unit.
pub async fn find_by_key(
    conn: &mut SqliteConnection,
    tenant_id: impl Into<String>,
    name_key: impl Into<String>,
    unit_key: impl Into<String>,
) -> anyhow::Result<Option<InventoryItemRow>> {
    let statment = select()
        .and_where(Expr::col(InventoryItem::TenantId).eq(tenant_id.into()))
        .and_where(Expr::col(InventoryItem::NameKey).eq(name_key.into()))
        .and_where(Expr::col(InventoryItem::UnitKey).eq(unit_key.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, InventoryItemRow, _>(&sql, values)
        .fetch_optional(conn)
        .await?)
}

pub async fn list(
    conn: &mut SqliteConnection,
    tenant_id: impl Into<String>,
) -> anyhow::Result<Vec<InventoryItemRow>> {
    let statment = select()
        .and_where(Expr::col(InventoryItem::TenantId).eq(tenant_id.into()))
        .order_by(InventoryItem::NameKey, Order::Asc)
        .order_by(InventoryItem::UnitKey, Order::Asc)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, InventoryItemRow, _>(&sql, values)
        .fetch_all(conn)
        .await?)
}
