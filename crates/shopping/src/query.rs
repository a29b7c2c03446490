use larder_db::table::{ShoppingList, ShoppingListItem};
use larder_shared::shopping::Origin;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::Date;

#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListRow {
    pub id: String,
    pub tenant_id: String,
    pub start_date: u64,
    pub end_date: u64,
    pub created_at: u64,
}

impl ShoppingListRow {
    pub fn start(&self) -> larder_shared::Result<Date> {
        larder_shared::timestamp_to_date(self.start_date)
    }

    pub fn end(&self) -> larder_shared::Result<Date> {
        larder_shared::timestamp_to_date(self.end_date)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListItemRow {
    pub id: String,
    pub shopping_list_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub aisle: Option<String>,
    pub origin: sqlx::types::Text<Origin>,
    pub checked: bool,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(
        &self,
        tenant_id: impl Into<String>,
        id: impl Into<String>,
    ) -> anyhow::Result<Option<ShoppingListRow>> {
        let statment = select()
            .and_where(Expr::col(ShoppingList::Id).eq(id.into()))
            .and_where(Expr::col(ShoppingList::TenantId).eq(tenant_id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ShoppingListRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    /// Lists of the tenant, newest first.
    pub async fn filter(
        &self,
        tenant_id: impl Into<String>,
    ) -> anyhow::Result<Vec<ShoppingListRow>> {
        let statment = select()
            .and_where(Expr::col(ShoppingList::TenantId).eq(tenant_id.into()))
            .order_by(ShoppingList::CreatedAt, Order::Desc)
            .order_by_expr(Expr::cust("rowid"), Order::Desc)
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ShoppingListRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Items of a list grouped by aisle, items without aisle last.
    pub async fn items(
        &self,
        tenant_id: impl Into<String>,
        list_id: impl Into<String>,
    ) -> anyhow::Result<Vec<ShoppingListItemRow>> {
        let tenant_id = tenant_id.into();
        let list_id = list_id.into();

        let statment = sea_query::Query::select()
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
            .from(ShoppingListItem::Table)
            .and_where(
                Expr::col(ShoppingListItem::ShoppingListId)
                    .in_subquery(crate::store::owned(&tenant_id, &list_id)),
            )
            .order_by_expr(Expr::col(ShoppingListItem::Aisle).is_null(), Order::Asc)
            .order_by(ShoppingListItem::Aisle, Order::Asc)
            .order_by(ShoppingListItem::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ShoppingListItemRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}

fn select() -> sea_query::SelectStatement {
    sea_query::Query::select()
        .columns([
            ShoppingList::Id,
            ShoppingList::TenantId,
            ShoppingList::StartDate,
            ShoppingList::EndDate,
            ShoppingList::CreatedAt,
        ])
        .from(ShoppingList::Table)
        .to_owned()
}
