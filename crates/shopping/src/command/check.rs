use larder_db::table::{ShoppingList, ShoppingListItem};
use larder_shared::{Metadata, not_found};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    pub async fn check(
        &self,
        metadata: &Metadata,
        item_id: impl Into<String>,
        checked: bool,
    ) -> larder_shared::Result<()> {
        let tenant_id = metadata.tenant()?;
        let item_id = item_id.into();

        let owned = Query::select()
            .column(ShoppingList::Id)
            .from(ShoppingList::Table)
            .and_where(Expr::col(ShoppingList::TenantId).eq(&tenant_id))
            .to_owned();

        let statment = Query::update()
            .table(ShoppingListItem::Table)
            .values([(ShoppingListItem::Checked, checked.into())])
            .and_where(Expr::col(ShoppingListItem::Id).eq(&item_id))
            .and_where(Expr::col(ShoppingListItem::ShoppingListId).in_subquery(owned))
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            not_found!("shopping list item {item_id}");
        }

        Ok(())
    }
}
