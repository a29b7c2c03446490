use larder_db::table::ShoppingListItem;
use larder_shared::{Metadata, not_found};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Unchecks every item of a list.
    pub async fn reset(
        &self,
        metadata: &Metadata,
        list_id: impl Into<String>,
    ) -> larder_shared::Result<()> {
        let tenant_id = metadata.tenant()?;
        let list_id = list_id.into();

        if crate::Query(self.0.clone())
            .find(&tenant_id, &list_id)
            .await?
            .is_none()
        {
            not_found!("shopping list {list_id}");
        }

        let statment = Query::update()
            .table(ShoppingListItem::Table)
            .values([(ShoppingListItem::Checked, false.into())])
            .and_where(
                Expr::col(ShoppingListItem::ShoppingListId)
                    .in_subquery(crate::store::owned(&tenant_id, &list_id)),
            )
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }
}
