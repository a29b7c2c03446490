use larder_db::table::{InventoryItem, InventoryTransaction};
use larder_shared::{Metadata, not_found};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Removes an item together with its ledger.
    pub async fn delete(
        &self,
        metadata: &Metadata,
        id: impl Into<String>,
    ) -> larder_shared::Result<()> {
        let tenant_id = metadata.tenant()?;
        let id = id.into();

        let mut tx = self.0.begin().await?;

        let owned = Query::select()
            .column(InventoryItem::Id)
            .from(InventoryItem::Table)
            .and_where(Expr::col(InventoryItem::Id).eq(&id))
            .and_where(Expr::col(InventoryItem::TenantId).eq(&tenant_id))
            .to_owned();

        let statment = Query::delete()
            .from_table(InventoryTransaction::Table)
            .and_where(Expr::col(InventoryTransaction::InventoryId).in_subquery(owned))
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statment = Query::delete()
            .from_table(InventoryItem::Table)
            .and_where(Expr::col(InventoryItem::Id).eq(&id))
            .and_where(Expr::col(InventoryItem::TenantId).eq(&tenant_id))
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            not_found!("inventory item {id}");
        }

        tx.commit().await?;

        Ok(())
    }
}
