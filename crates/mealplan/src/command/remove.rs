use larder_db::table::PlannedMeal;
use larder_shared::{Metadata, not_found};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    pub async fn remove(
        &self,
        metadata: &Metadata,
        id: impl Into<String>,
    ) -> larder_shared::Result<()> {
        let tenant_id = metadata.tenant()?;
        let id = id.into();

        let statment = Query::delete()
            .from_table(PlannedMeal::Table)
            .and_where(Expr::col(PlannedMeal::Id).eq(&id))
            .and_where(Expr::col(PlannedMeal::TenantId).eq(&tenant_id))
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            not_found!("planned meal {id}");
        }

        Ok(())
    }
}
