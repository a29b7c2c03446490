use larder_db::table::InventoryItem;
use larder_shared::{Error, Metadata, inventory::InventoryCategory, normalize, not_found};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::Date;
use validator::Validate;

/// Descriptive fields of an item. The quantity only moves through the ledger.
#[derive(Validate, Clone, Debug, Default)]
pub struct UpdateInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub unit: Option<String>,
    pub category: InventoryCategory,
    pub aisle: Option<String>,
    #[validate(range(min = 0.0))]
    pub min_quantity: f64,
    pub expires_on: Option<Date>,
    pub location: Option<String>,
}

impl super::Command {
    pub async fn update(
        &self,
        metadata: &Metadata,
        id: impl Into<String>,
        input: UpdateInput,
    ) -> larder_shared::Result<()> {
        input.validate()?;
        let tenant_id = metadata.tenant()?;
        let id = id.into();
        let name = input.name.trim().to_owned();

        let statment = Query::update()
            .table(InventoryItem::Table)
            .values([
                (InventoryItem::Name, name.to_owned().into()),
                (
                    InventoryItem::NameKey,
                    normalize::normalize_ingredient_name(&name).into(),
                ),
                (
                    InventoryItem::UnitKey,
                    normalize::normalize_unit(input.unit.as_deref()).into(),
                ),
                (InventoryItem::Unit, input.unit.into()),
                (InventoryItem::Category, input.category.to_string().into()),
                (InventoryItem::Aisle, input.aisle.into()),
                (InventoryItem::MinQuantity, input.min_quantity.into()),
                (
                    InventoryItem::ExpiresOn,
                    input.expires_on.map(larder_shared::date_to_timestamp).into(),
                ),
                (InventoryItem::Location, input.location.into()),
                (InventoryItem::UpdatedAt, larder_shared::now().into()),
            ])
            .and_where(Expr::col(InventoryItem::Id).eq(&id))
            .and_where(Expr::col(InventoryItem::TenantId).eq(&tenant_id))
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        let result = match sqlx::query_with(&sql, values).execute(&self.0).await {
            Ok(result) => result,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(Error::Conflict(format!("{name} is already in the inventory")));
            }
            Err(e) => return Err(e.into()),
        };

        if result.rows_affected() == 0 {
            not_found!("inventory item {id}");
        }

        Ok(())
    }
}
