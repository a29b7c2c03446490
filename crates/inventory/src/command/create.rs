use larder_db::table::InventoryItem;
use larder_shared::{
    Error, Metadata,
    inventory::{InventoryCategory, TransactionKind},
    normalize,
};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::Date;
use validator::Validate;

use crate::ledger::{self, Change, LedgerEntry, Movement};

#[derive(Validate, Clone, Debug, Default)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: InventoryCategory,
    pub aisle: Option<String>,
    #[validate(range(min = 0.0))]
    pub min_quantity: f64,
    pub expires_on: Option<Date>,
    pub location: Option<String>,
}

impl super::Command {
    /// Adds an item to the inventory. A positive opening quantity is written
    /// to the ledger as an `add`.
    pub async fn create(
        &self,
        metadata: &Metadata,
        input: CreateInput,
    ) -> larder_shared::Result<String> {
        input.validate()?;
        let tenant_id = metadata.tenant()?;
        let id = ulid::Ulid::new().to_string();
        let name = input.name.trim().to_owned();
        let name_key = normalize::normalize_ingredient_name(&name);
        let unit_key = normalize::normalize_unit(input.unit.as_deref());
        let now = larder_shared::now();

        let mut tx = self.0.begin().await?;

        let statment = Query::insert()
            .into_table(InventoryItem::Table)
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
            .values_panic([
                id.to_owned().into(),
                tenant_id.into(),
                name.to_owned().into(),
                name_key.into(),
                input.quantity.into(),
                input.unit.into(),
                unit_key.into(),
                input.category.to_string().into(),
                input.aisle.into(),
                input.min_quantity.into(),
                input.expires_on.map(larder_shared::date_to_timestamp).into(),
                input.location.into(),
                now.into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        match sqlx::query_with(&sql, values).execute(&mut *tx).await {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(Error::Conflict(format!("{name} is already in the inventory")));
            }
            Err(e) => return Err(e.into()),
        }

        if input.quantity > 0.0 {
            let movement = Movement::new(TransactionKind::Add, Change::Add(input.quantity));
            let entry = LedgerEntry {
                id: ulid::Ulid::new().to_string(),
                inventory_id: id.to_owned(),
                kind: TransactionKind::Add,
                quantity: input.quantity,
                requested_quantity: input.quantity,
                quantity_before: 0.0,
                quantity_after: input.quantity,
            };

            ledger::insert(&mut *tx, &entry, &movement).await?;
        }

        tx.commit().await?;

        tracing::debug!(inventory_id = %id, name = %name, "inventory item created");

        Ok(id)
    }
}
