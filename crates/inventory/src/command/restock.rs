use larder_shared::{
    Error, Metadata,
    inventory::{InventoryCategory, TransactionKind},
    normalize,
};
use validator::Validate;

use crate::ledger::{self, Change, Movement};

#[derive(Validate, Clone, Debug, Default)]
pub struct RestockInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
    pub unit: Option<String>,
    pub aisle: Option<String>,
    pub category: InventoryCategory,
    pub note: Option<String>,
}

impl super::Command {
    /// Puts bought goods away: credits the item sharing the same normalized
    /// name and unit, or creates it. Returns the item id.
    pub async fn restock(
        &self,
        metadata: &Metadata,
        input: RestockInput,
    ) -> larder_shared::Result<String> {
        input.validate()?;
        let tenant_id = metadata.tenant()?;
        let name_key = normalize::normalize_ingredient_name(&input.name);
        let unit_key = normalize::normalize_unit(input.unit.as_deref());

        // a concurrent restock may create the item between lookup and insert
        for _ in 0..2 {
            let existing = {
                let mut conn = self.0.acquire().await?;
                crate::find_by_key(&mut conn, &tenant_id, &name_key, &unit_key).await?
            };

            if let Some(item) = existing {
                let movement = Movement::new(TransactionKind::Add, Change::Add(input.quantity))
                    .note(input.note.to_owned());
                ledger::apply(&self.0, &tenant_id, &item.id, &movement).await?;

                tracing::debug!(inventory_id = %item.id, quantity = input.quantity, "restocked");

                return Ok(item.id);
            }

            let created = self
                .create(
                    metadata,
                    crate::CreateInput {
                        name: input.name.to_owned(),
                        quantity: input.quantity,
                        unit: input.unit.to_owned(),
                        category: input.category,
                        aisle: input.aisle.to_owned(),
                        ..Default::default()
                    },
                )
                .await;

            match created {
                Ok(id) => return Ok(id),
                Err(e) if e.is_conflict() => continue,
                Err(e) => return Err(e),
            }
        }

        Err(Error::Conflict(format!(
            "{} is being restocked concurrently",
            input.name
        )))
    }
}
