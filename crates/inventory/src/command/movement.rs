use larder_shared::{Metadata, inventory::TransactionKind};
use validator::Validate;

use crate::ledger::{self, Change, LedgerEntry, Movement};

#[derive(Validate, Clone, Debug, Default)]
pub struct MovementInput {
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
    pub note: Option<String>,
}

#[derive(Validate, Clone, Debug, Default)]
pub struct AdjustInput {
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    pub note: Option<String>,
}

impl super::Command {
    pub async fn add(
        &self,
        metadata: &Metadata,
        id: impl Into<String>,
        input: MovementInput,
    ) -> larder_shared::Result<LedgerEntry> {
        input.validate()?;
        let movement =
            Movement::new(TransactionKind::Add, Change::Add(input.quantity)).note(input.note);

        self.apply(metadata, id.into(), movement).await
    }

    /// Takes stock out. Removing more than is held empties the item; the entry
    /// keeps the requested amount next to the applied one.
    pub async fn remove(
        &self,
        metadata: &Metadata,
        id: impl Into<String>,
        input: MovementInput,
    ) -> larder_shared::Result<LedgerEntry> {
        input.validate()?;
        let movement =
            Movement::new(TransactionKind::Remove, Change::Remove(input.quantity)).note(input.note);

        self.apply(metadata, id.into(), movement).await
    }

    pub async fn adjust(
        &self,
        metadata: &Metadata,
        id: impl Into<String>,
        input: AdjustInput,
    ) -> larder_shared::Result<LedgerEntry> {
        input.validate()?;
        let movement =
            Movement::new(TransactionKind::Adjust, Change::Set(input.quantity)).note(input.note);

        self.apply(metadata, id.into(), movement).await
    }

    /// Throws away whatever is left of an item.
    pub async fn expire(
        &self,
        metadata: &Metadata,
        id: impl Into<String>,
    ) -> larder_shared::Result<LedgerEntry> {
        let movement = Movement::new(TransactionKind::Expired, Change::Set(0.0));

        self.apply(metadata, id.into(), movement).await
    }

    async fn apply(
        &self,
        metadata: &Metadata,
        id: String,
        movement: Movement,
    ) -> larder_shared::Result<LedgerEntry> {
        let tenant_id = metadata.tenant()?;
        let entry = ledger::apply(&self.0, &tenant_id, &id, &movement).await?;

        tracing::debug!(
            inventory_id = %id,
            kind = %entry.kind,
            quantity = entry.quantity,
            quantity_after = entry.quantity_after,
            "inventory movement recorded"
        );

        Ok(entry)
    }
}
