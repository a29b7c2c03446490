use larder_inventory::RestockInput;
use larder_shared::{Metadata, inventory::InventoryCategory, normalize::AisleCategory, not_found};

impl super::Command {
    /// Puts bought items into the inventory. Items stay on the list; returns
    /// how many were restocked.
    pub async fn restock(
        &self,
        metadata: &Metadata,
        list_id: impl Into<String>,
        item_ids: &[String],
    ) -> larder_shared::Result<usize> {
        let tenant_id = metadata.tenant()?;
        let list_id = list_id.into();

        let query = crate::Query(self.0.clone());
        if query.find(&tenant_id, &list_id).await?.is_none() {
            not_found!("shopping list {list_id}");
        }

        let items = query.items(&tenant_id, &list_id).await?;
        let mut selected = Vec::with_capacity(item_ids.len());
        for id in item_ids {
            let Some(item) = items.iter().find(|item| &item.id == id) else {
                not_found!("shopping list item {id}");
            };

            selected.push(item);
        }

        let inventory = larder_inventory::Command(self.0.clone());
        for item in &selected {
            inventory
                .restock(
                    metadata,
                    RestockInput {
                        name: item.name.to_owned(),
                        quantity: item.quantity,
                        unit: item.unit.to_owned(),
                        aisle: item.aisle.to_owned(),
                        category: category(item.aisle.as_deref()),
                        note: Some(format!("shopping list {list_id}")),
                    },
                )
                .await?;
        }

        tracing::info!(
            shopping_list_id = %list_id,
            restocked = selected.len(),
            "shopping list restocked"
        );

        Ok(selected.len())
    }
}

fn category(aisle: Option<&str>) -> InventoryCategory {
    match AisleCategory::from_code(aisle) {
        AisleCategory::Frozen => InventoryCategory::Freezer,
        AisleCategory::Household => InventoryCategory::Cleaning,
        AisleCategory::Hygiene => InventoryCategory::Toiletry,
        _ => InventoryCategory::Pantry,
    }
}
