use larder_inventory::InventoryItemRow;
use serde::Serialize;

use super::Context;

#[derive(Debug, Serialize)]
pub struct LowStockView {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub min_quantity: f64,
    pub unit: Option<String>,
    pub category: String,
}

impl From<InventoryItemRow> for LowStockView {
    fn from(row: InventoryItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            min_quantity: row.min_quantity,
            unit: row.unit,
            category: row.category.0.to_string(),
        }
    }
}

pub async fn low_stock(ctx: &Context) -> anyhow::Result<()> {
    let tenant_id = ctx.tenant()?;
    let items: Vec<LowStockView> = larder_inventory::Query(ctx.read_pool.clone())
        .low_stock(&tenant_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    ctx.print(&items, || {
        if items.is_empty() {
            return "Nothing is running low".to_owned();
        }

        items
            .iter()
            .map(|item| {
                format!(
                    "{}: {} (min {})",
                    item.name,
                    super::quantity(item.quantity, item.unit.as_deref()),
                    item.min_quantity
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}
