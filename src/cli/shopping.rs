use larder_shared::normalize;
use larder_shopping::{GenerateInput, ShoppingListItemRow, ShoppingListRow};
use serde::Serialize;

use super::Context;

#[derive(Debug, Serialize)]
pub struct ListView {
    pub id: String,
    pub start: String,
    pub end: String,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub aisle: Option<String>,
    /// Display label of the aisle
    pub aisle_label: String,
    pub origin: String,
    pub checked: bool,
}

impl From<ShoppingListItemRow> for ItemView {
    fn from(row: ShoppingListItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            aisle_label: normalize::translate_aisle(row.aisle.as_deref()),
            aisle: row.aisle,
            origin: row.origin.0.to_string(),
            checked: row.checked,
        }
    }
}

impl ListView {
    fn new(list: ShoppingListRow, items: Vec<ShoppingListItemRow>) -> anyhow::Result<Self> {
        Ok(Self {
            id: list.id.to_owned(),
            start: larder_shared::format_date(list.start()?),
            end: larder_shared::format_date(list.end()?),
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    fn render(&self) -> String {
        let mut out = format!("Shopping list {} ({} to {})", self.id, self.start, self.end);
        let mut aisle = None;

        for item in &self.items {
            if aisle != Some(&item.aisle_label) {
                aisle = Some(&item.aisle_label);
                out.push_str(&format!("\n[{}]", item.aisle_label));
            }

            let mark = if item.checked { "x" } else { " " };
            out.push_str(&format!(
                "\n  [{mark}] {} {}",
                item.name,
                super::quantity(item.quantity, item.unit.as_deref())
            ));
        }

        if self.items.is_empty() {
            out.push_str("\n  nothing to buy");
        }

        out
    }
}

pub async fn generate(ctx: &Context, start: String, end: String, replace: bool) -> anyhow::Result<()> {
    let input = GenerateInput {
        start: larder_shared::parse_date(&start)?,
        end: larder_shared::parse_date(&end)?,
        replace,
    };

    let generator = ctx.config.generator(ctx.write_pool.clone());
    let id = larder_shopping::Command(ctx.write_pool.clone())
        .generate(&ctx.metadata, input, generator.as_ref())
        .await?;

    tracing::info!(list_id = %id, mode = %ctx.config.shopping.generation, "shopping list generated");

    show(ctx, id).await
}

pub async fn show(ctx: &Context, list_id: String) -> anyhow::Result<()> {
    let tenant_id = ctx.tenant()?;
    let query = larder_shopping::Query(ctx.read_pool.clone());

    let Some(list) = query.find(&tenant_id, &list_id).await? else {
        anyhow::bail!("shopping list {list_id} not found");
    };

    let items = query.items(&tenant_id, &list_id).await?;
    let view = ListView::new(list, items)?;

    ctx.print(&view, || view.render())
}
