use larder_shared::{Metadata, inventory::TransactionKind, normalize, not_found};
use serde::Serialize;
use sqlx::SqliteConnection;
use strum::{AsRefStr, Display};

use crate::{
    InventoryItemRow,
    ledger::{self, Change, LedgerEntry, Movement},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotInInventory,
    OutOfStock,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionLine {
    pub ingredient: String,
    pub unit: Option<String>,
    pub needed: f64,
    pub deducted: f64,
    pub remaining: Option<f64>,
    pub inventory_id: Option<String>,
    pub skipped: Option<SkipReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionReport {
    pub planned_meal_id: String,
    pub recipe_id: String,
    pub lines: Vec<ConsumptionLine>,
}

impl ConsumptionReport {
    pub fn deducted(&self) -> impl Iterator<Item = &ConsumptionLine> {
        self.lines.iter().filter(|line| line.skipped.is_none())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ConsumptionLine> {
        self.lines.iter().filter(|line| line.skipped.is_some())
    }
}

struct Need {
    ingredient: String,
    unit: Option<String>,
    needed: f64,
    item: Option<InventoryItemRow>,
}

impl Need {
    /// Item to deduct from, or why there is none.
    fn target(&self) -> Result<&InventoryItemRow, SkipReason> {
        match &self.item {
            None => Err(SkipReason::NotInInventory),
            Some(item) if item.quantity <= 0.0 => Err(SkipReason::OutOfStock),
            Some(item) => Ok(item),
        }
    }

    fn skipped(self, reason: SkipReason) -> ConsumptionLine {
        ConsumptionLine {
            remaining: self.item.as_ref().map(|item| item.quantity),
            inventory_id: self.item.map(|item| item.id),
            ingredient: self.ingredient,
            unit: self.unit,
            needed: self.needed,
            deducted: 0.0,
            skipped: Some(reason),
        }
    }

    /// The item emptied after it was read, typically by an earlier ingredient
    /// of the same recipe.
    fn emptied(self) -> ConsumptionLine {
        let mut line = self.skipped(SkipReason::OutOfStock);
        line.remaining = Some(0.0);
        line
    }

    fn deducted(self, entry: LedgerEntry) -> ConsumptionLine {
        ConsumptionLine {
            ingredient: self.ingredient,
            unit: self.unit,
            needed: self.needed,
            deducted: entry.quantity_before - entry.quantity_after,
            remaining: Some(entry.quantity_after),
            inventory_id: Some(entry.inventory_id),
            skipped: None,
        }
    }
}

impl super::Command {
    /// Debits the inventory for a cooked meal. Each ingredient commits on its
    /// own; ingredients without stock are reported, not failed.
    #[tracing::instrument(skip_all)]
    pub async fn consume_meal(
        &self,
        metadata: &Metadata,
        planned_meal_id: impl Into<String>,
    ) -> larder_shared::Result<ConsumptionReport> {
        let tenant_id = metadata.tenant()?;
        let planned_meal_id = planned_meal_id.into();

        let (recipe_id, needs) = {
            let mut conn = self.0.acquire().await?;
            resolve(&mut conn, &tenant_id, &planned_meal_id).await?
        };

        let mut lines = Vec::with_capacity(needs.len());
        for need in needs {
            let item_id = match need.target() {
                Ok(item) => item.id.to_owned(),
                Err(reason) => {
                    lines.push(need.skipped(reason));
                    continue;
                }
            };

            let movement = movement(&need, &planned_meal_id);
            match ledger::try_apply(&self.0, &tenant_id, &item_id, &movement).await? {
                Some(entry) => lines.push(need.deducted(entry)),
                None => lines.push(need.emptied()),
            }
        }

        let report = ConsumptionReport {
            planned_meal_id,
            recipe_id,
            lines,
        };

        tracing::info!(
            planned_meal_id = %report.planned_meal_id,
            deducted = report.deducted().count(),
            skipped = report.skipped().count(),
            "meal consumed"
        );

        Ok(report)
    }

    /// Same as [`Command::consume_meal`] but all deductions commit together or
    /// not at all.
    #[tracing::instrument(skip_all)]
    pub async fn consume_meal_atomic(
        &self,
        metadata: &Metadata,
        planned_meal_id: impl Into<String>,
    ) -> larder_shared::Result<ConsumptionReport> {
        let tenant_id = metadata.tenant()?;
        let planned_meal_id = planned_meal_id.into();

        let mut tx = self.0.begin().await?;
        let (recipe_id, needs) = resolve(&mut *tx, &tenant_id, &planned_meal_id).await?;

        let mut lines = Vec::with_capacity(needs.len());
        for need in needs {
            let item_id = match need.target() {
                Ok(item) => item.id.to_owned(),
                Err(reason) => {
                    lines.push(need.skipped(reason));
                    continue;
                }
            };

            let movement = movement(&need, &planned_meal_id);
            match ledger::try_record(&mut *tx, &tenant_id, &item_id, &movement).await? {
                Some(entry) => lines.push(need.deducted(entry)),
                None => lines.push(need.emptied()),
            }
        }

        tx.commit().await?;

        let report = ConsumptionReport {
            planned_meal_id,
            recipe_id,
            lines,
        };

        tracing::info!(
            planned_meal_id = %report.planned_meal_id,
            deducted = report.deducted().count(),
            skipped = report.skipped().count(),
            "meal consumed atomically"
        );

        Ok(report)
    }
}

fn movement(need: &Need, planned_meal_id: &str) -> Movement {
    Movement::new(TransactionKind::MealUsed, Change::Remove(need.needed))
        .planned_meal(planned_meal_id)
        .from_stock()
}

async fn resolve(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    planned_meal_id: &str,
) -> larder_shared::Result<(String, Vec<Need>)> {
    let Some(meal) = larder_mealplan::find(&mut *conn, tenant_id, planned_meal_id).await? else {
        not_found!("planned meal {planned_meal_id}");
    };

    let Some(recipe) = larder_recipe::find(&mut *conn, tenant_id, &meal.recipe_id).await? else {
        not_found!("recipe {}", meal.recipe_id);
    };

    let multiplier = meal.servings as f64 / recipe.base_servings.max(1) as f64;
    let ingredients = larder_recipe::ingredients(&mut *conn, &recipe.id).await?;

    let mut needs = Vec::with_capacity(ingredients.len());
    for ingredient in ingredients {
        let name_key = normalize::normalize_ingredient_name(&ingredient.name);
        let unit_key = normalize::normalize_unit(ingredient.unit.as_deref());
        let item = crate::find_by_key(&mut *conn, tenant_id, name_key, unit_key).await?;

        needs.push(Need {
            needed: ingredient.quantity.unwrap_or(1.0) * multiplier,
            ingredient: ingredient.name,
            unit: ingredient.unit,
            item,
        });
    }

    Ok((recipe.id, needs))
}
