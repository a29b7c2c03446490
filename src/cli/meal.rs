use larder_inventory::{ConsumptionReport, SkipReason};
use larder_mealplan::ScheduleInput;
use larder_shared::mealplan::MealType;
use serde::Serialize;

use super::Context;

#[derive(Debug, Serialize)]
struct Scheduled {
    id: String,
    policy: String,
}

pub async fn schedule(
    ctx: &Context,
    recipe_id: String,
    date: String,
    meal_type: MealType,
    servings: u32,
) -> anyhow::Result<()> {
    let policy = ctx.config.planner.slot_policy;
    let input = ScheduleInput {
        recipe_id,
        date: larder_shared::parse_date(&date)?,
        meal_type,
        servings,
    };

    let id = larder_mealplan::Command(ctx.write_pool.clone())
        .schedule(&ctx.metadata, input, policy)
        .await?;

    let scheduled = Scheduled {
        id,
        policy: policy.to_string(),
    };

    ctx.print(&scheduled, || format!("Planned meal {}", scheduled.id))
}

pub async fn consume(ctx: &Context, planned_meal_id: String, atomic: bool) -> anyhow::Result<()> {
    let command = larder_inventory::Command(ctx.write_pool.clone());

    let report = if atomic {
        command
            .consume_meal_atomic(&ctx.metadata, planned_meal_id)
            .await?
    } else {
        command.consume_meal(&ctx.metadata, planned_meal_id).await?
    };

    ctx.print(&report, || render(&report))
}

fn render(report: &ConsumptionReport) -> String {
    let mut out = format!("Consumed planned meal {}", report.planned_meal_id);

    for line in &report.lines {
        let needed = super::quantity(line.needed, line.unit.as_deref());
        match line.skipped {
            None => out.push_str(&format!(
                "\n  - {} {} (left: {})",
                line.ingredient,
                super::quantity(line.deducted, line.unit.as_deref()),
                line.remaining.unwrap_or_default()
            )),
            Some(SkipReason::NotInInventory) => out.push_str(&format!(
                "\n  ! {} {needed}: not in inventory",
                line.ingredient
            )),
            Some(SkipReason::OutOfStock) => out.push_str(&format!(
                "\n  ! {} {needed}: out of stock",
                line.ingredient
            )),
        }
    }

    out
}
