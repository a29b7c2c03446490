use larder_shared::shopping::Origin;
use serde::Serialize;

use crate::{PlannedRecipe, StockItem, StockSnapshot, aggregate, fold, net};

/// Everything the list is computed from, read once.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub meals: Vec<PlannedRecipe>,
    pub stock: Vec<StockItem>,
}

/// One row of the list to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListLine {
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub aisle: Option<String>,
    pub origin: Origin,
}

/// Aggregate, net against stock, fold low stock, then flatten to one line per
/// (name, unit). Output order is by normalized name, then unit first seen.
pub fn compute_lines(snapshot: &Snapshot) -> Vec<ListLine> {
    let demand = aggregate(&snapshot.meals);
    let mut stock = snapshot.stock.iter().collect::<StockSnapshot>();
    let demand = net(demand, &mut stock);
    let demand = fold(demand, &snapshot.stock);

    let mut lines = vec![];
    for line in demand {
        for sub_total in line.sub_totals {
            let quantity = round(sub_total.quantity);
            if quantity <= 0.0 {
                continue;
            }

            lines.push(ListLine {
                name: line.name.to_owned(),
                quantity,
                unit: Some(sub_total.unit).filter(|u| !u.is_empty()),
                aisle: line.aisle.to_owned(),
                origin: sub_total.origin,
            });
        }
    }

    lines
}

fn round(quantity: f64) -> f64 {
    (quantity * 100.0).round() / 100.0
}
