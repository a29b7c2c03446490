use std::collections::HashMap;

use larder_shared::normalize;

use crate::Demand;

/// Quantities at or below this are treated as nothing left to buy.
pub const EPSILON: f64 = 1e-9;

/// One inventory item as seen by the planner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockItem {
    pub name: String,
    pub unit: Option<String>,
    pub aisle: Option<String>,
    pub quantity: f64,
    pub min_quantity: f64,
}

/// On-hand quantities by (normalized name, normalized unit). Netting consumes
/// it, so one item never covers two demands.
#[derive(Debug, Clone, Default)]
pub struct StockSnapshot(HashMap<(String, String), f64>);

impl StockSnapshot {
    pub fn insert(&mut self, name: &str, unit: Option<&str>, quantity: f64) {
        let key = (
            normalize::normalize_ingredient_name(name),
            normalize::normalize_unit(unit),
        );

        *self.0.entry(key).or_default() += quantity.max(0.0);
    }

    pub fn get(&self, name_key: &str, unit_key: &str) -> f64 {
        self.0
            .get(&(name_key.to_owned(), unit_key.to_owned()))
            .copied()
            .unwrap_or_default()
    }

    /// Takes up to `wanted` out of the stock and returns what was taken.
    fn take(&mut self, name_key: &str, unit_key: &str, wanted: f64) -> f64 {
        let Some(in_stock) = self.0.get_mut(&(name_key.to_owned(), unit_key.to_owned())) else {
            return 0.0;
        };

        let taken = wanted.min(*in_stock).max(0.0);
        *in_stock -= taken;

        taken
    }
}

impl<'a> FromIterator<&'a StockItem> for StockSnapshot {
    fn from_iter<T: IntoIterator<Item = &'a StockItem>>(iter: T) -> Self {
        let mut snapshot = StockSnapshot::default();
        for item in iter {
            snapshot.insert(&item.name, item.unit.as_deref(), item.quantity);
        }

        snapshot
    }
}

/// Subtracts what is on hand from the demand. Units must match exactly; a
/// sub-total fully covered disappears, and so does a line left empty.
pub fn net(mut demand: Demand, stock: &mut StockSnapshot) -> Demand {
    for line in demand.lines_mut() {
        let key = line.key.to_owned();

        for sub_total in line.sub_totals.iter_mut() {
            let taken = stock.take(&key, &sub_total.unit, sub_total.quantity);
            sub_total.quantity = (sub_total.quantity - taken).max(0.0);
        }

        line.sub_totals.retain(|s| s.quantity > EPSILON);
    }

    demand.retain(|_, line| !line.sub_totals.is_empty());

    demand
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlannedRecipe, RecipeIngredient, aggregate};

    fn demand(items: &[(&str, f64, Option<&str>)]) -> Demand {
        let meal = PlannedRecipe {
            base_servings: 1,
            servings: 1,
            ingredients: items
                .iter()
                .map(|(name, quantity, unit)| RecipeIngredient {
                    name: name.to_string(),
                    quantity: Some(*quantity),
                    unit: unit.map(ToOwned::to_owned),
                    aisle: None,
                })
                .collect(),
        };

        aggregate([&meal])
    }

    fn stock(items: &[(&str, f64, Option<&str>)]) -> StockSnapshot {
        let mut snapshot = StockSnapshot::default();
        for (name, quantity, unit) in items {
            snapshot.insert(name, *unit, *quantity);
        }

        snapshot
    }

    #[test]
    fn test_partial_cover() {
        let mut stock = stock(&[("pâtes", 100.0, Some("g"))]);
        let netted = net(demand(&[("Pâtes", 200.0, Some("g"))]), &mut stock);

        let line = netted.get("pâtes").unwrap();
        assert_eq!(line.sub_totals[0].quantity, 100.0);
        assert_eq!(stock.get("pâtes", "g"), 0.0);
    }

    #[test]
    fn test_full_cover_drops_line() {
        let mut stock = stock(&[("Riz", 500.0, Some("grams"))]);
        let netted = net(demand(&[("riz", 200.0, Some("g"))]), &mut stock);

        assert!(netted.get("riz").is_none());
        assert_eq!(stock.get("riz", "g"), 300.0);
    }

    #[test]
    fn test_units_are_not_converted() {
        let mut stock = stock(&[("lait", 2.0, Some("l"))]);
        let netted = net(demand(&[("lait", 500.0, Some("ml"))]), &mut stock);

        assert_eq!(netted.get("lait").unwrap().sub_totals[0].quantity, 500.0);
        assert_eq!(stock.get("lait", "l"), 2.0);
    }

    #[test]
    fn test_never_negative() {
        for (needed, held) in [(1.0, 0.0), (1.0, 1.0), (1.0, 3.5), (2.5, 1.0), (0.3, 0.1)] {
            let mut stock = stock(&[("sucre", held, Some("g"))]);
            let netted = net(demand(&[("sucre", needed, Some("g"))]), &mut stock);

            let remaining = netted
                .get("sucre")
                .map(|l| l.sub_totals[0].quantity)
                .unwrap_or_default();
            assert!(remaining >= 0.0);
            assert!((remaining - (needed - held).max(0.0)).abs() < 1e-9);
            assert!((held - stock.get("sucre", "g") - f64::min(needed, held)).abs() < 1e-9);
        }
    }
}
