use larder_shared::{normalize, shopping::Origin};

use crate::{Demand, StockItem, netting::EPSILON};

impl StockItem {
    pub fn is_low(&self) -> bool {
        self.min_quantity > 0.0 && self.quantity <= self.min_quantity
    }

    /// What to buy to get back to the minimum. An item sitting exactly on its
    /// minimum still gets one unit.
    pub fn to_buy(&self) -> Option<f64> {
        if !self.is_low() {
            return None;
        }

        let missing = (self.min_quantity - self.quantity).max(0.0);

        Some(if missing <= EPSILON { 1.0 } else { missing })
    }
}

/// Folds low-stock items into the demand. Whatever sub-total they land in is
/// marked as coming from stock.
pub fn fold<'a>(mut demand: Demand, items: impl IntoIterator<Item = &'a StockItem>) -> Demand {
    for item in items {
        let Some(to_buy) = item.to_buy() else {
            continue;
        };

        let key = normalize::normalize_ingredient_name(&item.name);
        if key.is_empty() {
            continue;
        }

        let unit = normalize::normalize_unit(item.unit.as_deref());
        let line = demand.line_mut(&key);
        line.observe_aisle(item.aisle.as_deref());
        line.add(&unit, to_buy, Origin::Stock).origin = Origin::Stock;
    }

    demand
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlannedRecipe, RecipeIngredient, aggregate};

    fn item(name: &str, quantity: f64, min_quantity: f64) -> StockItem {
        StockItem {
            name: name.to_owned(),
            unit: None,
            aisle: Some("household".to_owned()),
            quantity,
            min_quantity,
        }
    }

    #[test]
    fn test_to_buy() {
        assert_eq!(item("Lessive", 2.0, 2.0).to_buy(), Some(1.0));
        assert_eq!(item("Lessive", 0.5, 2.0).to_buy(), Some(1.5));
        assert_eq!(item("Lessive", 3.0, 2.0).to_buy(), None);
        assert_eq!(item("Lessive", 0.0, 0.0).to_buy(), None);
    }

    #[test]
    fn test_fold_creates_line() {
        let demand = fold(Demand::default(), [&item("Éponges", 0.0, 3.0)]);

        let line = demand.get("éponges").unwrap();
        assert_eq!(line.aisle.as_deref(), Some("household"));
        assert_eq!(line.sub_totals[0].quantity, 3.0);
        assert_eq!(line.sub_totals[0].origin, Origin::Stock);
    }

    #[test]
    fn test_fold_merges_into_recipe_demand() {
        let meal = PlannedRecipe {
            base_servings: 1,
            servings: 1,
            ingredients: vec![RecipeIngredient {
                name: "Oeufs".to_owned(),
                quantity: Some(2.0),
                unit: None,
                aisle: None,
            }],
        };

        let demand = fold(aggregate([&meal]), [&item("eggs", 6.0, 6.0)]);
        let line = demand.get("oeuf").unwrap();
        assert_eq!(line.sub_totals.len(), 1);
        assert_eq!(line.sub_totals[0].quantity, 3.0);
        assert_eq!(line.sub_totals[0].origin, Origin::Stock);
        assert_eq!(line.aisle.as_deref(), Some("household"));
    }
}
