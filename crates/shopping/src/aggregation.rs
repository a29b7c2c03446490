use std::collections::BTreeMap;

use larder_shared::{normalize, shopping::Origin};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeIngredient {
    pub name: String,
    /// `None` counts as one unit.
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub aisle: Option<String>,
}

/// A recipe as it sits on the calendar: its ingredients and the servings it
/// was planned for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlannedRecipe {
    pub base_servings: u32,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
}

impl PlannedRecipe {
    pub fn multiplier(&self) -> f64 {
        self.servings as f64 / self.base_servings.max(1) as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubTotal {
    /// Normalized unit, empty when the ingredient has none.
    pub unit: String,
    pub quantity: f64,
    pub origin: Origin,
}

/// Everything needed of one ingredient, kept per unit since units are never
/// converted into each other.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandLine {
    pub key: String,
    pub name: String,
    pub aisle: Option<String>,
    pub sub_totals: Vec<SubTotal>,
}

impl DemandLine {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();

        Self {
            name: normalize::display_name(&key),
            key,
            aisle: None,
            sub_totals: vec![],
        }
    }

    /// Adds into the sub-total of `unit`, opening it when the unit is new.
    pub fn add(&mut self, unit: &str, quantity: f64, origin: Origin) -> &mut SubTotal {
        let index = match self.sub_totals.iter().position(|s| s.unit == unit) {
            Some(index) => {
                self.sub_totals[index].quantity += quantity;
                index
            }
            None => {
                self.sub_totals.push(SubTotal {
                    unit: unit.to_owned(),
                    quantity,
                    origin,
                });
                self.sub_totals.len() - 1
            }
        };

        &mut self.sub_totals[index]
    }

    /// Keeps the first non-empty aisle seen.
    pub fn observe_aisle(&mut self, aisle: Option<&str>) {
        if self.aisle.is_some() {
            return;
        }

        self.aisle = aisle
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(ToOwned::to_owned);
    }
}

/// Demand keyed by normalized ingredient name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Demand(BTreeMap<String, DemandLine>);

impl Demand {
    pub fn get(&self, key: &str) -> Option<&DemandLine> {
        self.0.get(key)
    }

    pub fn line_mut(&mut self, key: &str) -> &mut DemandLine {
        self.0
            .entry(key.to_owned())
            .or_insert_with(|| DemandLine::new(key))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DemandLine> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&String, &mut DemandLine) -> bool) {
        self.0.retain(f);
    }

    pub(crate) fn lines_mut(&mut self) -> impl Iterator<Item = &mut DemandLine> {
        self.0.values_mut()
    }
}

impl IntoIterator for Demand {
    type Item = DemandLine;
    type IntoIter = std::collections::btree_map::IntoValues<String, DemandLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

/// Scales every planned recipe and sums its ingredients by normalized name.
pub fn aggregate<'a>(meals: impl IntoIterator<Item = &'a PlannedRecipe>) -> Demand {
    let mut demand = Demand::default();

    for meal in meals {
        let multiplier = meal.multiplier();

        for ingredient in &meal.ingredients {
            let key = normalize::normalize_ingredient_name(&ingredient.name);
            if key.is_empty() {
                continue;
            }

            let unit = normalize::normalize_unit(ingredient.unit.as_deref());
            let needed = ingredient.quantity.unwrap_or(1.0) * multiplier;

            let line = demand.line_mut(&key);
            line.observe_aisle(ingredient.aisle.as_deref());
            line.add(&unit, needed, Origin::Recipe);
        }
    }

    demand
}
