//! Lookup tables that decide when two free-text ingredients are "the same".
//!
//! All tables are built once on first use and never mutated, so they can be
//! read from any number of concurrent requests.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::Serialize;

/// English and French spellings folded onto one French key.
static INGREDIENT_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("onion", "oignon"),
        ("onions", "oignon"),
        ("red onion", "oignon rouge"),
        ("tomato", "tomate"),
        ("tomatoes", "tomate"),
        ("garlic", "ail"),
        ("garlic clove", "gousse d'ail"),
        ("garlic cloves", "gousse d'ail"),
        ("potato", "pomme de terre"),
        ("potatoes", "pomme de terre"),
        ("carrot", "carotte"),
        ("carrots", "carotte"),
        ("egg", "oeuf"),
        ("eggs", "oeuf"),
        ("milk", "lait"),
        ("butter", "beurre"),
        ("flour", "farine"),
        ("sugar", "sucre"),
        ("salt", "sel"),
        ("pepper", "poivre"),
        ("black pepper", "poivre"),
        ("rice", "riz"),
        ("pasta", "pâtes"),
        ("chicken", "poulet"),
        ("chicken breast", "blanc de poulet"),
        ("beef", "boeuf"),
        ("ground beef", "boeuf haché"),
        ("cheese", "fromage"),
        ("cream", "crème"),
        ("heavy cream", "crème"),
        ("olive oil", "huile d'olive"),
        ("lemon", "citron"),
        ("lemons", "citron"),
        ("apple", "pomme"),
        ("apples", "pomme"),
        ("water", "eau"),
        ("bread", "pain"),
        ("mushroom", "champignon"),
        ("mushrooms", "champignon"),
        ("parsley", "persil"),
        ("basil", "basilic"),
        ("shallot", "échalote"),
        ("shallots", "échalote"),
        ("zucchini", "courgette"),
        ("bell pepper", "poivron"),
        ("bell peppers", "poivron"),
        ("spinach", "épinard"),
        ("leek", "poireau"),
        ("leeks", "poireau"),
        ("bacon", "lardon"),
        ("ham", "jambon"),
        ("yogurt", "yaourt"),
        ("yoghurt", "yaourt"),
        ("chocolate", "chocolat"),
        ("honey", "miel"),
    ])
});

/// French plural forms folded onto their singular.
static PLURALS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("oignons", "oignon"),
        ("oignons rouges", "oignon rouge"),
        ("tomates", "tomate"),
        ("carottes", "carotte"),
        ("oeufs", "oeuf"),
        ("pommes de terre", "pomme de terre"),
        ("pommes", "pomme"),
        ("citrons", "citron"),
        ("champignons", "champignon"),
        ("échalotes", "échalote"),
        ("gousses d'ail", "gousse d'ail"),
        ("poivrons", "poivron"),
        ("courgettes", "courgette"),
        ("aubergines", "aubergine"),
        ("haricots verts", "haricot vert"),
        ("lardons", "lardon"),
        ("épinards", "épinard"),
        ("poireaux", "poireau"),
        ("navets", "navet"),
        ("bananes", "banane"),
        ("fraises", "fraise"),
        ("amandes", "amande"),
        ("olives", "olive"),
        ("herbes", "herbe"),
        ("cornichons", "cornichon"),
        ("crevettes", "crevette"),
        ("saucisses", "saucisse"),
        ("yaourts", "yaourt"),
        ("blancs de poulet", "blanc de poulet"),
    ])
});

static FILLERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from(["fresh", "frais", "fraîche", "fraîches", "fraiche", "fraiches"])
});

static UNIT_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("g", "g"),
        ("gr", "g"),
        ("gram", "g"),
        ("grams", "g"),
        ("gramme", "g"),
        ("grammes", "g"),
        ("kg", "kg"),
        ("kilo", "kg"),
        ("kilos", "kg"),
        ("kilogram", "kg"),
        ("kilograms", "kg"),
        ("kilogramme", "kg"),
        ("kilogrammes", "kg"),
        ("mg", "mg"),
        ("ml", "ml"),
        ("milliliter", "ml"),
        ("milliliters", "ml"),
        ("millilitre", "ml"),
        ("millilitres", "ml"),
        ("cl", "cl"),
        ("centilitre", "cl"),
        ("centilitres", "cl"),
        ("dl", "dl"),
        ("l", "l"),
        ("liter", "l"),
        ("liters", "l"),
        ("litre", "l"),
        ("litres", "l"),
        ("tbsp", "tbsp"),
        ("tbs", "tbsp"),
        ("tablespoon", "tbsp"),
        ("tablespoons", "tbsp"),
        ("cuillère à soupe", "tbsp"),
        ("cuillères à soupe", "tbsp"),
        ("c. à soupe", "tbsp"),
        ("c à s", "tbsp"),
        ("cas", "tbsp"),
        ("cs", "tbsp"),
        ("tsp", "tsp"),
        ("teaspoon", "tsp"),
        ("teaspoons", "tsp"),
        ("cuillère à café", "tsp"),
        ("cuillères à café", "tsp"),
        ("c. à café", "tsp"),
        ("c à c", "tsp"),
        ("cac", "tsp"),
        ("cc", "tsp"),
        ("cup", "cup"),
        ("cups", "cup"),
        ("tasse", "cup"),
        ("tasses", "cup"),
        ("piece", "piece"),
        ("pieces", "piece"),
        ("pièce", "piece"),
        ("pièces", "piece"),
        ("pc", "piece"),
        ("pcs", "piece"),
        ("unit", "piece"),
        ("units", "piece"),
        ("unité", "piece"),
        ("unités", "piece"),
        ("pinch", "pinch"),
        ("pinches", "pinch"),
        ("pincée", "pinch"),
        ("pincées", "pinch"),
        ("clove", "clove"),
        ("cloves", "clove"),
        ("gousse", "clove"),
        ("gousses", "clove"),
        ("slice", "slice"),
        ("slices", "slice"),
        ("tranche", "slice"),
        ("tranches", "slice"),
        ("can", "can"),
        ("cans", "can"),
        ("boîte", "can"),
        ("boîtes", "can"),
        ("bunch", "bunch"),
        ("bunches", "bunch"),
        ("botte", "bunch"),
        ("bottes", "bunch"),
        ("oz", "oz"),
        ("ounce", "oz"),
        ("ounces", "oz"),
        ("lb", "lb"),
        ("lbs", "lb"),
        ("pound", "lb"),
        ("pounds", "lb"),
    ])
});

fn is_stray_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '«' | '»' | '…' | '–' | '—' | '•' | '·')
}

fn clean(raw: &str) -> String {
    raw.to_lowercase()
        .replace('œ', "oe")
        .replace('’', "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || is_stray_punctuation(c))
        .to_owned()
}

/// Key used to decide whether two ingredient names denote the same thing.
///
/// Never fails: names missing from every table come back lowercased and
/// trimmed.
pub fn normalize_ingredient_name(raw: &str) -> String {
    let cleaned = clean(raw);

    let without_fillers = cleaned
        .split_whitespace()
        .filter(|word| !FILLERS.contains(word.trim_matches(is_stray_punctuation)))
        .collect::<Vec<_>>()
        .join(" ");
    let without_fillers = without_fillers.trim_matches(is_stray_punctuation).trim();

    let base = if without_fillers.is_empty() {
        cleaned.as_str()
    } else {
        without_fillers
    };

    let translated = INGREDIENT_SYNONYMS.get(base).copied().unwrap_or(base);

    PLURALS
        .get(translated)
        .copied()
        .unwrap_or(translated)
        .to_owned()
}

/// Canonical unit token. An absent or blank unit means "countable" and maps to
/// the empty string.
pub fn normalize_unit(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let cleaned = raw
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let cleaned = cleaned.trim_end_matches('.').trim();

    UNIT_SYNONYMS
        .get(cleaned)
        .copied()
        .unwrap_or(cleaned)
        .to_owned()
}

/// Display label for an aisle code or colon-joined aisle path.
pub fn translate_aisle(raw: Option<&str>) -> String {
    AisleCategory::from_code(raw).label().to_owned()
}

/// Capitalized form of a normalized key, used as the shopping line name.
pub fn display_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AisleCategory {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Bakery,
    Frozen,
    Pantry,
    Spices,
    Condiments,
    Beverages,
    Snacks,
    Household,
    Hygiene,
    /// A code outside the fixed table, kept verbatim.
    Other(String),
    Uncategorized,
}

static AISLE_CODES: LazyLock<HashMap<&'static str, AisleCategory>> = LazyLock::new(|| {
    HashMap::from([
        ("produce", AisleCategory::Produce),
        ("fruits", AisleCategory::Produce),
        ("vegetables", AisleCategory::Produce),
        ("fruits_vegetables", AisleCategory::Produce),
        ("dairy", AisleCategory::Dairy),
        ("meat", AisleCategory::Meat),
        ("butcher", AisleCategory::Meat),
        ("seafood", AisleCategory::Seafood),
        ("fish", AisleCategory::Seafood),
        ("bakery", AisleCategory::Bakery),
        ("frozen", AisleCategory::Frozen),
        ("pantry", AisleCategory::Pantry),
        ("grocery", AisleCategory::Pantry),
        ("dry_goods", AisleCategory::Pantry),
        ("spices", AisleCategory::Spices),
        ("condiments", AisleCategory::Condiments),
        ("beverages", AisleCategory::Beverages),
        ("drinks", AisleCategory::Beverages),
        ("snacks", AisleCategory::Snacks),
        ("household", AisleCategory::Household),
        ("cleaning", AisleCategory::Household),
        ("hygiene", AisleCategory::Hygiene),
        ("toiletry", AisleCategory::Hygiene),
        ("toiletries", AisleCategory::Hygiene),
    ])
});

impl AisleCategory {
    /// Resolves a code (`"dairy"`) or a hierarchical path (`"pantry:spices"`).
    /// Paths that are not known as a whole resolve through their top-level
    /// segment.
    pub fn from_code(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::Uncategorized;
        };

        let code = raw.to_lowercase();
        if let Some(category) = AISLE_CODES.get(code.as_str()) {
            return category.clone();
        }

        let top = code.split(':').next().unwrap_or_default().trim();
        match AISLE_CODES.get(top) {
            Some(category) => category.clone(),
            None => Self::Other(raw.to_owned()),
        }
    }

    pub fn code(&self) -> Option<&str> {
        Some(match self {
            Self::Produce => "produce",
            Self::Dairy => "dairy",
            Self::Meat => "meat",
            Self::Seafood => "seafood",
            Self::Bakery => "bakery",
            Self::Frozen => "frozen",
            Self::Pantry => "pantry",
            Self::Spices => "spices",
            Self::Condiments => "condiments",
            Self::Beverages => "beverages",
            Self::Snacks => "snacks",
            Self::Household => "household",
            Self::Hygiene => "hygiene",
            Self::Other(code) => code.as_str(),
            Self::Uncategorized => return None,
        })
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Produce => "Fruits et légumes",
            Self::Dairy => "Crèmerie",
            Self::Meat => "Boucherie",
            Self::Seafood => "Poissonnerie",
            Self::Bakery => "Boulangerie",
            Self::Frozen => "Surgelés",
            Self::Pantry => "Épicerie",
            Self::Spices => "Épices",
            Self::Condiments => "Condiments",
            Self::Beverages => "Boissons",
            Self::Snacks => "Snacks",
            Self::Household => "Entretien",
            Self::Hygiene => "Hygiène",
            Self::Other(code) => code.as_str(),
            Self::Uncategorized => "Non classé",
        }
    }
}
