use sqlx::SqlitePool;

mod create;

pub use create::{CreateInput, IngredientInput};

#[derive(Clone)]
pub struct Command(pub SqlitePool);
