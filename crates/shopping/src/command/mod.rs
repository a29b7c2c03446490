use sqlx::SqlitePool;

mod check;
mod delete;
mod generate;
mod reset;
mod restock;

#[derive(Clone)]
pub struct Command(pub SqlitePool);
