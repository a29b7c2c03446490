use sqlx::SqlitePool;

mod consume;
mod create;
mod delete;
mod movement;
mod restock;
mod update;

pub use consume::{ConsumptionLine, ConsumptionReport, SkipReason};
pub use create::CreateInput;
pub use movement::{AdjustInput, MovementInput};
pub use restock::RestockInput;
pub use update::UpdateInput;

#[derive(Clone)]
pub struct Command(pub SqlitePool);
