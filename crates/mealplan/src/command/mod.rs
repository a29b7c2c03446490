use sqlx::SqlitePool;

mod remove;
mod schedule;

pub use schedule::ScheduleInput;

#[derive(Clone)]
pub struct Command(pub SqlitePool);
