mod date;
mod error;
pub mod inventory;
pub mod mealplan;
mod metadata;
pub mod normalize;
pub mod shopping;

pub use date::*;
pub use error::*;
pub use metadata::*;
