mod aggregation;
mod netting;
mod plan;
mod replenishment;

pub use aggregation::*;
pub use netting::*;
pub use plan::*;
pub use replenishment::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod generator;
        mod query;
        pub mod store;

        pub use command::*;
        pub use generator::*;
        pub use query::*;
    }
}
