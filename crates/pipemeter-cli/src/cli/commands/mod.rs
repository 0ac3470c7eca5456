//! CLI command handlers.

mod get_size;
mod meter;

pub use get_size::run_get_size;
pub use meter::{run_meter, Outcome};
