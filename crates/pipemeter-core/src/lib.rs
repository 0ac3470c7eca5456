pub mod config;
pub mod logging;

pub mod control;
pub mod pipeline;
pub mod render;
pub mod renderer;
pub mod state;
pub mod transfer;

pub use config::MeterConfig;
pub use control::CancelToken;
pub use pipeline::{run_pipeline, TransferSummary};
pub use transfer::TransferError;
