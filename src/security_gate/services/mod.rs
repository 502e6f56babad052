mod delta_engine;
mod scan_params_builder;

pub use delta_engine::{DeltaEngine, DeltaError};
pub use scan_params_builder::ScanParamsBuilder;
