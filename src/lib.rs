pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::FleetConfig;

pub use adapters::sink::{ConsoleSink, MemorySink};
pub use core::{
    fleet::{BoundFleet, Fleet},
    lambda::{hello_response, LambdaResponse},
    probe::HttpProbe,
};
pub use utils::error::{GreetError, Result};
