#[cfg(feature = "cli")]
pub mod cli;
pub mod fleet;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use fleet::FleetConfig;
