#[cfg(feature = "cli")]
pub mod cli;
pub mod landscape;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use landscape::LandscapeConfig;
