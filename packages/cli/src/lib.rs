pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;

pub use commands::{execute, Command};
pub use config::Config;
pub use error::CliError;
