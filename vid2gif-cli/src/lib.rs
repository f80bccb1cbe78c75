// vid2gif-cli/src/lib.rs
//
// Library portion of the vid2gif CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ConvertArgs, InfoArgs};
pub use commands::convert::run_convert;
pub use commands::info::run_info;
pub use commands::presets::run_presets;
pub use logging::init_logging;
