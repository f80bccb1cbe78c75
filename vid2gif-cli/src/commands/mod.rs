//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of one subcommand.

/// `vid2gif convert`: converts a file or a directory of videos to GIF.
pub mod convert;
pub mod info;
pub mod presets;
