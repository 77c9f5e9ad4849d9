pub mod args;
pub mod commands;

pub use args::CliArgs;
pub use commands::{convert_to_path, handle_commands};
