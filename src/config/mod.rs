pub mod loader;
pub mod types;

pub use loader::{Config, PORT_ENV, TOKEN_ENV};
pub use types::*;
