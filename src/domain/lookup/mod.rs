//! Lookup domain - what a cached lookup is configured with and reads through to

mod argument;
mod config;
mod loader;

pub use argument::LookupArgument;
pub use config::{LookupConfig, DEFAULT_LOOKUP_TTL};
pub use loader::{DataLoader, Identifiable, Identifier};
