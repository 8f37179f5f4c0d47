pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{LoadError, SeedProvider, parse_records};
pub use providers::{FileSeed, HttpSeed};
pub use types::{SeedRecord, SeedSource};
