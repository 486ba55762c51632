pub mod loader;

pub use loader::{load_rules, parse_rules, Format, LoadError};
