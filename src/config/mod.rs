//! Configuration loading and types.
//!
//! The engine is deployed with a small YAML configuration: the list of
//! tutoring locations and the opaque external links (calendar, forms)
//! passed through to dashboard clients.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, ExternalLinks, LocationsConfig};
