//! Configuration data structures.
//!
//! These types mirror the YAML configuration files the engine is
//! deployed with: the organization's location list and the opaque
//! external links surfaced to dashboard clients.

use serde::{Deserialize, Serialize};

/// Contents of `locations.yaml`: the full list of tutoring locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsConfig {
    /// Every physical location, in display order.
    pub locations: Vec<String>,
}

/// Contents of `links.yaml`: external URLs passed through to clients.
///
/// The engine applies no logic to these; they are opaque values owned
/// by the integrating organization (shared calendar, signup forms).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalLinks {
    /// Shared calendar embed URL, if configured.
    #[serde(default)]
    pub calendar_url: Option<String>,
    /// Tutoring signup form URL, if configured.
    #[serde(default)]
    pub signup_form_url: Option<String>,
}

/// The assembled engine configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    locations: Vec<String>,
    links: ExternalLinks,
}

impl AppConfig {
    /// Assembles a configuration from its parts.
    pub fn new(locations: Vec<String>, links: ExternalLinks) -> Self {
        Self { locations, links }
    }

    /// Returns the full location list.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Returns the configured external links.
    pub fn links(&self) -> &ExternalLinks {
        &self.links
    }
}
