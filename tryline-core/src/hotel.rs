use serde::{Deserialize, Serialize};

/// Whether a result is a plain stay or a match-ticket bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Bundle,
    Stay,
}

/// One hotel result mapped from the provider's availability response,
/// enriched with match-package metadata by the search controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    /// Average nightly rate; bundles carry the bumped package price.
    pub price: f64,
    pub currency: String,
    pub image: Option<String>,
    pub amenities: Vec<String>,
    pub distance: Option<f64>,
    pub package_type: PackageType,
    pub match_ticket_included: bool,
    pub shuttle_included: bool,
    pub fan_event_access: bool,
    pub is_preferred: bool,
}
