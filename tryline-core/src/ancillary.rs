use serde::{Deserialize, Serialize};

/// Category of a paid add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AncillaryKind {
    Bag,
    Wifi,
    Meal,
    Lounge,
    Other,
}

/// Immutable catalog entry fetched per flight. Selection is tracked as a
/// set of chosen ids, independent of catalog identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AncillaryOption {
    pub id: String,
    pub name: String,
    pub kind: AncillaryKind,
    pub price: f64,
    pub description: String,
}
