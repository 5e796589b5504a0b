use crate::ancillary::AncillaryOption;
use serde::{Deserialize, Serialize};

/// One flight option as returned by the provider for a search. Immutable
/// once received; identified by the provider-assigned `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSegment {
    pub id: String,
    pub airline: String,
    pub airline_code: String,
    pub flight_number: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub origin: String,
    pub destination: String,
    /// Display duration, e.g. "7h 30m".
    pub duration: String,
    pub stops: u32,
    pub price: f64,
    pub booking_code: Option<String>,
}

/// Priced service tier for a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FareType {
    Basic,
    Economy,
    EconomyFlex,
    Premium,
}

impl FareType {
    /// The lowest, most-restricted tier interposes a confirmation gate
    /// before the selection chain may proceed.
    pub fn is_most_restricted(&self) -> bool {
        matches!(self, FareType::Basic)
    }

    /// The tier offered when upgrading out of the restricted gate.
    pub fn next_tier_up(&self) -> FareType {
        match self {
            FareType::Basic => FareType::Economy,
            FareType::Economy => FareType::EconomyFlex,
            FareType::EconomyFlex => FareType::Premium,
            FareType::Premium => FareType::Premium,
        }
    }
}

impl std::fmt::Display for FareType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FareType::Basic => "basic",
            FareType::Economy => "economy",
            FareType::EconomyFlex => "economy-flex",
            FareType::Premium => "premium",
        };
        write!(f, "{}", name)
    }
}

/// One row of the fare comparison table shown at fare selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareOption {
    pub fare: FareType,
    pub title: String,
    pub price: f64,
    pub recommended: bool,
    pub features: Vec<String>,
    pub unavailable: Vec<String>,
}

/// Fare ladder for a given base price. Basic sells at base, economy and
/// flex at fixed offsets, premium at a multiplier.
pub fn fare_options(base_price: f64) -> Vec<FareOption> {
    vec![
        FareOption {
            fare: FareType::Basic,
            title: "Basic Economy".to_string(),
            price: base_price,
            recommended: false,
            features: vec!["Meals provided".to_string()],
            unavailable: vec![
                "No carry-on".to_string(),
                "No changes".to_string(),
                "Last group boarding".to_string(),
                "No seat selection".to_string(),
            ],
        },
        FareOption {
            fare: FareType::Economy,
            title: "Economy".to_string(),
            price: base_price + 100.0,
            recommended: true,
            features: vec![
                "Meals provided".to_string(),
                "Carry-on included".to_string(),
                "Standard boarding".to_string(),
            ],
            unavailable: vec!["Seat selection fees apply".to_string()],
        },
        FareOption {
            fare: FareType::EconomyFlex,
            title: "Economy Flexible".to_string(),
            price: base_price + 225.0,
            recommended: false,
            features: vec![
                "Refundable for free".to_string(),
                "Meals provided".to_string(),
                "Carry-on included".to_string(),
                "Free seat selection".to_string(),
            ],
            unavailable: vec![],
        },
        FareOption {
            fare: FareType::Premium,
            title: "Premium Plus".to_string(),
            price: base_price * 2.5,
            recommended: false,
            features: vec![
                "Premium meals".to_string(),
                "2 Checked bags".to_string(),
                "Priority boarding".to_string(),
                "Extra legroom".to_string(),
            ],
            unavailable: vec![],
        },
    ]
}

/// Accumulated selection carried through the chain once a booking session
/// is underway. Each field may only be populated after the preceding one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionState {
    pub flight: FlightSegment,
    pub fare_type: Option<FareType>,
    pub selected_seats: Vec<String>,
    pub selected_ancillaries: Vec<AncillaryOption>,
}

impl SelectionState {
    pub fn new(flight: FlightSegment) -> Self {
        Self {
            flight,
            fare_type: None,
            selected_seats: Vec::new(),
            selected_ancillaries: Vec::new(),
        }
    }
}
