use serde::{Deserialize, Serialize};
use tryline_core::{AncillaryOption, FlightSegment};

// ============================================================================
// Geo / autocomplete sources
// ============================================================================

/// Category requested from the remote geo-autocomplete source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GeoCategory {
    Air,
    City,
}

/// Remote geo document (airport or city).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoDoc {
    pub id: String,
    pub name: String,
    pub category: GeoCategory,
    pub city: Option<String>,
    pub country_name: String,
}

/// Hotel-property match from the hotel-name autocomplete source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelNameMatch {
    pub hotel_name: String,
    pub city: String,
    pub country_name: String,
}

/// Free-text geocoding match (place, address, landmark).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeMatch {
    pub name: String,
    pub formatted_address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

// ============================================================================
// Hotel availability
// ============================================================================

/// Hotel availability response, flattened from the GDS shape to the fields
/// the portal consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelAvailResponse {
    pub hotel_avail_infos: Vec<HotelAvailInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelAvailInfo {
    pub hotel_code: String,
    pub hotel_name: String,
    pub address_line1: String,
    pub city: String,
    /// GDS ratings arrive as strings, e.g. "4.5".
    pub rating: String,
    pub distance: Option<f64>,
    /// Average nightly rate as a decimal string, e.g. "245.00".
    pub average_nightly_rate: String,
    pub currency_code: String,
    pub image_url: Option<String>,
    pub amenities: Vec<String>,
}

/// Rate re-check for a previously quoted hotel rate key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCheck {
    pub price_change: bool,
    pub new_price: Option<f64>,
}

// ============================================================================
// Seat maps
// ============================================================================

/// Seat occupancy as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupationStatus {
    #[serde(rename = "O")]
    Occupied,
    #[serde(rename = "F")]
    Free,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMapResponse {
    /// Priced seat offers referenced by `SeatCell::offer_item_ref_ids`.
    pub price_definitions: Vec<PriceDefinition>,
    pub cabin_compartments: Vec<CabinCompartment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceDefinition {
    pub id: String,
    pub amount: f64,
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabinCompartment {
    pub cabin_name: String,
    pub seat_rows: Vec<SeatRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatRow {
    pub row: u32,
    pub seats: Vec<SeatCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatCell {
    pub column: char,
    pub occupation_status_code: OccupationStatus,
    pub offer_item_ref_ids: Vec<String>,
}

impl SeatCell {
    pub fn is_occupied(&self) -> bool {
        self.occupation_status_code == OccupationStatus::Occupied
    }
}

// ============================================================================
// Booking
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Traveler {
    pub name: String,
    pub email: String,
    pub notes: String,
}

/// Final request assembled at checkout and submitted once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub flight: FlightSegment,
    pub traveler: Traveler,
    pub seats: Vec<String>,
    pub ancillaries: Vec<AncillaryOption>,
    pub total_price: f64,
}

/// Provider acceptance of a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub pnr: String,
}
