use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tryline_provider::SeatMapResponse;

/// Priced seat tier, derived from the offer reference attached to a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatTier {
    Standard,
    Premium,
    Business,
}

/// One selectable seat in the cabin grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    /// Display id, e.g. "12A".
    pub id: String,
    pub row: u32,
    pub column: char,
    pub tier: SeatTier,
    /// Surcharge over the fare; zero for standard seats.
    pub price: f64,
    pub occupied: bool,
}

/// Flattened cabin layout built from the provider seat-map response.
/// Offer-reference ids resolve a seat's tier and surcharge; seats without
/// an offer reference are free standard seats.
#[derive(Debug, Clone)]
pub struct SeatGrid {
    seats: Vec<Seat>,
}

impl SeatGrid {
    pub fn from_response(response: &SeatMapResponse) -> Self {
        let prices: HashMap<&str, f64> = response
            .price_definitions
            .iter()
            .map(|def| (def.id.as_str(), def.amount))
            .collect();

        let prices = &prices;
        let seats = response
            .cabin_compartments
            .iter()
            .flat_map(|compartment| &compartment.seat_rows)
            .flat_map(|row| {
                row.seats.iter().map(move |cell| {
                    let offer = cell.offer_item_ref_ids.first();
                    Seat {
                        id: format!("{}{}", row.row, cell.column),
                        row: row.row,
                        column: cell.column,
                        tier: offer.map_or(SeatTier::Standard, |id| tier_for_offer(id)),
                        price: offer
                            .and_then(|id| prices.get(id.as_str()).copied())
                            .unwrap_or(0.0),
                        occupied: cell.is_occupied(),
                    }
                })
            })
            .collect();

        Self { seats }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, id: &str) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id == id)
    }

    /// A seat can be picked iff it exists and is not occupied.
    pub fn is_available(&self, id: &str) -> bool {
        self.seat(id).is_some_and(|seat| !seat.occupied)
    }
}

fn tier_for_offer(offer_id: &str) -> SeatTier {
    if offer_id.contains("business") {
        SeatTier::Business
    } else if offer_id.contains("premium") {
        SeatTier::Premium
    } else {
        SeatTier::Standard
    }
}
