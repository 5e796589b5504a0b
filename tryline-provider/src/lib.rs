pub mod airports;
pub mod client;
pub mod mock;
pub mod models;

pub use airports::{Airport, AirportIndex};
pub use client::{ProviderError, ProviderResult, TravelProvider};
pub use mock::MockGdsClient;
pub use models::{
    BookingConfirmation, BookingRequest, CabinCompartment, GeoCategory, GeoDoc, GeocodeMatch,
    HotelAvailInfo, HotelAvailResponse, HotelNameMatch, OccupationStatus, PriceCheck,
    PriceDefinition, SeatCell, SeatMapResponse, SeatRow, Traveler,
};
