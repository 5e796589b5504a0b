use crate::models::{
    BookingConfirmation, BookingRequest, GeoCategory, GeoDoc, GeocodeMatch, HotelAvailResponse,
    HotelNameMatch, PriceCheck, SeatMapResponse,
};
use async_trait::async_trait;
use tryline_core::{AncillaryOption, FlightSegment, HotelSearchCriteria};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("fare no longer available")]
    FareUnavailable,

    #[error("booking rejected: {0}")]
    BookingRejected(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Abstract booking-provider API. Every call is an in-process async
/// operation; call sites are responsible for converting errors into
/// explicit state transitions, never letting them propagate uncaught.
#[async_trait]
pub trait TravelProvider: Send + Sync {
    /// Hotel availability for a destination and date range.
    async fn search_hotels(
        &self,
        criteria: &HotelSearchCriteria,
    ) -> ProviderResult<HotelAvailResponse>;

    /// Flight options for an origin/destination/date search.
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> ProviderResult<Vec<FlightSegment>>;

    /// Re-check price/availability of a selected itinerary before the
    /// chain advances past fare selection.
    async fn revalidate_itinerary(&self, flight: &FlightSegment) -> ProviderResult<()>;

    /// Cabin layout with priced seat tiers for a flight.
    async fn seat_map(&self, flight: &FlightSegment) -> ProviderResult<SeatMapResponse>;

    /// Paid add-on catalog for a flight.
    async fn ancillaries(&self, flight_id: &str) -> ProviderResult<Vec<AncillaryOption>>;

    /// Rate re-check for a previously quoted hotel rate key.
    async fn hotel_price_check(&self, rate_key: &str) -> ProviderResult<PriceCheck>;

    /// Submit the assembled booking; acceptance yields a PNR.
    async fn create_booking(&self, request: &BookingRequest)
        -> ProviderResult<BookingConfirmation>;

    /// Remote geo autocomplete, filtered by category.
    async fn geo_autocomplete(&self, query: &str, category: GeoCategory)
        -> ProviderResult<Vec<GeoDoc>>;

    /// Hotel-property name autocomplete.
    async fn autocomplete_hotel_name(&self, query: &str) -> ProviderResult<Vec<HotelNameMatch>>;

    /// Free-text geocoding.
    async fn geocode_location(&self, query: &str) -> ProviderResult<Vec<GeocodeMatch>>;
}
