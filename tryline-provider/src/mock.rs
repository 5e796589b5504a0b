use crate::client::{ProviderError, ProviderResult, TravelProvider};
use crate::models::{
    BookingConfirmation, BookingRequest, CabinCompartment, GeoCategory, GeoDoc, GeocodeMatch,
    HotelAvailInfo, HotelAvailResponse, HotelNameMatch, OccupationStatus, PriceCheck,
    PriceDefinition, SeatCell, SeatMapResponse, SeatRow,
};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tryline_core::{AncillaryKind, AncillaryOption, FlightSegment, HotelSearchCriteria};

const SEAT_COLUMNS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
const PREMIUM_SEAT_OFFER: &str = "premium-seat-offer";
const BUSINESS_SEAT_OFFER: &str = "business-seat-offer";

struct MockHotel {
    code: &'static str,
    name: &'static str,
    address: &'static str,
    city: &'static str,
    rating: &'static str,
    price: &'static str,
    distance: f64,
    image: &'static str,
    amenities: &'static [&'static str],
}

const MOCK_HOTELS: &[MockHotel] = &[
    MockHotel {
        code: "10001",
        name: "The Rugby Grand Hotel",
        address: "12 Scrum Lane, San Diego, CA",
        city: "San Diego",
        rating: "5.0",
        price: "245.00",
        distance: 0.5,
        image: "https://images.example.com/rugby-grand.jpg",
        amenities: &["Fan Zone", "Pool", "Gym", "Bar", "Free Wifi"],
    },
    MockHotel {
        code: "10002",
        name: "Stadium View Suites",
        address: "400 Try Line Blvd, Chicago, IL",
        city: "Chicago",
        rating: "4.0",
        price: "185.00",
        distance: 1.2,
        image: "https://images.example.com/stadium-view.jpg",
        amenities: &["Shuttle", "Restaurant", "Meeting Rooms", "Breakfast"],
    },
    MockHotel {
        code: "10003",
        name: "Seawolves Lodge",
        address: "88 Ruck Street, Seattle, WA",
        city: "Seattle",
        rating: "4.5",
        price: "210.00",
        distance: 2.0,
        image: "https://images.example.com/seawolves-lodge.jpg",
        amenities: &["Rooftop Bar", "Spa", "Valet", "Free Wifi"],
    },
    MockHotel {
        code: "10004",
        name: "Free Jacks Inn",
        address: "10 Quincy Ave, Boston, MA",
        city: "Boston",
        rating: "3.5",
        price: "155.00",
        distance: 3.5,
        image: "https://images.example.com/free-jacks-inn.jpg",
        amenities: &["Parking", "Restaurant", "Wifi"],
    },
];

/// In-process mock of the GDS provider. Returns canned fixtures with a
/// simulated network delay; failure flags let tests exercise the error
/// paths of each gated stage.
pub struct MockGdsClient {
    latency: Duration,
    pub fail_search: bool,
    pub fail_revalidation: bool,
    pub fail_booking: bool,
    pub fail_geo: bool,
    /// When set, rate re-checks report the quoted rate moved to this price.
    pub rate_change: Option<f64>,
}

impl MockGdsClient {
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(800))
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            fail_search: false,
            fail_revalidation: false,
            fail_booking: false,
            fail_geo: false,
            rate_change: None,
        }
    }

    async fn simulate_network(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Deterministic occupancy scatter so tests can rely on specific seats
    /// (12A is always free). Roughly 30% of seats come back occupied.
    fn seat_status(row: u32, column_index: usize) -> OccupationStatus {
        if (row * 31 + column_index as u32 * 17 + 7) % 10 < 3 {
            OccupationStatus::Occupied
        } else {
            OccupationStatus::Free
        }
    }

    fn seat_offers(row: u32) -> Vec<String> {
        match row {
            1..=2 => vec![BUSINESS_SEAT_OFFER.to_string()],
            3..=5 => vec![PREMIUM_SEAT_OFFER.to_string()],
            _ => Vec::new(),
        }
    }
}

impl Default for MockGdsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TravelProvider for MockGdsClient {
    async fn search_hotels(
        &self,
        _criteria: &HotelSearchCriteria,
    ) -> ProviderResult<HotelAvailResponse> {
        self.simulate_network().await;

        if self.fail_search {
            return Err(ProviderError::Request(
                "hotel availability service unavailable".to_string(),
            ));
        }

        Ok(HotelAvailResponse {
            hotel_avail_infos: MOCK_HOTELS
                .iter()
                .map(|h| HotelAvailInfo {
                    hotel_code: h.code.to_string(),
                    hotel_name: h.name.to_string(),
                    address_line1: h.address.to_string(),
                    city: h.city.to_string(),
                    rating: h.rating.to_string(),
                    distance: Some(h.distance),
                    average_nightly_rate: h.price.to_string(),
                    currency_code: "USD".to_string(),
                    image_url: Some(h.image.to_string()),
                    amenities: h.amenities.iter().map(|a| a.to_string()).collect(),
                })
                .collect(),
        })
    }

    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        _date: &str,
    ) -> ProviderResult<Vec<FlightSegment>> {
        self.simulate_network().await;

        if self.fail_search {
            return Err(ProviderError::Request(
                "flight shopping service unavailable".to_string(),
            ));
        }

        Ok(vec![
            FlightSegment {
                id: "FL-100".to_string(),
                airline: "Pacific Air".to_string(),
                airline_code: "PA".to_string(),
                flight_number: "PA 412".to_string(),
                departure_time: "08:15".to_string(),
                arrival_time: "11:05".to_string(),
                origin: origin.to_string(),
                destination: destination.to_string(),
                duration: "2h 50m".to_string(),
                stops: 0,
                price: 289.0,
                booking_code: Some("Y".to_string()),
            },
            FlightSegment {
                id: "FL-204".to_string(),
                airline: "Coastal Jet".to_string(),
                airline_code: "CJ".to_string(),
                flight_number: "CJ 88".to_string(),
                departure_time: "13:40".to_string(),
                arrival_time: "17:55".to_string(),
                origin: origin.to_string(),
                destination: destination.to_string(),
                duration: "4h 15m".to_string(),
                stops: 1,
                price: 214.0,
                booking_code: Some("Q".to_string()),
            },
        ])
    }

    async fn revalidate_itinerary(&self, _flight: &FlightSegment) -> ProviderResult<()> {
        self.simulate_network().await;

        if self.fail_revalidation {
            return Err(ProviderError::FareUnavailable);
        }
        Ok(())
    }

    async fn seat_map(&self, _flight: &FlightSegment) -> ProviderResult<SeatMapResponse> {
        self.simulate_network().await;

        let seat_rows = (1..=20)
            .map(|row| SeatRow {
                row,
                seats: SEAT_COLUMNS
                    .iter()
                    .enumerate()
                    .map(|(idx, &column)| SeatCell {
                        column,
                        occupation_status_code: Self::seat_status(row, idx),
                        offer_item_ref_ids: Self::seat_offers(row),
                    })
                    .collect(),
            })
            .collect();

        Ok(SeatMapResponse {
            price_definitions: vec![
                PriceDefinition {
                    id: PREMIUM_SEAT_OFFER.to_string(),
                    amount: 49.0,
                    currency_code: "USD".to_string(),
                },
                PriceDefinition {
                    id: BUSINESS_SEAT_OFFER.to_string(),
                    amount: 150.0,
                    currency_code: "USD".to_string(),
                },
            ],
            cabin_compartments: vec![CabinCompartment {
                cabin_name: "Economy".to_string(),
                seat_rows,
            }],
        })
    }

    async fn ancillaries(&self, _flight_id: &str) -> ProviderResult<Vec<AncillaryOption>> {
        self.simulate_network().await;

        Ok(vec![
            AncillaryOption {
                id: "bag1".to_string(),
                name: "Checked Bag".to_string(),
                kind: AncillaryKind::Bag,
                price: 35.0,
                description: "Up to 23kg".to_string(),
            },
            AncillaryOption {
                id: "wifi".to_string(),
                name: "In-flight Wi-Fi".to_string(),
                kind: AncillaryKind::Wifi,
                price: 15.0,
                description: "Stream quality".to_string(),
            },
            AncillaryOption {
                id: "lounge".to_string(),
                name: "Lounge Access".to_string(),
                kind: AncillaryKind::Lounge,
                price: 50.0,
                description: "Relax before you fly".to_string(),
            },
        ])
    }

    async fn hotel_price_check(&self, _rate_key: &str) -> ProviderResult<PriceCheck> {
        self.simulate_network().await;

        Ok(match self.rate_change {
            Some(new_price) => PriceCheck {
                price_change: true,
                new_price: Some(new_price),
            },
            None => PriceCheck {
                price_change: false,
                new_price: None,
            },
        })
    }

    async fn create_booking(
        &self,
        _request: &BookingRequest,
    ) -> ProviderResult<BookingConfirmation> {
        self.simulate_network().await;

        if self.fail_booking {
            return Err(ProviderError::BookingRejected(
                "payment could not be authorized".to_string(),
            ));
        }

        let pnr = format!("MLR{}", rand::thread_rng().gen_range(1000..10000));
        Ok(BookingConfirmation { pnr })
    }

    async fn geo_autocomplete(
        &self,
        _query: &str,
        category: GeoCategory,
    ) -> ProviderResult<Vec<GeoDoc>> {
        self.simulate_network().await;

        if self.fail_geo {
            return Err(ProviderError::Request("geo lookup failed".to_string()));
        }

        Ok(match category {
            GeoCategory::Air => vec![
                GeoDoc {
                    id: "LHR".to_string(),
                    name: "Heathrow".to_string(),
                    category: GeoCategory::Air,
                    city: Some("London".to_string()),
                    country_name: "UK".to_string(),
                },
                GeoDoc {
                    id: "JFK".to_string(),
                    name: "John F Kennedy".to_string(),
                    category: GeoCategory::Air,
                    city: Some("New York".to_string()),
                    country_name: "USA".to_string(),
                },
            ],
            GeoCategory::City => vec![GeoDoc {
                id: "NYC".to_string(),
                name: "New York City".to_string(),
                category: GeoCategory::City,
                city: Some("New York".to_string()),
                country_name: "USA".to_string(),
            }],
        })
    }

    async fn autocomplete_hotel_name(&self, query: &str) -> ProviderResult<Vec<HotelNameMatch>> {
        self.simulate_network().await;

        if self.fail_geo {
            return Err(ProviderError::Request("hotel lookup failed".to_string()));
        }

        Ok(vec![HotelNameMatch {
            hotel_name: format!("Hilton {}", query),
            city: "San Diego".to_string(),
            country_name: "USA".to_string(),
        }])
    }

    async fn geocode_location(&self, query: &str) -> ProviderResult<Vec<GeocodeMatch>> {
        self.simulate_network().await;

        if self.fail_geo {
            return Err(ProviderError::Request("geocode failed".to_string()));
        }

        Ok(vec![GeocodeMatch {
            name: format!("{} Stadium", query),
            formatted_address: Some("123 Stadium Way".to_string()),
            city: Some("San Diego".to_string()),
            country: Some("USA".to_string()),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_flight() -> FlightSegment {
        FlightSegment {
            id: "FL-100".to_string(),
            airline: "Pacific Air".to_string(),
            airline_code: "PA".to_string(),
            flight_number: "PA 412".to_string(),
            departure_time: "08:15".to_string(),
            arrival_time: "11:05".to_string(),
            origin: "SAN".to_string(),
            destination: "BOS".to_string(),
            duration: "2h 50m".to_string(),
            stops: 0,
            price: 289.0,
            booking_code: None,
        }
    }

    #[tokio::test]
    async fn test_hotel_fixture_count() {
        let client = MockGdsClient::with_latency(Duration::ZERO);
        let criteria = HotelSearchCriteria {
            destination: "San Diego".to_string(),
            check_in_date: "2026-09-13".to_string(),
            check_out_date: "2026-09-15".to_string(),
            adults: 1,
        };
        let response = client.search_hotels(&criteria).await.unwrap();
        assert_eq!(response.hotel_avail_infos.len(), 4);
        assert_eq!(response.hotel_avail_infos[0].hotel_name, "The Rugby Grand Hotel");
    }

    #[tokio::test]
    async fn test_seat_12a_is_free() {
        let client = MockGdsClient::with_latency(Duration::ZERO);
        let map = client.seat_map(&sample_flight()).await.unwrap();

        let row = &map.cabin_compartments[0].seat_rows[11];
        assert_eq!(row.row, 12);
        let seat_a = &row.seats[0];
        assert_eq!(seat_a.column, 'A');
        assert!(!seat_a.is_occupied());
        assert!(seat_a.offer_item_ref_ids.is_empty());
    }

    #[tokio::test]
    async fn test_pnr_prefix() {
        let client = MockGdsClient::with_latency(Duration::ZERO);
        let request = BookingRequest {
            flight: sample_flight(),
            traveler: crate::models::Traveler {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                notes: String::new(),
            },
            seats: vec!["12A".to_string()],
            ancillaries: vec![],
            total_price: 413.5,
        };
        let confirmation = client.create_booking(&request).await.unwrap();
        assert!(confirmation.pnr.starts_with("MLR"));
    }

    #[tokio::test]
    async fn test_rate_change_trigger() {
        let mut client = MockGdsClient::with_latency(Duration::ZERO);
        client.rate_change = Some(225.0);

        let check = client.hotel_price_check("10001").await.unwrap();
        assert!(check.price_change);
        assert_eq!(check.new_price, Some(225.0));

        let quiet = MockGdsClient::with_latency(Duration::ZERO);
        let check = quiet.hotel_price_check("10001").await.unwrap();
        assert!(!check.price_change);
    }

    #[tokio::test]
    async fn test_revalidation_failure_flag() {
        let mut client = MockGdsClient::with_latency(Duration::ZERO);
        client.fail_revalidation = true;
        let err = client.revalidate_itinerary(&sample_flight()).await.unwrap_err();
        assert!(matches!(err, ProviderError::FareUnavailable));
    }
}
