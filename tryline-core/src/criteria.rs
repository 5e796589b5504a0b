use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Travel dates for a search. `start` doubles as the check-in date for
/// hotel searches; `end` is optional (one-way / open-ended stays).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Criteria owned by the search controller. Replaced wholesale on each new
/// search submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub destination: String,
    pub dates: DateRange,
    pub party_size: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            destination: String::new(),
            dates: DateRange::default(),
            party_size: 1,
        }
    }
}

impl SearchCriteria {
    /// A search may be submitted once a destination and at least a start
    /// date are present.
    pub fn is_submittable(&self) -> bool {
        !self.destination.trim().is_empty() && self.dates.start.is_some()
    }

    /// Build the provider-facing request, or `None` when required fields
    /// are missing.
    pub fn to_hotel_request(&self) -> Option<HotelSearchCriteria> {
        let check_in = self.dates.start?;
        Some(HotelSearchCriteria {
            destination: self.destination.clone(),
            check_in_date: format_api_date(check_in),
            check_out_date: self
                .dates
                .end
                .map(format_api_date)
                .unwrap_or_default(),
            adults: self.party_size,
        })
    }
}

/// Wire shape consumed by the provider's hotel-availability lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearchCriteria {
    pub destination: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub adults: u32,
}

fn format_api_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
