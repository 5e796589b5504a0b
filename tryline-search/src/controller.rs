use crate::staleness::StalenessTimer;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tryline_core::{
    Hotel, HotelSearchCriteria, PackageType, RequestSequence, RequestToken, SearchCriteria,
};
use tryline_provider::{HotelAvailResponse, ProviderError, TravelProvider};

/// View state of the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Search,
    Searching,
    Results,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Please fill in destination and check-in date.")]
    MissingFields,
}

/// Reported when a details-view rate re-check finds the quoted nightly
/// rate has moved since the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateNotice {
    pub hotel_id: String,
    pub previous_price: f64,
    pub new_price: f64,
}

/// What happened when a provider response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Response was current; results replaced.
    Applied(usize),
    /// Response was current but the provider failed; back to criteria entry.
    Failed,
    /// Response was superseded by a newer request and dropped entirely.
    Discarded,
}

/// Owns the search criteria and the `search → searching → results` state
/// machine. Responses are applied only when their token is still current,
/// which is the sole defense against out-of-order completions.
pub struct SearchController {
    criteria: SearchCriteria,
    view_state: ViewState,
    sequence: RequestSequence,
    results: Vec<Hotel>,
    error_message: Option<String>,
    toast: Option<String>,
    staleness: StalenessTimer,
}

impl SearchController {
    pub fn new(criteria: SearchCriteria, staleness_delay: Duration) -> Self {
        Self {
            criteria,
            view_state: ViewState::Search,
            sequence: RequestSequence::new(),
            results: Vec::new(),
            error_message: None,
            toast: None,
            staleness: StalenessTimer::new(staleness_delay),
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// Replace the criteria wholesale, as happens on each new submission.
    pub fn set_criteria(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria;
    }

    /// Canonical result set for the last applied search.
    pub fn results(&self) -> &[Hotel] {
        &self.results
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// One-shot toast message, consumed by the caller.
    pub fn take_toast(&mut self) -> Option<String> {
        self.toast.take()
    }

    pub fn staleness(&mut self) -> &mut StalenessTimer {
        &mut self.staleness
    }

    /// Validate criteria and move to `searching`, issuing the token the
    /// caller must carry through the async provider call.
    pub fn begin_search(&mut self) -> Result<(RequestToken, HotelSearchCriteria), SearchError> {
        let request = match self.criteria.to_hotel_request() {
            Some(request) if self.criteria.is_submittable() => request,
            _ => {
                self.error_message = Some(SearchError::MissingFields.to_string());
                return Err(SearchError::MissingFields);
            }
        };

        self.error_message = None;
        self.view_state = ViewState::Searching;
        let token = self.sequence.issue();
        tracing::debug!(?token, destination = %request.destination, "search dispatched");
        Ok((token, request))
    }

    /// Apply a provider response for the request identified by `token`.
    /// Non-current tokens are dropped without touching any state.
    pub fn apply_response(
        &mut self,
        token: RequestToken,
        response: Result<HotelAvailResponse, ProviderError>,
    ) -> SearchOutcome {
        if !self.sequence.is_current(token) {
            tracing::debug!(?token, "discarding superseded search response");
            return SearchOutcome::Discarded;
        }

        match response {
            Ok(data) => {
                self.results = map_hotels(&data);
                self.toast = Some(format!("Found {} match packages", self.results.len()));
                self.view_state = ViewState::Results;
                self.staleness.arm(Instant::now());
                SearchOutcome::Applied(self.results.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, "hotel search failed");
                self.view_state = ViewState::Search;
                self.error_message =
                    Some("Unable to fetch results. Please check your connection.".to_string());
                SearchOutcome::Failed
            }
        }
    }

    /// Submit the current criteria and apply the response inline.
    pub async fn search(
        &mut self,
        provider: &dyn TravelProvider,
    ) -> Result<SearchOutcome, SearchError> {
        let (token, request) = self.begin_search()?;
        let response = provider.search_hotels(&request).await;
        Ok(self.apply_response(token, response))
    }

    /// Explicit "modify search" action from the results view. The canonical
    /// result set is kept until the next successful search replaces it.
    pub fn modify_search(&mut self) {
        self.view_state = ViewState::Search;
        self.staleness.clear();
    }

    /// Re-check a hotel's quoted rate when its details view opens. A moved
    /// price updates the canonical record and is reported so the view can
    /// show a notice before booking; a failed check is silent and the
    /// quoted rate stands.
    pub async fn recheck_rate(
        &mut self,
        hotel_id: &str,
        provider: &dyn TravelProvider,
    ) -> Option<RateNotice> {
        let check = match provider.hotel_price_check(hotel_id).await {
            Ok(check) => check,
            Err(err) => {
                tracing::warn!(error = %err, hotel = %hotel_id, "rate re-check failed");
                return None;
            }
        };
        if !check.price_change {
            return None;
        }

        let new_price = check.new_price?;
        let hotel = self.results.iter_mut().find(|h| h.id == hotel_id)?;
        let notice = RateNotice {
            hotel_id: hotel.id.clone(),
            previous_price: hotel.price,
            new_price,
        };
        tracing::info!(
            hotel = %hotel_id,
            from = notice.previous_price,
            to = new_price,
            "quoted rate changed"
        );
        hotel.price = new_price;
        Some(notice)
    }
}

/// Map the provider availability response into portal hotel records,
/// injecting match-package metadata: every other result is a bundle with a
/// 1.5x package rate, and the first two results are preferred partners.
fn map_hotels(response: &HotelAvailResponse) -> Vec<Hotel> {
    response
        .hotel_avail_infos
        .iter()
        .enumerate()
        .map(|(index, info)| {
            let is_bundle = index % 2 == 0;
            let nightly: f64 = info.average_nightly_rate.parse().unwrap_or(0.0);
            Hotel {
                id: info.hotel_code.clone(),
                name: info.hotel_name.clone(),
                address: info.address_line1.clone(),
                rating: info.rating.parse().unwrap_or(0.0),
                price: if is_bundle { nightly * 1.5 } else { nightly },
                currency: info.currency_code.clone(),
                image: info.image_url.clone(),
                amenities: info.amenities.clone(),
                distance: info.distance,
                package_type: if is_bundle {
                    PackageType::Bundle
                } else {
                    PackageType::Stay
                },
                match_ticket_included: is_bundle,
                shuttle_included: is_bundle || index % 3 == 0,
                fan_event_access: is_bundle,
                is_preferred: index < 2,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tryline_core::DateRange;
    use tryline_provider::{HotelAvailInfo, MockGdsClient};

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            destination: "San Diego".to_string(),
            dates: DateRange {
                start: NaiveDate::from_ymd_opt(2026, 9, 13),
                end: NaiveDate::from_ymd_opt(2026, 9, 15),
            },
            party_size: 1,
        }
    }

    fn avail(codes: &[&str]) -> HotelAvailResponse {
        HotelAvailResponse {
            hotel_avail_infos: codes
                .iter()
                .map(|code| HotelAvailInfo {
                    hotel_code: code.to_string(),
                    hotel_name: format!("Hotel {}", code),
                    address_line1: "1 Main St".to_string(),
                    city: "San Diego".to_string(),
                    rating: "4.0".to_string(),
                    distance: Some(1.0),
                    average_nightly_rate: "200.00".to_string(),
                    currency_code: "USD".to_string(),
                    image_url: None,
                    amenities: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn test_submit_requires_destination_and_date() {
        let mut controller =
            SearchController::new(SearchCriteria::default(), Duration::from_secs(60));

        assert!(controller.begin_search().is_err());
        assert_eq!(controller.view_state(), ViewState::Search);
        assert!(controller.error_message().is_some());
    }

    #[test]
    fn test_successful_search_populates_results_and_toast() {
        let mut controller = SearchController::new(criteria(), Duration::from_secs(60));

        let (token, _) = controller.begin_search().unwrap();
        assert_eq!(controller.view_state(), ViewState::Searching);

        let outcome = controller.apply_response(token, Ok(avail(&["1", "2", "3"])));
        assert_eq!(outcome, SearchOutcome::Applied(3));
        assert_eq!(controller.view_state(), ViewState::Results);
        assert_eq!(controller.take_toast().unwrap(), "Found 3 match packages");
    }

    #[test]
    fn test_stale_response_is_discarded_for_all_interleavings() {
        let mut controller = SearchController::new(criteria(), Duration::from_secs(60));

        let (token_a, _) = controller.begin_search().unwrap();
        let (token_b, _) = controller.begin_search().unwrap();

        // A resolves after B was issued: dropped, no state change.
        let outcome = controller.apply_response(token_a, Ok(avail(&["old"])));
        assert_eq!(outcome, SearchOutcome::Discarded);
        assert_eq!(controller.view_state(), ViewState::Searching);
        assert!(controller.results().is_empty());

        // B resolves: applied.
        let outcome = controller.apply_response(token_b, Ok(avail(&["new"])));
        assert_eq!(outcome, SearchOutcome::Applied(1));
        assert_eq!(controller.results()[0].id, "new");

        // A resolving even later (error or success) is still a no-op.
        let outcome = controller.apply_response(
            token_a,
            Err(ProviderError::Request("timeout".to_string())),
        );
        assert_eq!(outcome, SearchOutcome::Discarded);
        assert_eq!(controller.results()[0].id, "new");
        assert_eq!(controller.view_state(), ViewState::Results);
    }

    #[test]
    fn test_provider_error_returns_to_search_with_message() {
        let mut controller = SearchController::new(criteria(), Duration::from_secs(60));

        let (token, _) = controller.begin_search().unwrap();
        let outcome =
            controller.apply_response(token, Err(ProviderError::Request("down".to_string())));

        assert_eq!(outcome, SearchOutcome::Failed);
        assert_eq!(controller.view_state(), ViewState::Search);
        assert!(controller
            .error_message()
            .unwrap()
            .starts_with("Unable to fetch results"));
        assert!(controller.results().is_empty());
    }

    #[test]
    fn test_package_injection() {
        let mut controller = SearchController::new(criteria(), Duration::from_secs(60));
        let (token, _) = controller.begin_search().unwrap();
        controller.apply_response(token, Ok(avail(&["1", "2", "3", "4", "5", "6"])));

        let results = controller.results();
        assert_eq!(results[0].package_type, PackageType::Bundle);
        assert_eq!(results[0].price, 300.0); // 200 * 1.5 package bump
        assert_eq!(results[1].package_type, PackageType::Stay);
        assert_eq!(results[1].price, 200.0);
        assert!(results[0].is_preferred && results[1].is_preferred);
        assert!(!results[2].is_preferred);
        // index 3 is a plain stay but gets the shuttle via the every-third
        // rule; index 5 matches neither rule.
        assert!(results[3].shuttle_included);
        assert!(!results[5].shuttle_included);
    }

    #[tokio::test]
    async fn test_rate_recheck_updates_canonical_price() {
        let mut provider = MockGdsClient::with_latency(Duration::ZERO);
        provider.rate_change = Some(199.0);

        let mut controller = SearchController::new(criteria(), Duration::from_secs(60));
        let (token, _) = controller.begin_search().unwrap();
        controller.apply_response(token, Ok(avail(&["1", "2"])));

        // Index 1 is a plain stay quoted at the raw nightly rate.
        let notice = controller.recheck_rate("2", &provider).await.unwrap();
        assert_eq!(notice.previous_price, 200.0);
        assert_eq!(notice.new_price, 199.0);
        assert_eq!(controller.results()[1].price, 199.0);
    }

    #[tokio::test]
    async fn test_rate_recheck_is_silent_when_unchanged() {
        let provider = MockGdsClient::with_latency(Duration::ZERO);

        let mut controller = SearchController::new(criteria(), Duration::from_secs(60));
        let (token, _) = controller.begin_search().unwrap();
        controller.apply_response(token, Ok(avail(&["1"])));

        assert!(controller.recheck_rate("1", &provider).await.is_none());
        assert_eq!(controller.results()[0].price, 300.0);
    }

    #[test]
    fn test_modify_search_clears_staleness() {
        let mut controller = SearchController::new(criteria(), Duration::from_millis(1));
        let (token, _) = controller.begin_search().unwrap();
        controller.apply_response(token, Ok(avail(&["1"])));

        controller.modify_search();
        assert_eq!(controller.view_state(), ViewState::Search);
        assert!(!controller
            .staleness()
            .is_stale(Instant::now() + Duration::from_secs(5)));
    }
}
