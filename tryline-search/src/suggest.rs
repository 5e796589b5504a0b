use std::collections::HashSet;
use std::time::Duration;
use tryline_core::{RequestSequence, RequestToken};
use tryline_provider::{
    Airport, AirportIndex, GeoCategory, GeoDoc, GeocodeMatch, HotelNameMatch, TravelProvider,
};

/// Which field the engine backs. The mode decides which sources are
/// queried and how results merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Origin/destination airport picker: local index plus remote geo.
    Flight,
    /// Hotel destination picker: property names plus geocoding.
    Hotel,
}

/// One entry in the suggestion panel, tagged by its source.
#[derive(Debug, Clone)]
pub enum Suggestion {
    Hotel(HotelNameMatch),
    Geocode(GeocodeMatch),
    Airport(Airport),
    Geo(GeoDoc),
}

impl Suggestion {
    /// Stable identity used for cross-source dedup. Hotel and geocode
    /// results carry no id and never dedup against each other.
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Suggestion::Airport(airport) => Some(airport.code),
            Suggestion::Geo(doc) => Some(doc.id.as_str()),
            Suggestion::Hotel(_) | Suggestion::Geocode(_) => None,
        }
    }

    /// Value written back into the input field on selection.
    pub fn display_value(&self) -> String {
        match self {
            Suggestion::Hotel(hotel) => hotel.hotel_name.clone(),
            Suggestion::Geocode(place) => place
                .formatted_address
                .clone()
                .unwrap_or_else(|| place.name.clone()),
            Suggestion::Airport(airport) => airport.code.to_string(),
            Suggestion::Geo(doc) => {
                if doc.id.is_empty() {
                    doc.name.clone()
                } else {
                    doc.id.clone()
                }
            }
        }
    }
}

/// What a keystroke asks the caller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Below the minimum length or unfocused; panel cleared, nothing to do.
    NoLookup,
    /// Wait out the debounce window, re-check currency, then fetch.
    Lookup(RequestToken),
}

/// Debounced, multi-source typeahead over a text input. Each keystroke
/// supersedes the previous one: only the token from the latest input may
/// publish results, so responses landing out of order are dropped.
pub struct SuggestEngine {
    mode: LookupMode,
    airports: AirportIndex,
    sequence: RequestSequence,
    min_query_len: usize,
    debounce: Duration,
    suggestions: Vec<Suggestion>,
    panel_open: bool,
    focused: bool,
}

impl SuggestEngine {
    pub fn new(mode: LookupMode, min_query_len: usize, debounce: Duration) -> Self {
        Self {
            mode,
            airports: AirportIndex::default(),
            sequence: RequestSequence::new(),
            min_query_len,
            debounce,
            suggestions: Vec::new(),
            panel_open: false,
            focused: false,
        }
    }

    /// Cap the local airport-index contribution.
    pub fn with_airport_limit(mut self, limit: usize) -> Self {
        self.airports = AirportIndex::new(limit);
        self
    }

    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    /// How long to wait after a keystroke before fetching.
    pub fn debounce_delay(&self) -> Duration {
        self.debounce
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.sequence.is_current(token)
    }

    /// Focus changes open or close the panel; losing focus keeps the
    /// suggestion list so regaining focus can re-show it.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.panel_open = !self.suggestions.is_empty();
        } else {
            self.panel_open = false;
        }
    }

    /// Register a keystroke. Every call issues a fresh token (invalidating
    /// any in-flight lookup) even when no new lookup is warranted.
    pub fn on_input(&mut self, value: &str) -> InputOutcome {
        let token = self.sequence.issue();

        if value.trim().len() < self.min_query_len {
            self.suggestions.clear();
            self.panel_open = false;
            return InputOutcome::NoLookup;
        }
        if !self.focused {
            return InputOutcome::NoLookup;
        }

        self.panel_open = true;
        InputOutcome::Lookup(token)
    }

    /// Query every source for the mode and merge. Each source degrades
    /// independently: a failed source contributes an empty list rather
    /// than failing the whole lookup.
    pub async fn fetch(&self, query: &str, provider: &dyn TravelProvider) -> Vec<Suggestion> {
        match self.mode {
            LookupMode::Hotel => {
                let (hotels, places) = futures_util::join!(
                    provider.autocomplete_hotel_name(query),
                    provider.geocode_location(query),
                );
                let hotels = hotels.unwrap_or_default();
                let places = places.unwrap_or_default();

                let mut merged: Vec<Suggestion> =
                    hotels.into_iter().map(Suggestion::Hotel).collect();
                merged.extend(places.into_iter().map(Suggestion::Geocode));
                merged
            }
            LookupMode::Flight => {
                let mut merged: Vec<Suggestion> = self
                    .airports
                    .search(query)
                    .into_iter()
                    .map(Suggestion::Airport)
                    .collect();

                let (air, cities) = futures_util::join!(
                    provider.geo_autocomplete(query, GeoCategory::Air),
                    provider.geo_autocomplete(query, GeoCategory::City),
                );
                let remote = air
                    .unwrap_or_default()
                    .into_iter()
                    .chain(cities.unwrap_or_default());

                // First insertion wins, so local index entries shadow remote
                // duplicates. Remote docs without an id are unkeyable and
                // are skipped.
                let mut seen: HashSet<String> = merged
                    .iter()
                    .filter_map(|s| s.entity_id().map(str::to_string))
                    .collect();
                for doc in remote {
                    if doc.id.is_empty() || !seen.insert(doc.id.clone()) {
                        continue;
                    }
                    merged.push(Suggestion::Geo(doc));
                }
                merged
            }
        }
    }

    /// Publish fetched results if the originating keystroke is still the
    /// latest and the field still has focus.
    pub fn apply(&mut self, token: RequestToken, results: Vec<Suggestion>) -> bool {
        if !self.sequence.is_current(token) {
            tracing::debug!(?token, "discarding superseded suggestion response");
            return false;
        }
        if !self.focused {
            return false;
        }
        self.suggestions = results;
        self.panel_open = true;
        true
    }

    /// Pick an entry from the panel; returns the value to write back into
    /// the input field.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let value = self.suggestions.get(index)?.display_value();
        self.suggestions.clear();
        self.panel_open = false;
        Some(value)
    }

    /// Full keystroke-to-panel cycle: debounce, re-check currency, fetch,
    /// publish. Callers driving interleavings by hand use `on_input`,
    /// `fetch`, and `apply` directly.
    pub async fn run_lookup(&mut self, value: &str, provider: &dyn TravelProvider) -> bool {
        let token = match self.on_input(value) {
            InputOutcome::NoLookup => return false,
            InputOutcome::Lookup(token) => token,
        };

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(token) {
            return false;
        }

        let results = self.fetch(value, provider).await;
        self.apply(token, results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tryline_provider::MockGdsClient;

    fn engine(mode: LookupMode) -> SuggestEngine {
        let mut engine = SuggestEngine::new(mode, 2, Duration::from_millis(300));
        engine.set_focus(true);
        engine
    }

    #[test]
    fn test_short_query_clears_panel() {
        let mut engine = engine(LookupMode::Hotel);
        engine.suggestions = vec![Suggestion::Hotel(HotelNameMatch {
            hotel_name: "Rugby Grand".to_string(),
            city: "San Diego".to_string(),
            country_name: "United States".to_string(),
        })];
        engine.panel_open = true;

        assert_eq!(engine.on_input("s"), InputOutcome::NoLookup);
        assert!(engine.suggestions().is_empty());
        assert!(!engine.panel_open());
    }

    #[test]
    fn test_unfocused_input_does_not_open_panel() {
        let mut engine = SuggestEngine::new(LookupMode::Hotel, 2, Duration::from_millis(300));
        assert_eq!(engine.on_input("san diego"), InputOutcome::NoLookup);
        assert!(!engine.panel_open());
    }

    #[test]
    fn test_stale_apply_is_dropped() {
        let mut engine = engine(LookupMode::Hotel);

        let first = match engine.on_input("sa") {
            InputOutcome::Lookup(token) => token,
            other => panic!("expected lookup, got {:?}", other),
        };
        let second = match engine.on_input("san") {
            InputOutcome::Lookup(token) => token,
            other => panic!("expected lookup, got {:?}", other),
        };

        let stale = vec![Suggestion::Geocode(GeocodeMatch {
            name: "Santa Fe".to_string(),
            formatted_address: None,
            city: None,
            country: None,
        })];
        assert!(!engine.apply(first, stale));
        assert!(engine.suggestions().is_empty());

        let fresh = vec![Suggestion::Geocode(GeocodeMatch {
            name: "San Diego".to_string(),
            formatted_address: None,
            city: None,
            country: None,
        })];
        assert!(engine.apply(second, fresh));
        assert_eq!(engine.suggestions().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hotel_mode_merges_properties_before_places() {
        let mut engine = engine(LookupMode::Hotel);
        let provider = MockGdsClient::with_latency(Duration::ZERO);

        assert!(engine.run_lookup("san diego", &provider).await);
        let suggestions = engine.suggestions();
        assert!(matches!(suggestions[0], Suggestion::Hotel(_)));
        assert!(suggestions
            .iter()
            .any(|s| matches!(s, Suggestion::Geocode(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flight_mode_dedups_remote_against_local() {
        let mut engine = engine(LookupMode::Flight);
        let provider = MockGdsClient::with_latency(Duration::ZERO);

        // The mock returns LHR from the remote Air source; the local index
        // also matches LHR for this query, so only one entry survives.
        assert!(engine.run_lookup("lhr", &provider).await);
        let lhr_count = engine
            .suggestions()
            .iter()
            .filter(|s| s.entity_id() == Some("LHR"))
            .count();
        assert_eq!(lhr_count, 1);
        assert!(matches!(engine.suggestions()[0], Suggestion::Airport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_yields_only_final_query() {
        let mut engine = engine(LookupMode::Flight);
        let provider = MockGdsClient::with_latency(Duration::ZERO);

        // Two keystrokes inside one debounce window. The first token is
        // superseded before its window elapses.
        let first = match engine.on_input("bo") {
            InputOutcome::Lookup(token) => token,
            other => panic!("expected lookup, got {:?}", other),
        };
        let applied = engine.run_lookup("bos", &provider).await;
        assert!(applied);
        assert!(!engine.is_current(first));

        // The stale fetch completing afterwards publishes nothing.
        let stale_results = engine.fetch("bo", &provider).await;
        assert!(!engine.apply(first, stale_results));
        assert_eq!(engine.suggestions()[0].entity_id(), Some("BOS"));
    }

    #[test]
    fn test_select_writes_back_and_closes() {
        let mut engine = engine(LookupMode::Flight);
        engine.suggestions = vec![Suggestion::Geo(GeoDoc {
            id: "JFK".to_string(),
            name: "John F. Kennedy International".to_string(),
            category: GeoCategory::Air,
            city: Some("New York".to_string()),
            country_name: "United States".to_string(),
        })];
        engine.panel_open = true;

        assert_eq!(engine.select(0).as_deref(), Some("JFK"));
        assert!(engine.suggestions().is_empty());
        assert!(!engine.panel_open());
        assert!(engine.select(0).is_none());
    }
}
