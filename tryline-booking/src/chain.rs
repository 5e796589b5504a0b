use crate::seats::SeatGrid;
use serde::{Deserialize, Serialize};
use tryline_core::{fare_options, AncillaryOption, FareOption, FareType, FlightSegment, SelectionState};
use tryline_provider::{ProviderError, TravelProvider};

/// Stages of the booking pipeline, in strict forward order. Back
/// navigation moves exactly one stage at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainStage {
    None,
    FlightSelected,
    FareChosen,
    FareConfirmed,
    SeatsChosen,
    AncillariesChosen,
    ReadyForCheckout,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("a fare revalidation is already in flight")]
    RevalidationInFlight,

    #[error("the restricted-fare confirmation must be resolved first")]
    GateUnresolved,

    #[error("no restricted-fare confirmation is pending")]
    NoGate,

    #[error("Seat {0} is not available")]
    SeatUnavailable(String),
}

/// What choosing a fare asks the caller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FareChoice {
    /// Dispatch the revalidation call.
    RevalidationRequired,
    /// The most-restricted tier was picked; the comparison gate must be
    /// confirmed or upgraded out of before revalidation.
    GateInterposed,
}

/// Outcome of applying a revalidation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevalidationOutcome {
    Confirmed,
    /// Revalidation failed; the fare was cleared and must be re-chosen.
    FareCleared,
}

/// Side-by-side comparison shown by the restricted-fare gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareComparison {
    pub chosen: FareOption,
    pub upgrade: FareOption,
}

/// Immutable payload assembled at the end of the chain. Any change after
/// assembly requires restarting from the relevant earlier stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub flight: FlightSegment,
    pub fare_type: FareType,
    pub seats: Vec<String>,
    pub ancillaries: Vec<AncillaryOption>,
    pub total_price: f64,
}

/// The booking pipeline state machine: flight → fare (revalidated) →
/// seats → ancillaries → checkout payload. Gated stages never partially
/// advance; provider failures resolve to explicit outcomes.
pub struct SelectionChain {
    stage: ChainStage,
    selection: Option<SelectionState>,
    pending_fare: Option<FareType>,
    gate: Option<FareComparison>,
    revalidating: bool,
    error_message: Option<String>,
}

impl SelectionChain {
    pub fn new() -> Self {
        Self {
            stage: ChainStage::None,
            selection: None,
            pending_fare: None,
            gate: None,
            revalidating: false,
            error_message: None,
        }
    }

    pub fn stage(&self) -> ChainStage {
        self.stage
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The interposed restricted-fare comparison, if one is pending.
    pub fn basic_gate(&self) -> Option<&FareComparison> {
        self.gate.as_ref()
    }

    fn invalid(&self, to: &str) -> ChainError {
        ChainError::InvalidTransition {
            from: format!("{:?}", self.stage),
            to: to.to_string(),
        }
    }

    // ========================================================================
    // Flight selection
    // ========================================================================

    /// Select a flight from the result list. Re-selecting the current
    /// flight deselects it; selecting a different one replaces it outright.
    pub fn select_flight(&mut self, flight: FlightSegment) -> Result<ChainStage, ChainError> {
        if !matches!(self.stage, ChainStage::None | ChainStage::FlightSelected) {
            return Err(self.invalid("FlightSelected"));
        }

        let already_selected = self
            .selection
            .as_ref()
            .is_some_and(|current| current.flight.id == flight.id);
        if already_selected {
            tracing::debug!(flight = %flight.id, "flight deselected");
            self.selection = None;
            self.stage = ChainStage::None;
        } else {
            tracing::debug!(flight = %flight.id, "flight selected");
            self.selection = Some(SelectionState::new(flight));
            self.stage = ChainStage::FlightSelected;
        }
        self.error_message = None;
        Ok(self.stage)
    }

    // ========================================================================
    // Fare selection and revalidation
    // ========================================================================

    /// Fare ladder for the selected flight.
    pub fn fare_choices(&self) -> Result<Vec<FareOption>, ChainError> {
        let selection = self.selection.as_ref().ok_or_else(|| self.invalid("FareChosen"))?;
        Ok(fare_options(selection.flight.price))
    }

    /// Choose a fare tier. The most-restricted tier interposes a
    /// confirmation gate; every other tier goes straight to revalidation.
    pub fn choose_fare(&mut self, fare: FareType) -> Result<FareChoice, ChainError> {
        if self.stage != ChainStage::FlightSelected {
            return Err(self.invalid("FareChosen"));
        }
        if self.revalidating {
            return Err(ChainError::RevalidationInFlight);
        }

        self.pending_fare = Some(fare);
        self.stage = ChainStage::FareChosen;
        self.error_message = None;

        if fare.is_most_restricted() {
            let ladder = self.fare_choices()?;
            let chosen = ladder
                .iter()
                .find(|o| o.fare == fare)
                .cloned()
                .ok_or_else(|| self.invalid("FareChosen"))?;
            let upgrade = ladder
                .iter()
                .find(|o| o.fare == fare.next_tier_up())
                .cloned()
                .ok_or_else(|| self.invalid("FareChosen"))?;
            self.gate = Some(FareComparison { chosen, upgrade });
            tracing::debug!(fare = %fare, "restricted-fare gate interposed");
            return Ok(FareChoice::GateInterposed);
        }
        Ok(FareChoice::RevalidationRequired)
    }

    /// Accept the restricted fare as-is; revalidation proceeds with it.
    pub fn confirm_basic(&mut self) -> Result<(), ChainError> {
        if self.gate.take().is_none() {
            return Err(ChainError::NoGate);
        }
        Ok(())
    }

    /// Upgrade out of the restricted tier; revalidation proceeds with the
    /// next tier up.
    pub fn upgrade_from_basic(&mut self) -> Result<FareType, ChainError> {
        if self.gate.take().is_none() {
            return Err(ChainError::NoGate);
        }
        let upgraded = self
            .pending_fare
            .ok_or_else(|| self.invalid("FareChosen"))?
            .next_tier_up();
        self.pending_fare = Some(upgraded);
        tracing::debug!(fare = %upgraded, "upgraded out of restricted fare");
        Ok(upgraded)
    }

    /// Start the revalidation call for the pending fare, returning the
    /// flight to revalidate. At most one revalidation may be in flight.
    pub fn begin_revalidation(&mut self) -> Result<FlightSegment, ChainError> {
        if self.stage != ChainStage::FareChosen || self.pending_fare.is_none() {
            return Err(self.invalid("FareConfirmed"));
        }
        if self.gate.is_some() {
            return Err(ChainError::GateUnresolved);
        }
        if self.revalidating {
            return Err(ChainError::RevalidationInFlight);
        }

        let flight = self
            .selection
            .as_ref()
            .map(|s| s.flight.clone())
            .ok_or_else(|| self.invalid("FareConfirmed"))?;
        self.revalidating = true;
        Ok(flight)
    }

    /// Apply the revalidation response. Success confirms the fare and
    /// advances; failure clears the fare so the user must re-choose.
    pub fn apply_revalidation(
        &mut self,
        result: Result<(), ProviderError>,
    ) -> RevalidationOutcome {
        self.revalidating = false;
        match result {
            Ok(()) => {
                if let (Some(selection), Some(fare)) =
                    (self.selection.as_mut(), self.pending_fare.take())
                {
                    selection.fare_type = Some(fare);
                    tracing::info!(fare = %fare, "fare confirmed");
                }
                self.stage = ChainStage::FareConfirmed;
                RevalidationOutcome::Confirmed
            }
            Err(err) => {
                tracing::warn!(error = %err, "fare revalidation failed");
                self.pending_fare = None;
                self.stage = ChainStage::FlightSelected;
                self.error_message =
                    Some("This fare is no longer available. Please choose another fare.".to_string());
                RevalidationOutcome::FareCleared
            }
        }
    }

    /// Choose a fare and run the revalidation round-trip inline. A
    /// restricted-tier choice is returned to the caller unrevalidated so
    /// the gate can be resolved first.
    pub async fn revalidate_fare(
        &mut self,
        fare: FareType,
        provider: &dyn TravelProvider,
    ) -> Result<FareChoice, ChainError> {
        if self.choose_fare(fare)? == FareChoice::GateInterposed {
            return Ok(FareChoice::GateInterposed);
        }
        let flight = self.begin_revalidation()?;
        let result = provider.revalidate_itinerary(&flight).await;
        self.apply_revalidation(result);
        Ok(FareChoice::RevalidationRequired)
    }

    // ========================================================================
    // Seat selection
    // ========================================================================

    /// Toggle a seat against the cabin grid. Re-clicking the selected seat
    /// deselects it; picking a different seat replaces it (one traveler,
    /// one seat). Returns whether the seat is now selected.
    pub fn toggle_seat(&mut self, grid: &SeatGrid, seat_id: &str) -> Result<bool, ChainError> {
        if self.stage != ChainStage::FareConfirmed {
            return Err(self.invalid("SeatsChosen"));
        }
        if !grid.is_available(seat_id) {
            return Err(ChainError::SeatUnavailable(seat_id.to_string()));
        }

        let selection = self.selection.as_mut().ok_or_else(|| {
            ChainError::InvalidTransition {
                from: "None".to_string(),
                to: "SeatsChosen".to_string(),
            }
        })?;

        if selection.selected_seats.iter().any(|s| s == seat_id) {
            selection.selected_seats.clear();
            Ok(false)
        } else {
            selection.selected_seats = vec![seat_id.to_string()];
            Ok(true)
        }
    }

    /// Advance with whatever seats are selected.
    pub fn confirm_seats(&mut self) -> Result<ChainStage, ChainError> {
        if self.stage != ChainStage::FareConfirmed {
            return Err(self.invalid("SeatsChosen"));
        }
        self.stage = ChainStage::SeatsChosen;
        Ok(self.stage)
    }

    /// Skip seat selection entirely; always a valid transition.
    pub fn skip_seats(&mut self) -> Result<ChainStage, ChainError> {
        if self.stage != ChainStage::FareConfirmed {
            return Err(self.invalid("SeatsChosen"));
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.selected_seats.clear();
        }
        self.stage = ChainStage::SeatsChosen;
        Ok(self.stage)
    }

    // ========================================================================
    // Ancillary selection
    // ========================================================================

    /// Toggle an add-on in or out of the selection; returns the running
    /// total of currently selected add-ons.
    pub fn toggle_ancillary(&mut self, option: AncillaryOption) -> Result<f64, ChainError> {
        if self.stage != ChainStage::SeatsChosen {
            return Err(self.invalid("AncillariesChosen"));
        }
        let selection = self.selection.as_mut().ok_or_else(|| {
            ChainError::InvalidTransition {
                from: "None".to_string(),
                to: "AncillariesChosen".to_string(),
            }
        })?;

        if let Some(pos) = selection
            .selected_ancillaries
            .iter()
            .position(|a| a.id == option.id)
        {
            selection.selected_ancillaries.remove(pos);
        } else {
            selection.selected_ancillaries.push(option);
        }
        Ok(self.ancillary_total())
    }

    pub fn ancillary_total(&self) -> f64 {
        self.selection
            .as_ref()
            .map(|s| s.selected_ancillaries.iter().map(|a| a.price).sum())
            .unwrap_or(0.0)
    }

    pub fn confirm_ancillaries(&mut self) -> Result<ChainStage, ChainError> {
        if self.stage != ChainStage::SeatsChosen {
            return Err(self.invalid("AncillariesChosen"));
        }
        self.stage = ChainStage::AncillariesChosen;
        Ok(self.stage)
    }

    /// Skip forward with an empty add-on list regardless of toggles made.
    pub fn skip_ancillaries(&mut self) -> Result<ChainStage, ChainError> {
        if self.stage != ChainStage::SeatsChosen {
            return Err(self.invalid("AncillariesChosen"));
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.selected_ancillaries.clear();
        }
        self.stage = ChainStage::AncillariesChosen;
        Ok(self.stage)
    }

    // ========================================================================
    // Checkout assembly
    // ========================================================================

    /// Freeze the accumulated selection into the checkout payload. Total
    /// is the fare base price plus fixed taxes and fees plus add-ons; seat
    /// surcharges are collected at the airport and not part of the order.
    pub fn assemble_checkout(&mut self, taxes_and_fees: f64) -> Result<CheckoutPayload, ChainError> {
        if self.stage != ChainStage::AncillariesChosen {
            return Err(self.invalid("ReadyForCheckout"));
        }
        let selection = self
            .selection
            .as_ref()
            .ok_or_else(|| self.invalid("ReadyForCheckout"))?;
        let fare_type = selection
            .fare_type
            .ok_or_else(|| self.invalid("ReadyForCheckout"))?;

        let total_price = selection.flight.price + taxes_and_fees + self.ancillary_total();
        let payload = CheckoutPayload {
            flight: selection.flight.clone(),
            fare_type,
            seats: selection.selected_seats.clone(),
            ancillaries: selection.selected_ancillaries.clone(),
            total_price,
        };
        self.stage = ChainStage::ReadyForCheckout;
        tracing::info!(total = total_price, "checkout payload assembled");
        Ok(payload)
    }

    /// Step back exactly one stage, unwinding the state that stage owns.
    pub fn back(&mut self) -> Result<ChainStage, ChainError> {
        self.stage = match self.stage {
            ChainStage::None => return Err(self.invalid("None")),
            ChainStage::FlightSelected => {
                self.selection = None;
                ChainStage::None
            }
            ChainStage::FareChosen => {
                self.pending_fare = None;
                self.gate = None;
                ChainStage::FlightSelected
            }
            ChainStage::FareConfirmed => {
                if let Some(selection) = self.selection.as_mut() {
                    selection.fare_type = None;
                }
                ChainStage::FlightSelected
            }
            ChainStage::SeatsChosen => ChainStage::FareConfirmed,
            ChainStage::AncillariesChosen => ChainStage::SeatsChosen,
            ChainStage::ReadyForCheckout => ChainStage::AncillariesChosen,
        };
        Ok(self.stage)
    }
}

impl Default for SelectionChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tryline_core::AncillaryKind;
    use tryline_provider::{MockGdsClient, SeatMapResponse};

    fn flight(id: &str, price: f64) -> FlightSegment {
        FlightSegment {
            id: id.to_string(),
            airline: "Pacific Air".to_string(),
            airline_code: "PA".to_string(),
            flight_number: "PA 412".to_string(),
            departure_time: "08:15".to_string(),
            arrival_time: "11:05".to_string(),
            origin: "SAN".to_string(),
            destination: "BOS".to_string(),
            duration: "2h 50m".to_string(),
            stops: 0,
            price,
            booking_code: None,
        }
    }

    fn bag() -> AncillaryOption {
        AncillaryOption {
            id: "bag1".to_string(),
            name: "Checked Bag".to_string(),
            kind: AncillaryKind::Bag,
            price: 35.0,
            description: "Up to 23kg".to_string(),
        }
    }

    fn wifi() -> AncillaryOption {
        AncillaryOption {
            id: "wifi".to_string(),
            name: "In-flight Wi-Fi".to_string(),
            kind: AncillaryKind::Wifi,
            price: 15.0,
            description: "Stream quality".to_string(),
        }
    }

    async fn seat_grid() -> SeatGrid {
        let provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        let response: SeatMapResponse = provider.seat_map(&flight("FL-100", 289.0)).await.unwrap();
        SeatGrid::from_response(&response)
    }

    #[test]
    fn test_reselecting_same_flight_deselects() {
        let mut chain = SelectionChain::new();

        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        assert_eq!(chain.stage(), ChainStage::FlightSelected);

        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        assert_eq!(chain.stage(), ChainStage::None);
        assert!(chain.selection().is_none());
    }

    #[test]
    fn test_selecting_different_flight_replaces() {
        let mut chain = SelectionChain::new();

        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain.select_flight(flight("FL-204", 214.0)).unwrap();

        assert_eq!(chain.stage(), ChainStage::FlightSelected);
        assert_eq!(chain.selection().unwrap().flight.id, "FL-204");
    }

    #[test]
    fn test_seats_require_confirmed_fare() {
        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();

        // No fare confirmed yet: seat and ancillary stages are unreachable.
        assert!(chain.confirm_seats().is_err());
        assert!(chain.toggle_ancillary(bag()).is_err());
        assert_eq!(chain.stage(), ChainStage::FlightSelected);
    }

    #[tokio::test]
    async fn test_revalidation_failure_clears_fare() {
        let mut provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        provider.fail_revalidation = true;

        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain
            .revalidate_fare(FareType::Economy, &provider)
            .await
            .unwrap();

        assert_eq!(chain.stage(), ChainStage::FlightSelected);
        assert!(chain.selection().unwrap().fare_type.is_none());
        assert!(chain.error_message().unwrap().contains("no longer available"));

        // Re-choosing after the failure works.
        let ok = MockGdsClient::with_latency(std::time::Duration::ZERO);
        chain.revalidate_fare(FareType::Economy, &ok).await.unwrap();
        assert_eq!(chain.stage(), ChainStage::FareConfirmed);
    }

    #[test]
    fn test_single_revalidation_in_flight() {
        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain.choose_fare(FareType::Economy).unwrap();

        chain.begin_revalidation().unwrap();
        assert!(matches!(
            chain.begin_revalidation(),
            Err(ChainError::RevalidationInFlight)
        ));
    }

    #[tokio::test]
    async fn test_basic_fare_gate_confirm_path() {
        let provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();

        let choice = chain
            .revalidate_fare(FareType::Basic, &provider)
            .await
            .unwrap();
        assert_eq!(choice, FareChoice::GateInterposed);
        assert_eq!(chain.stage(), ChainStage::FareChosen);

        let gate = chain.basic_gate().unwrap();
        assert_eq!(gate.chosen.fare, FareType::Basic);
        assert_eq!(gate.upgrade.fare, FareType::Economy);

        // Revalidation is blocked until the gate is resolved.
        assert!(matches!(
            chain.begin_revalidation(),
            Err(ChainError::GateUnresolved)
        ));

        chain.confirm_basic().unwrap();
        let flight_to_check = chain.begin_revalidation().unwrap();
        let result = provider.revalidate_itinerary(&flight_to_check).await;
        assert_eq!(
            chain.apply_revalidation(result),
            RevalidationOutcome::Confirmed
        );
        assert_eq!(chain.selection().unwrap().fare_type, Some(FareType::Basic));
    }

    #[tokio::test]
    async fn test_basic_fare_gate_upgrade_path() {
        let provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain.choose_fare(FareType::Basic).unwrap();

        assert_eq!(chain.upgrade_from_basic().unwrap(), FareType::Economy);

        let flight_to_check = chain.begin_revalidation().unwrap();
        let result = provider.revalidate_itinerary(&flight_to_check).await;
        chain.apply_revalidation(result);
        assert_eq!(
            chain.selection().unwrap().fare_type,
            Some(FareType::Economy)
        );
    }

    #[tokio::test]
    async fn test_seat_toggle_and_replace() {
        let provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        let grid = seat_grid().await;

        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain
            .revalidate_fare(FareType::Economy, &provider)
            .await
            .unwrap();

        assert!(chain.toggle_seat(&grid, "12A").unwrap());
        assert_eq!(chain.selection().unwrap().selected_seats, vec!["12A"]);

        // Picking another free seat replaces, re-clicking deselects.
        assert!(chain.toggle_seat(&grid, "12B").unwrap());
        assert_eq!(chain.selection().unwrap().selected_seats, vec!["12B"]);
        assert!(!chain.toggle_seat(&grid, "12B").unwrap());
        assert!(chain.selection().unwrap().selected_seats.is_empty());
    }

    #[tokio::test]
    async fn test_ancillary_toggle_totals() {
        let provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain
            .revalidate_fare(FareType::Economy, &provider)
            .await
            .unwrap();
        chain.skip_seats().unwrap();

        assert_eq!(chain.toggle_ancillary(bag()).unwrap(), 35.0);
        assert_eq!(chain.toggle_ancillary(wifi()).unwrap(), 50.0);
        // Toggling back out restores the prior total exactly.
        assert_eq!(chain.toggle_ancillary(wifi()).unwrap(), 35.0);
    }

    #[tokio::test]
    async fn test_skip_ancillaries_discards_toggles() {
        let provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain
            .revalidate_fare(FareType::Economy, &provider)
            .await
            .unwrap();
        chain.skip_seats().unwrap();
        chain.toggle_ancillary(bag()).unwrap();

        chain.skip_ancillaries().unwrap();
        let payload = chain.assemble_checkout(124.50).unwrap();
        assert!(payload.ancillaries.is_empty());
        assert_eq!(payload.total_price, 289.0 + 124.50);
    }

    #[tokio::test]
    async fn test_checkout_total_includes_addons_not_seats() {
        let provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        let grid = seat_grid().await;
        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain
            .revalidate_fare(FareType::Economy, &provider)
            .await
            .unwrap();
        chain.toggle_seat(&grid, "1A").unwrap();
        chain.confirm_seats().unwrap();
        chain.toggle_ancillary(bag()).unwrap();
        chain.confirm_ancillaries().unwrap();

        let payload = chain.assemble_checkout(124.50).unwrap();
        assert_eq!(payload.seats, vec!["1A"]);
        assert_eq!(payload.total_price, 289.0 + 124.50 + 35.0);
    }

    #[tokio::test]
    async fn test_back_unwinds_one_stage() {
        let provider = MockGdsClient::with_latency(std::time::Duration::ZERO);
        let mut chain = SelectionChain::new();
        chain.select_flight(flight("FL-100", 289.0)).unwrap();
        chain
            .revalidate_fare(FareType::Economy, &provider)
            .await
            .unwrap();
        chain.skip_seats().unwrap();

        assert_eq!(chain.back().unwrap(), ChainStage::FareConfirmed);
        assert_eq!(chain.back().unwrap(), ChainStage::FlightSelected);
        assert!(chain.selection().unwrap().fare_type.is_none());
        assert_eq!(chain.back().unwrap(), ChainStage::None);
        assert!(chain.back().is_err());
    }
}
