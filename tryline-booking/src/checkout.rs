use crate::chain::CheckoutPayload;
use serde::{Deserialize, Serialize};
use tryline_provider::{BookingConfirmation, BookingRequest, ProviderError, Traveler, TravelProvider};
use uuid::Uuid;

/// Lifecycle of a checkout session. `Confirmed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStatus {
    Review,
    Submitting,
    Confirmed,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Please enter the traveler name and a valid email address.")]
    TravelerIncomplete,

    #[error("a booking submission is already in flight")]
    SubmissionInFlight,

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// Outcome of applying a booking response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Confirmed { pnr: String },
    /// Provider rejected the booking; still at review, resubmission allowed.
    Rejected,
}

/// One line of the price breakdown shown at review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: f64,
}

/// Final immutable order snapshot, created only on confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub payload: CheckoutPayload,
    pub traveler: Traveler,
    pub total_price: f64,
    pub pnr: String,
}

/// Drives the review → submit → confirmed flow over an assembled checkout
/// payload. Submission is single-shot and gated on traveler details.
pub struct CheckoutController {
    payload: CheckoutPayload,
    taxes_and_fees: f64,
    traveler_name: String,
    traveler_email: String,
    traveler_notes: String,
    status: CheckoutStatus,
    error_message: Option<String>,
    order: Option<Order>,
}

impl CheckoutController {
    pub fn new(payload: CheckoutPayload, taxes_and_fees: f64) -> Self {
        Self {
            payload,
            taxes_and_fees,
            traveler_name: String::new(),
            traveler_email: String::new(),
            traveler_notes: String::new(),
            status: CheckoutStatus::Review,
            error_message: None,
            order: None,
        }
    }

    pub fn status(&self) -> &CheckoutStatus {
        &self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The confirmed order, present only after provider acceptance.
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn set_traveler(&mut self, name: &str, email: &str, notes: &str) {
        self.traveler_name = name.to_string();
        self.traveler_email = email.to_string();
        self.traveler_notes = notes.to_string();
    }

    /// Submission gate: non-empty name and a syntactically present email.
    pub fn can_submit(&self) -> bool {
        self.status == CheckoutStatus::Review
            && !self.traveler_name.trim().is_empty()
            && is_plausible_email(&self.traveler_email)
    }

    /// Itemized charges: fare, fixed taxes and fees, then one line per
    /// selected add-on.
    pub fn price_breakdown(&self) -> Vec<BreakdownLine> {
        let mut lines = vec![
            BreakdownLine {
                label: format!(
                    "{} fare ({})",
                    self.payload.flight.flight_number, self.payload.fare_type
                ),
                amount: self.payload.flight.price,
            },
            BreakdownLine {
                label: "Taxes & fees".to_string(),
                amount: self.taxes_and_fees,
            },
        ];
        for ancillary in &self.payload.ancillaries {
            lines.push(BreakdownLine {
                label: ancillary.name.clone(),
                amount: ancillary.price,
            });
        }
        lines
    }

    /// Start the booking submission, returning the request to send. While
    /// a submission is in flight, further submissions are rejected.
    pub fn begin_submit(&mut self) -> Result<BookingRequest, CheckoutError> {
        match self.status {
            CheckoutStatus::Review => {}
            CheckoutStatus::Submitting => return Err(CheckoutError::SubmissionInFlight),
            CheckoutStatus::Confirmed => {
                return Err(CheckoutError::InvalidTransition {
                    from: "Confirmed".to_string(),
                    to: "Submitting".to_string(),
                })
            }
        }
        if !self.can_submit() {
            return Err(CheckoutError::TravelerIncomplete);
        }

        self.status = CheckoutStatus::Submitting;
        self.error_message = None;
        tracing::info!(total = self.payload.total_price, "booking submitted");

        Ok(BookingRequest {
            flight: self.payload.flight.clone(),
            traveler: Traveler {
                name: self.traveler_name.clone(),
                email: self.traveler_email.clone(),
                notes: self.traveler_notes.clone(),
            },
            seats: self.payload.seats.clone(),
            ancillaries: self.payload.ancillaries.clone(),
            total_price: self.payload.total_price,
        })
    }

    /// Apply the provider's booking response. Acceptance is terminal;
    /// rejection returns to review with the error visible.
    pub fn apply_result(
        &mut self,
        result: Result<BookingConfirmation, ProviderError>,
    ) -> SubmitOutcome {
        match result {
            Ok(confirmation) => {
                tracing::info!(pnr = %confirmation.pnr, "booking confirmed");
                self.order = Some(Order {
                    id: Uuid::new_v4(),
                    payload: self.payload.clone(),
                    traveler: Traveler {
                        name: self.traveler_name.clone(),
                        email: self.traveler_email.clone(),
                        notes: self.traveler_notes.clone(),
                    },
                    total_price: self.payload.total_price,
                    pnr: confirmation.pnr.clone(),
                });
                self.status = CheckoutStatus::Confirmed;
                SubmitOutcome::Confirmed {
                    pnr: confirmation.pnr,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "booking rejected");
                self.status = CheckoutStatus::Review;
                self.error_message =
                    Some("We couldn't complete your booking. Please try again.".to_string());
                SubmitOutcome::Rejected
            }
        }
    }

    /// Run the full submission round-trip inline.
    pub async fn submit(
        &mut self,
        provider: &dyn TravelProvider,
    ) -> Result<SubmitOutcome, CheckoutError> {
        let request = self.begin_submit()?;
        let result = provider.create_booking(&request).await;
        Ok(self.apply_result(result))
    }
}

/// Client-side email plausibility only: non-empty with an '@' somewhere
/// inside. Real validation is the provider's problem.
fn is_plausible_email(email: &str) -> bool {
    let trimmed = email.trim();
    trimmed.contains('@') && !trimmed.starts_with('@') && !trimmed.ends_with('@')
}
