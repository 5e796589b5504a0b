pub mod chain;
pub mod checkout;
pub mod seats;
pub mod wizard;

pub use chain::{
    ChainError, ChainStage, CheckoutPayload, FareChoice, FareComparison, RevalidationOutcome,
    SelectionChain,
};
pub use checkout::{
    BreakdownLine, CheckoutController, CheckoutError, CheckoutStatus, Order, SubmitOutcome,
};
pub use seats::{Seat, SeatGrid, SeatTier};
pub use wizard::{
    is_supported_team, Conference, MatchPackage, MatchWizard, PackageTier, Team, WizardAction,
    WizardForm, WizardState, WizardStep, PACKAGES, TEAMS,
};
