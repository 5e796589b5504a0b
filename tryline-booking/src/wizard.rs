use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Linear steps of the match-booking wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Intro,
    Dates,
    Package,
    Details,
    Contact,
    Review,
    Success,
}

impl WizardStep {
    fn next(self) -> WizardStep {
        match self {
            WizardStep::Intro => WizardStep::Dates,
            WizardStep::Dates => WizardStep::Package,
            WizardStep::Package => WizardStep::Details,
            WizardStep::Details => WizardStep::Contact,
            WizardStep::Contact => WizardStep::Review,
            WizardStep::Review => WizardStep::Success,
            WizardStep::Success => WizardStep::Success,
        }
    }

    fn previous(self) -> WizardStep {
        match self {
            WizardStep::Intro => WizardStep::Intro,
            WizardStep::Dates => WizardStep::Intro,
            WizardStep::Package => WizardStep::Dates,
            WizardStep::Details => WizardStep::Package,
            WizardStep::Contact => WizardStep::Details,
            WizardStep::Review => WizardStep::Contact,
            // Terminal; the only exit is tearing the wizard down.
            WizardStep::Success => WizardStep::Success,
        }
    }
}

/// Match package tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    Bronze,
    Silver,
    Gold,
}

/// One entry of the match package catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchPackage {
    pub tier: PackageTier,
    pub name: &'static str,
    pub price: f64,
    pub description: &'static str,
}

pub const PACKAGES: &[MatchPackage] = &[
    MatchPackage {
        tier: PackageTier::Bronze,
        name: "Match Day Pass",
        price: 150.0,
        description: "Match ticket and stadium shuttle",
    },
    MatchPackage {
        tier: PackageTier::Silver,
        name: "Weekend Getaway",
        price: 650.0,
        description: "Match ticket, two hotel nights and shuttle",
    },
    MatchPackage {
        tier: PackageTier::Gold,
        name: "Rivalry Experience",
        price: 1500.0,
        description: "Premium seats, three nights, fan events and transfers",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conference {
    Eastern,
    Western,
    Expansion,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Team {
    pub name: &'static str,
    pub conference: Conference,
}

pub const TEAMS: &[Team] = &[
    Team { name: "Free Jacks", conference: Conference::Eastern },
    Team { name: "Anthem RC", conference: Conference::Eastern },
    Team { name: "Old Glory", conference: Conference::Eastern },
    Team { name: "Hounds", conference: Conference::Eastern },
    Team { name: "Legion", conference: Conference::Western },
    Team { name: "Seawolves", conference: Conference::Western },
    Team { name: "SaberCats", conference: Conference::Western },
    Team { name: "Warriors", conference: Conference::Western },
    Team { name: "Jackals", conference: Conference::Expansion },
    Team { name: "RFC LA", conference: Conference::Expansion },
];

pub fn is_supported_team(name: &str) -> bool {
    TEAMS.iter().any(|team| team.name == name)
}

/// Accumulated wizard form data. Updates are shallow merges; later writes
/// for the same field win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardForm {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub package: PackageTier,
    pub team: Option<String>,
    pub guests: u32,
    pub rooms: u32,
    pub bed_preference: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Default for WizardForm {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            package: PackageTier::Silver,
            team: None,
            guests: 1,
            rooms: 1,
            bed_preference: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        }
    }
}

/// Actions the wizard reacts to. Selection actions update the form
/// without moving the step; navigation is explicit.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    Next,
    Back,
    SetDates {
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    },
    SelectPackage(PackageTier),
    SetTeam(String),
    AdjustGuests(i32),
    AdjustRooms(i32),
    SetBedPreference(String),
    SetContact {
        first_name: String,
        last_name: String,
        email: String,
    },
}

/// Full wizard state. `direction` is presentation metadata for the step
/// transition animation and never gates a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: WizardForm,
    pub direction: i8,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::Intro,
            form: WizardForm::default(),
            direction: 0,
        }
    }
}

impl WizardState {
    /// Whether forward navigation from the current step is allowed.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Intro | WizardStep::Package | WizardStep::Review => true,
            WizardStep::Dates => self.form.check_in.is_some() && self.form.check_out.is_some(),
            WizardStep::Details => self
                .form
                .team
                .as_deref()
                .is_some_and(is_supported_team),
            WizardStep::Contact => {
                !self.form.first_name.trim().is_empty()
                    && !self.form.last_name.trim().is_empty()
                    && !self.form.email.trim().is_empty()
            }
            WizardStep::Success => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.step == WizardStep::Success
    }

    /// Pure transition function. A blocked `Next` returns the state
    /// unchanged; `Back` always moves exactly one step.
    pub fn apply(mut self, action: WizardAction) -> WizardState {
        match action {
            WizardAction::Next => {
                if self.can_advance() {
                    self.step = self.step.next();
                    self.direction = 1;
                }
            }
            WizardAction::Back => {
                if !matches!(self.step, WizardStep::Intro | WizardStep::Success) {
                    self.step = self.step.previous();
                    self.direction = -1;
                }
            }
            WizardAction::SetDates {
                check_in,
                check_out,
            } => {
                if check_in.is_some() {
                    self.form.check_in = check_in;
                }
                if check_out.is_some() {
                    self.form.check_out = check_out;
                }
            }
            WizardAction::SelectPackage(tier) => {
                self.form.package = tier;
            }
            WizardAction::SetTeam(team) => {
                self.form.team = Some(team);
            }
            WizardAction::AdjustGuests(delta) => {
                self.form.guests = clamp_count(self.form.guests, delta);
            }
            WizardAction::AdjustRooms(delta) => {
                self.form.rooms = clamp_count(self.form.rooms, delta);
            }
            WizardAction::SetBedPreference(pref) => {
                self.form.bed_preference = Some(pref);
            }
            WizardAction::SetContact {
                first_name,
                last_name,
                email,
            } => {
                self.form.first_name = first_name;
                self.form.last_name = last_name;
                self.form.email = email;
            }
        }
        self
    }
}

/// Guest/room counters never drop below one.
fn clamp_count(current: u32, delta: i32) -> u32 {
    current.saturating_add_signed(delta).max(1)
}

/// Owns one wizard session. `Success` is terminal; the only exit is
/// `finish`, which tears the session down entirely.
pub struct MatchWizard {
    state: Option<WizardState>,
}

impl MatchWizard {
    pub fn start() -> Self {
        Self {
            state: Some(WizardState::default()),
        }
    }

    pub fn state(&self) -> Option<&WizardState> {
        self.state.as_ref()
    }

    pub fn dispatch(&mut self, action: WizardAction) {
        if let Some(state) = self.state.take() {
            self.state = Some(state.apply(action));
        }
    }

    /// Tear down after success. No state is retained.
    pub fn finish(&mut self) -> bool {
        match &self.state {
            Some(state) if state.is_complete() => {
                self.state = None;
                true
            }
            _ => false,
        }
    }
}
