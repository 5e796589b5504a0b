pub mod controller;
pub mod sort;
pub mod staleness;
pub mod suggest;

pub use controller::{RateNotice, SearchController, SearchError, SearchOutcome, ViewState};
pub use sort::{parse_duration_minutes, sort_stats, sorted_view, FareSummary, SortOrder, SortStats};
pub use staleness::StalenessTimer;
pub use suggest::{InputOutcome, LookupMode, SuggestEngine, Suggestion};
