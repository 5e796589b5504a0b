pub mod ancillary;
pub mod config;
pub mod criteria;
pub mod flight;
pub mod hotel;
pub mod sequence;

pub use ancillary::{AncillaryKind, AncillaryOption};
pub use config::{BusinessRules, PortalConfig};
pub use criteria::{DateRange, HotelSearchCriteria, SearchCriteria};
pub use flight::{fare_options, FareOption, FareType, FlightSegment, SelectionState};
pub use hotel::{Hotel, PackageType};
pub use sequence::{RequestSequence, RequestToken};
