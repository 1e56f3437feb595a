pub mod config;
pub mod jurisdictions;
pub mod scheduler;
pub mod selection;
pub mod validation;

pub use config::TimelineConfig;
pub use jurisdictions::{default_jurisdictions, find_jurisdiction, RegulatoryOption};
pub use scheduler::{compute_timeline, market_entry_dates, FilingGroup, MarketEntry, ScheduleEntry, Timeline};
pub use selection::{FilingStrategy, ReviewType, SelectedCountry, Selection, SelectionParseError};
pub use validation::validate_timeline;
