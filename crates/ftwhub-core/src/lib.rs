//! Core types: data values, deep merge, event normalization, month partitioning

pub mod error;
pub mod event;
pub mod ical;
pub mod links;
pub mod merge;
pub mod normalize;
pub mod partition;
pub mod time;
pub mod tracing;
pub mod value;

pub use error::{EventRef, NormalizeError, NormalizeResult};
pub use event::Event;
pub use ical::{ical_data_url, to_calendar};
pub use links::{EventLink, LinkKind, resolve_links};
pub use merge::merge;
pub use normalize::{derive_workshop_event, normalize_event, normalize_events};
pub use partition::{Bucket, MonthGroup, MonthSummary, group_by_month};
pub use time::{EventTime, MONTHS_DE, MonthParseError, MonthWindow};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use value::{Map, Value};
