pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod library;
pub mod logger;
pub mod sweep;

pub use api::{create_router, AppState};
pub use classifier::{classify, ActivityZone, BpmRange};
pub use filter::{filter_by_tempo, SongSummary, TempoMatch};
pub use library::{Library, Track};
pub use sweep::generate_ranges;
