//! Core types for the bikeshare explorer.
//!
//! Configuration, filter selection, trip records, CSV loading, the
//! interactive filter prompt and the raw-data pager.

pub mod config;
pub mod dataset;
pub mod error;
pub mod filters;
pub mod pager;
pub mod prompt;
pub mod trip;

pub use config::AppConfig;
pub use dataset::Dataset;
pub use error::BikeshareError;
pub use filters::{City, DayFilter, FilterSelection, MonthFilter};
pub use pager::RawPager;
pub use prompt::{prompt_filters, LineReader};
pub use trip::TripRecord;
