//! Trip statistics and console reports for bikeshare.
//!
//! Computes time-of-travel modes, station popularity, duration totals and
//! user demographics over a filtered dataset.

pub mod aggregations;
pub mod reports;

pub use aggregations::{
    BirthYearStats, DurationStats, StationStats, TimeStats, TripAnalytics, UserStats,
};
pub use reports::{ReportGenerator, Summary};
