//! Column reducers and per-group trip statistics.
//!
//! Modes break ties on the smallest value, and value counts are ordered by
//! count descending then value ascending, so reports are stable for a given
//! dataset.

use bikeshare_core::dataset::{columns, Dataset};
use bikeshare_core::filters::weekday_name;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Most frequent value. Among equally frequent values the smallest wins.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(T, usize)> = None;
    // Ascending key order, so a later key only wins with a strictly higher count.
    for (value, count) in counts {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Frequency of each distinct value, most frequent first.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut sorted: Vec<(T, usize)> = counts.into_iter().collect();
    // Stable sort keeps ascending value order within equal counts.
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Arithmetic mean, `None` for no values.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Most common month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// 1 = January.
    pub most_common_month: Option<u32>,
    pub most_common_day: Option<String>,
    pub most_common_hour: Option<u32>,
}

/// Most popular stations and start/end combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Option<String>,
    pub most_common_end_station: Option<String>,
    /// Formatted as `"<start>&<end>"`.
    pub most_common_route: Option<String>,
    /// The start and end station behind `most_common_route`.
    pub most_common_trip: Option<(String, String)>,
}

/// Total and average trip duration in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_secs: f64,
    pub mean_secs: Option<f64>,
}

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// User demographics. Absent columns give `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Option<Vec<(String, usize)>>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYearStats>,
}

/// Statistics over one filtered dataset.
pub struct TripAnalytics<'a> {
    dataset: &'a Dataset,
}

impl<'a> TripAnalytics<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// `None` if the data has no start time column.
    pub fn time_stats(&self) -> Option<TimeStats> {
        if !self.dataset.has_column(columns::START_TIME) {
            return None;
        }
        let trips = self.dataset.trips();
        Some(TimeStats {
            most_common_month: mode(trips.iter().map(|t| t.month())),
            most_common_day: mode(trips.iter().map(|t| weekday_name(t.weekday()))).map(String::from),
            most_common_hour: mode(trips.iter().map(|t| t.hour())),
        })
    }

    pub fn station_stats(&self) -> StationStats {
        let trips = self.dataset.trips();
        let starts = trips.iter().map(|t| t.start_station.as_str());
        let ends = trips.iter().map(|t| t.end_station.as_str());
        // Blank stations are missing values; a trip missing either end has no route.
        let pairs = trips
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str()))
            .filter(|(start, end)| !start.is_empty() && !end.is_empty());
        let trip = mode(pairs).map(|(start, end)| (start.to_string(), end.to_string()));

        StationStats {
            most_common_start_station: mode(starts.filter(|s| !s.is_empty())).map(String::from),
            most_common_end_station: mode(ends.filter(|s| !s.is_empty())).map(String::from),
            most_common_route: trip.as_ref().map(|(start, end)| format!("{}&{}", start, end)),
            most_common_trip: trip,
        }
    }

    pub fn duration_stats(&self) -> DurationStats {
        let trips = self.dataset.trips();
        DurationStats {
            trip_count: trips.len(),
            total_secs: trips.iter().map(|t| t.trip_duration).sum(),
            mean_secs: mean(trips.iter().map(|t| t.trip_duration)),
        }
    }

    pub fn user_stats(&self) -> UserStats {
        UserStats {
            user_types: self.user_type_counts(),
            genders: self.gender_counts(),
            birth_years: self.birth_year_stats(),
        }
    }

    pub fn user_type_counts(&self) -> Option<Vec<(String, usize)>> {
        if !self.dataset.has_column(columns::USER_TYPE) {
            return None;
        }
        Some(owned_counts(
            self.dataset.trips().iter().filter_map(|t| t.user_type.as_deref()),
        ))
    }

    pub fn gender_counts(&self) -> Option<Vec<(String, usize)>> {
        if !self.dataset.has_column(columns::GENDER) {
            debug!("No gender column for {}", self.dataset.city);
            return None;
        }
        Some(owned_counts(
            self.dataset.trips().iter().filter_map(|t| t.gender.as_deref()),
        ))
    }

    /// `None` if the column is absent or every cell is blank.
    pub fn birth_year_stats(&self) -> Option<BirthYearStats> {
        if !self.dataset.has_column(columns::BIRTH_YEAR) {
            return None;
        }
        let years: Vec<i32> = self
            .dataset
            .trips()
            .iter()
            .filter_map(|t| t.birth_year)
            .map(|y| y.round() as i32)
            .collect();

        Some(BirthYearStats {
            earliest: *years.iter().min()?,
            most_recent: *years.iter().max()?,
            most_common: mode(years.iter().copied())?,
        })
    }
}

fn owned_counts<'s>(values: impl Iterator<Item = &'s str>) -> Vec<(String, usize)> {
    value_counts(values)
        .into_iter()
        .map(|(v, n)| (v.to_string(), n))
        .collect()
}

/// Format seconds as a human-readable duration string.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, secs)
    }
}
