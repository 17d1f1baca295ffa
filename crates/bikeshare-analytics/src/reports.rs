//! Console text for the four statistic groups.

use crate::aggregations::{
    format_duration, DurationStats, StationStats, TimeStats, TripAnalytics, UserStats,
};
use bikeshare_core::filters::{month_name, FilterSelection};
use serde::Serialize;
use std::time::Instant;

const SEPARATOR_WIDTH: usize = 50;
const NO_GENDER_MESSAGE: &str = "There is no gender data for the selected city.";

/// Every statistic group for one selection, for machine-readable output.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub city: String,
    pub month: String,
    pub day: String,
    pub trips: usize,
    pub time: Option<TimeStats>,
    pub stations: StationStats,
    pub duration: DurationStats,
    pub users: UserStats,
}

impl Summary {
    pub fn collect(analytics: &TripAnalytics, selection: &FilterSelection) -> Self {
        Self {
            city: selection.city.to_string(),
            month: selection.month.to_string(),
            day: selection.day.to_string(),
            trips: analytics.dataset().len(),
            time: analytics.time_stats(),
            stations: analytics.station_stats(),
            duration: analytics.duration_stats(),
            users: analytics.user_stats(),
        }
    }
}

/// Renders statistic groups as console text.
pub struct ReportGenerator {
    show_timings: bool,
}

impl ReportGenerator {
    pub fn new(show_timings: bool) -> Self {
        Self { show_timings }
    }

    /// All four groups in order.
    pub fn full_report(&self, analytics: &TripAnalytics) -> String {
        let mut report = String::new();
        if let Some(time) = self.time_report(analytics) {
            report.push_str(&time);
        }
        report.push_str(&self.station_report(analytics));
        report.push_str(&self.duration_report(analytics));
        report.push_str(&self.user_report(analytics));
        report
    }

    /// `None` when the data carries no start times.
    pub fn time_report(&self, analytics: &TripAnalytics) -> Option<String> {
        let started = Instant::now();
        let stats = analytics.time_stats()?;
        Some(self.section(
            "Calculating The Most Frequent Times of Travel...",
            &render_time_stats(&stats),
            started,
        ))
    }

    pub fn station_report(&self, analytics: &TripAnalytics) -> String {
        let started = Instant::now();
        let stats = analytics.station_stats();
        self.section(
            "Calculating The Most Popular Stations and Trip...",
            &render_station_stats(&stats),
            started,
        )
    }

    pub fn duration_report(&self, analytics: &TripAnalytics) -> String {
        let started = Instant::now();
        let stats = analytics.duration_stats();
        self.section(
            "Calculating Trip Duration...",
            &render_duration_stats(&stats),
            started,
        )
    }

    pub fn user_report(&self, analytics: &TripAnalytics) -> String {
        let started = Instant::now();
        let stats = analytics.user_stats();
        self.section(
            "Calculating User Stats...",
            &render_user_stats(&stats),
            started,
        )
    }

    fn section(&self, title: &str, body: &str, started: Instant) -> String {
        let mut out = format!("\n{}\n\n{}", title, body);
        if self.show_timings {
            out.push_str(&format!(
                "\nThis took {:.6} seconds.\n",
                started.elapsed().as_secs_f64()
            ));
        }
        out.push_str(&format!("\n{}\n", "-".repeat(SEPARATOR_WIDTH)));
        out
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn render_time_stats(stats: &TimeStats) -> String {
    let month = stats
        .most_common_month
        .and_then(month_name)
        .unwrap_or("n/a");
    format!(
        "Most common month: {}\nMost common day: {}\nMost common hour: {}\n",
        month,
        or_na(stats.most_common_day.as_deref()),
        stats
            .most_common_hour
            .map(|h| h.to_string())
            .unwrap_or_else(|| "n/a".into()),
    )
}

pub fn render_station_stats(stats: &StationStats) -> String {
    let route = stats
        .most_common_trip
        .as_ref()
        .map(|(start, end)| format!("{} -> {}", start, end));
    format!(
        "Most common start station: {}\nMost common end station: {}\nMost common trip: {}\n",
        or_na(stats.most_common_start_station.as_deref()),
        or_na(stats.most_common_end_station.as_deref()),
        or_na(route.as_deref()),
    )
}

pub fn render_duration_stats(stats: &DurationStats) -> String {
    let mut out = format!(
        "The total travel time is {} seconds ({})\n",
        stats.total_secs,
        format_duration(stats.total_secs)
    );
    match stats.mean_secs {
        Some(mean) => out.push_str(&format!(
            "The average travel time is {} seconds ({})\n",
            mean,
            format_duration(mean)
        )),
        None => out.push_str("The average travel time is n/a\n"),
    }
    out
}

pub fn render_user_stats(stats: &UserStats) -> String {
    let mut out = String::new();

    if let Some(types) = &stats.user_types {
        out.push_str("Counts of user types:\n");
        push_counts(&mut out, types);
    }

    match &stats.genders {
        Some(genders) => {
            out.push_str("Counts of gender:\n");
            push_counts(&mut out, genders);
        }
        None => {
            out.push_str(NO_GENDER_MESSAGE);
            out.push('\n');
        }
    }

    if let Some(years) = &stats.birth_years {
        out.push_str(&format!(
            "Earliest year of birth: {}\nMost recent year of birth: {}\nMost common year of birth: {}\n",
            years.earliest, years.most_recent, years.most_common
        ));
    }

    out
}

fn push_counts(out: &mut String, counts: &[(String, usize)]) {
    let width = counts.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
    for (value, count) in counts {
        out.push_str(&format!("  {:<width$}  {}\n", value, count, width = width));
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("n/a")
}
