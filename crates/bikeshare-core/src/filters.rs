//! Filter selection: which city to load and which month/day to keep.
//!
//! Inputs are matched case-insensitively against fixed name tables; anything
//! else is rejected with [`BikeshareError::InvalidFilter`].

use crate::error::{BikeshareError, Result};
use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

/// Month names indexed from January. Only the first six months are present in
/// the trip data.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Number of months accepted as a filter.
pub const FILTERABLE_MONTHS: usize = 6;

const DAY_NAMES: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        City::ALL
            .into_iter()
            .find(|city| city.name() == wanted)
            .ok_or_else(|| invalid("city", s))
    }
}

/// Month filter: a single month (1 = January) or no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

impl MonthFilter {
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Month(m) => {
                let name = m
                    .checked_sub(1)
                    .and_then(|idx| MONTH_NAMES.get(idx as usize))
                    .copied()
                    .unwrap_or("?");
                f.write_str(name)
            }
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES[..FILTERABLE_MONTHS]
            .iter()
            .position(|name| *name == wanted)
            .map(|idx| MonthFilter::Month(idx as u32 + 1))
            .ok_or_else(|| invalid("month", s))
    }
}

/// Day filter: a single weekday or no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == weekday,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Day(d) => f.write_str(&weekday_name(*d).to_lowercase()),
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        DAY_NAMES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, day)| DayFilter::Day(*day))
            .ok_or_else(|| invalid("day", s))
    }
}

/// A validated (city, month, day) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// Build a selection from raw strings, as given on the command line.
    pub fn parse(city: &str, month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={} month={} day={}", self.city, self.month, self.day)
    }
}

/// Title-cased month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    const TITLES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    TITLES.get(month.checked_sub(1)? as usize).copied()
}

/// Title-cased weekday name, e.g. `Monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn invalid(kind: &'static str, value: &str) -> BikeshareError {
    BikeshareError::InvalidFilter {
        kind,
        value: value.to_string(),
    }
}
