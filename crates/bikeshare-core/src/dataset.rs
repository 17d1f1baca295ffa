//! Loading and filtering a city's trip file.

use crate::config::AppConfig;
use crate::error::{BikeshareError, Result};
use crate::filters::{City, DayFilter, FilterSelection, MonthFilter};
use crate::trip::TripRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use tracing::debug;

/// Header names used for column-presence checks.
pub mod columns {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";
}

/// Trips for one city, after month/day filtering, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub city: City,
    columns: Vec<String>,
    trips: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(city: City, columns: Vec<String>, trips: Vec<TripRecord>) -> Self {
        Self {
            city,
            columns,
            trips,
        }
    }

    /// Load the city's file named by `config` and apply the selection's
    /// month and day filters.
    pub fn load(config: &AppConfig, selection: &FilterSelection) -> Result<Self> {
        let path = config.city_path(selection.city);
        let file = File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BikeshareError::DataFileNotFound {
                city: selection.city.to_string(),
                path: path.clone(),
            },
            _ => BikeshareError::Io(e),
        })?;
        debug!("Loading {} from {}", selection.city, path.display());

        let buf_reader = BufReader::with_capacity(64 * 1024, file);
        Self::from_reader(buf_reader, selection)
    }

    /// Parse CSV data with a header row and apply the selection's filters.
    pub fn from_reader<R: Read>(reader: R, selection: &FilterSelection) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        // Unnamed leading index columns carry no data of interest.
        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .filter(|h| !h.trim().is_empty())
            .map(|h| h.trim().to_string())
            .collect();

        let mut trips = Vec::new();
        for result in csv_reader.deserialize::<TripRecord>() {
            trips.push(result?);
        }
        let total = trips.len();

        let mut dataset = Self::new(selection.city, columns, trips);
        dataset.retain_matching(selection.month, selection.day);
        debug!(
            "Read {} rows, kept {} for {}",
            total,
            dataset.len(),
            selection
        );
        Ok(dataset)
    }

    /// Drop rows whose start month or weekday fails the filters.
    pub fn retain_matching(&mut self, month: MonthFilter, day: DayFilter) {
        self.trips
            .retain(|trip| month.matches(trip.month()) && day.matches(trip.weekday()));
    }

    /// Whether the source file carried this header.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};
    use std::io::Write;

    // 2017-01-02 Mon, 2017-01-06 Fri, 2017-02-03 Fri, 2017-03-06 Mon, 2017-01-09 Mon.
    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-01-02 08:00:00,2017-01-02 08:10:00,600,A,B,Subscriber,Male,1980.0
2,2017-01-06 09:15:00,2017-01-06 09:20:00,300,A,C,Customer,,
3,2017-02-03 17:45:00,2017-02-03 18:00:00,900,B,A,Subscriber,Female,1992.0
4,2017-03-06 08:30:00,2017-03-06 08:35:00,300,C,A,Subscriber,Male,1975.0
5,2017-01-09 12:00:00,2017-01-09 12:30:00,1800,A,B,Subscriber,Female,1980.0
";

    const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
1,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    fn load(csv: &str, month: &str, day: &str) -> Dataset {
        let selection = FilterSelection::parse("chicago", month, day).unwrap();
        Dataset::from_reader(csv.as_bytes(), &selection).unwrap()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let ds = load(CHICAGO_CSV, "all", "all");
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.trips()[0].start_station, "A");
        assert_eq!(ds.trips()[4].trip_duration, 1800.0);
    }

    #[test]
    fn test_month_filter_keeps_only_january() {
        let all = load(CHICAGO_CSV, "all", "all");
        let january_rows = all.trips().iter().filter(|t| t.month() == 1).count();

        let ds = load(CHICAGO_CSV, "january", "all");
        assert_eq!(ds.len(), january_rows);
        assert!(ds.trips().iter().all(|t| t.start_time.month() == 1));
    }

    #[test]
    fn test_day_filter() {
        let ds = load(CHICAGO_CSV, "all", "Monday");
        assert_eq!(ds.len(), 3);
        assert!(ds.trips().iter().all(|t| t.weekday() == Weekday::Mon));
    }

    #[test]
    fn test_month_and_day_filters_combine() {
        let ds = load(CHICAGO_CSV, "january", "monday");
        assert_eq!(ds.len(), 2);
        assert!(ds
            .trips()
            .iter()
            .all(|t| t.month() == 1 && t.weekday() == Weekday::Mon));
    }

    #[test]
    fn test_filter_can_match_nothing() {
        let ds = load(CHICAGO_CSV, "june", "all");
        assert!(ds.is_empty());
    }

    #[test]
    fn test_blank_optional_cells_are_none() {
        let ds = load(CHICAGO_CSV, "all", "all");
        let trip = &ds.trips()[1];
        assert_eq!(trip.gender, None);
        assert_eq!(trip.birth_year, None);
        assert_eq!(ds.trips()[2].gender.as_deref(), Some("Female"));
        assert_eq!(ds.trips()[2].birth_year, Some(1992.0));
    }

    #[test]
    fn test_columns_skip_unnamed_index() {
        let ds = load(CHICAGO_CSV, "all", "all");
        assert_eq!(ds.columns()[0], columns::START_TIME);
        assert!(ds.has_column(columns::GENDER));
        assert!(ds.has_column(columns::BIRTH_YEAR));
    }

    #[test]
    fn test_city_without_demographics() {
        let ds = load(WASHINGTON_CSV, "all", "all");
        assert_eq!(ds.len(), 2);
        assert!(!ds.has_column(columns::GENDER));
        assert!(!ds.has_column(columns::BIRTH_YEAR));
        assert!(ds.trips().iter().all(|t| t.gender.is_none()));
        assert!((ds.trips()[0].trip_duration - 489.066).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_timestamp_is_an_error() {
        let csv = "Start Time,Trip Duration,Start Station,End Station,User Type\n\
                   yesterday,10,A,B,Customer\n";
        let selection = FilterSelection::parse("chicago", "all", "all").unwrap();
        let err = Dataset::from_reader(csv.as_bytes(), &selection).unwrap_err();
        assert!(matches!(err, BikeshareError::Csv(_)));
    }

    #[test]
    fn test_load_from_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join("chicago.csv")).unwrap();
        file.write_all(CHICAGO_CSV.as_bytes()).unwrap();

        let mut config = AppConfig::default();
        config.data.data_dir = dir.path().to_path_buf();

        let selection = FilterSelection::parse("chicago", "february", "all").unwrap();
        let ds = Dataset::load(&config, &selection).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.city, City::Chicago);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.data.data_dir = dir.path().to_path_buf();

        let selection = FilterSelection::parse("washington", "all", "all").unwrap();
        let err = Dataset::load(&config, &selection).unwrap_err();
        match err {
            BikeshareError::DataFileNotFound { city, path } => {
                assert_eq!(city, "washington");
                assert!(path.ends_with("washington.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
