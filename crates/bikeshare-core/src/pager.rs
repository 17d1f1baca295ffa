//! Raw-data viewer: shows a fixed number of rows per page.

use crate::dataset::{columns, Dataset};
use crate::error::Result;
use crate::prompt::{ask_yes, LineReader};
use crate::trip::TripRecord;

const FIRST_QUESTION: &str = "Would you like to see raw data? Please write Yes or No.\n";
const MORE_QUESTION: &str = "Would you like to see more raw data? Please write Yes or No.\n";

/// Walks a dataset page by page. Never mutates the dataset.
pub struct RawPager<'a> {
    dataset: &'a Dataset,
    offset: usize,
    page_size: usize,
}

impl<'a> RawPager<'a> {
    pub fn new(dataset: &'a Dataset, page_size: usize) -> Self {
        Self {
            dataset,
            offset: 0,
            page_size: page_size.max(1),
        }
    }

    /// Index of the first row of the next page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Return the next page and advance. Empty once the rows run out.
    pub fn next_page(&mut self) -> &'a [TripRecord] {
        let trips = self.dataset.trips();
        let start = self.offset.min(trips.len());
        let end = self.offset.saturating_add(self.page_size).min(trips.len());
        self.offset = self.offset.saturating_add(self.page_size);
        &trips[start..end]
    }

    /// Render a page, numbering rows from `first_row`.
    pub fn format_page(&self, first_row: usize, rows: &[TripRecord]) -> String {
        let cols = self.dataset.columns();
        let width = cols.iter().map(|c| c.len()).max().unwrap_or(0);

        let mut out = String::new();
        for (i, trip) in rows.iter().enumerate() {
            out.push_str(&format!("[{}]\n", first_row + i));
            for col in cols {
                out.push_str(&format!(
                    "  {:<width$}  {}\n",
                    col,
                    cell(trip, col),
                    width = width
                ));
            }
        }
        out
    }
}

/// Offer raw rows until the user declines. Returns the number of pages shown.
pub fn page_interactively(
    reader: &mut impl LineReader,
    dataset: &Dataset,
    page_size: usize,
) -> Result<usize> {
    let mut pager = RawPager::new(dataset, page_size);
    let mut pages = 0;
    let mut wants_more = ask_yes(reader, FIRST_QUESTION)?;

    while wants_more {
        let first_row = pager.offset();
        let rows = pager.next_page();
        if rows.is_empty() {
            println!("No more rows to show.");
        } else {
            print!("{}", pager.format_page(first_row, rows));
        }
        pages += 1;
        wants_more = ask_yes(reader, MORE_QUESTION)?;
    }
    Ok(pages)
}

fn cell(trip: &TripRecord, column: &str) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "NaN".into());
    match column {
        columns::START_TIME => trip.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        columns::END_TIME => opt(&trip.end_time),
        columns::TRIP_DURATION => trip.trip_duration.to_string(),
        columns::START_STATION => trip.start_station.clone(),
        columns::END_STATION => trip.end_station.clone(),
        columns::USER_TYPE => opt(&trip.user_type),
        columns::GENDER => opt(&trip.gender),
        columns::BIRTH_YEAR => trip
            .birth_year
            .map(|y| format!("{:.0}", y))
            .unwrap_or_else(|| "NaN".into()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::City;
    use crate::prompt::ScriptedReader;
    use crate::trip::parse_timestamp;

    fn dataset(rows: usize) -> Dataset {
        let trips = (0..rows)
            .map(|i| TripRecord {
                start_time: parse_timestamp("2017-04-03 10:00:00").unwrap(),
                end_time: None,
                trip_duration: i as f64,
                start_station: format!("S{}", i),
                end_station: "E".into(),
                user_type: Some("Subscriber".into()),
                gender: None,
                birth_year: None,
            })
            .collect();
        let cols = ["Start Time", "Trip Duration", "Start Station", "End Station", "User Type"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Dataset::new(City::Washington, cols, trips)
    }

    fn stations(rows: &[TripRecord]) -> Vec<&str> {
        rows.iter().map(|t| t.start_station.as_str()).collect()
    }

    #[test]
    fn test_pages_advance_by_page_size() {
        let ds = dataset(12);
        let mut pager = RawPager::new(&ds, 5);
        assert_eq!(stations(pager.next_page()), ["S0", "S1", "S2", "S3", "S4"]);
        assert_eq!(stations(pager.next_page()), ["S5", "S6", "S7", "S8", "S9"]);
        assert_eq!(stations(pager.next_page()), ["S10", "S11"]);
        assert!(pager.next_page().is_empty());
        assert_eq!(ds.len(), 12);
    }

    #[test]
    fn test_huge_page_size_does_not_overflow() {
        let ds = dataset(3);
        let mut pager = RawPager::new(&ds, usize::MAX / 2 + 1);
        assert_eq!(pager.next_page().len(), 3);
        assert!(pager.next_page().is_empty());
        assert!(pager.next_page().is_empty());
        assert_eq!(pager.offset(), usize::MAX);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let ds = dataset(3);
        let mut pager = RawPager::new(&ds, 0);
        assert_eq!(pager.next_page().len(), 1);
    }

    #[test]
    fn test_interactive_two_yes_answers() {
        let ds = dataset(12);
        let mut reader = ScriptedReader::new(["yes", "yes", "no"]);
        let pages = page_interactively(&mut reader, &ds, 5).unwrap();
        assert_eq!(pages, 2);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_interactive_immediate_no() {
        let ds = dataset(12);
        let mut reader = ScriptedReader::new(["no"]);
        let pages = page_interactively(&mut reader, &ds, 5).unwrap();
        assert_eq!(pages, 0);
        assert_eq!(ds.len(), 12);
        assert_eq!(ds.trips()[0].start_station, "S0");
    }

    #[test]
    fn test_format_page_lists_columns() {
        let ds = dataset(7);
        let mut pager = RawPager::new(&ds, 5);
        pager.next_page();
        let first_row = pager.offset();
        let rows = pager.next_page();
        let text = pager.format_page(first_row, rows);
        assert!(text.starts_with("[5]\n"));
        assert!(text.contains("[6]\n"));
        assert!(text.contains("Start Station  S6"));
        assert!(text.contains("Start Time     2017-04-03 10:00:00"));
        assert!(!text.contains("Gender"));
    }
}
