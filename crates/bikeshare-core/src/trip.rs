use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layouts accepted for `Start Time`.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A single trip row from a city file.
///
/// Field names follow the CSV headers. Columns that only some cities publish
/// (`Gender`, `Birth Year`) default to `None` when the header is absent, and
/// blank cells read as `None` as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "Start Time", deserialize_with = "deserialize_timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

impl TripRecord {
    /// Month of the start time, 1 = January.
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    pub fn weekday(&self) -> Weekday {
        self.start_time.weekday()
    }

    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Start and end station joined as `"<start>&<end>"`.
    pub fn route(&self) -> String {
        format!("{}&{}", self.start_station, self.end_station)
    }
}

/// Parse a `Start Time` cell.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {:?}", raw)))
}
