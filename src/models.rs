use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer};

/// Timestamp layout shared by all three city exports.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cities with a backing trip export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Parse exact user input. Anything outside the fixed enumeration
    /// (including different casing) is rejected.
    pub fn from_input(s: &str) -> Option<Self> {
        match s {
            "chicago" => Some(City::Chicago),
            "new york city" => Some(City::NewYorkCity),
            "washington" => Some(City::Washington),
            _ => None,
        }
    }

    /// File name of the backing CSV export.
    pub fn csv_file(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Whether the export carries the Gender and Birth Year columns.
    /// Washington's does not.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        };
        f.write_str(name)
    }
}

/// Months available for filtering. The exports only cover the first half of
/// the year, so the list stops at June.
pub const FILTER_MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Days available for filtering, Monday first.
pub const FILTER_DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Month names indexed by month number minus one.
const MONTH_NAMES: [&str; 12] = [
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

/// Full English name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Full English weekday name (chrono's `Display` abbreviates).
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

/// Month selection: everything, or one of January through June.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-based month number, restricted to 1..=6 by construction.
    Month(u32),
}

impl MonthFilter {
    /// Parse exact user input ("january".."june" or "all").
    pub fn from_input(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(MonthFilter::All);
        }
        FILTER_MONTHS
            .iter()
            .position(|m| *m == s)
            .map(|i| MonthFilter::Month(i as u32 + 1))
    }

    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

/// Weekday selection: everything, or a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

impl DayFilter {
    /// Parse exact user input ("monday".."sunday" or "all").
    pub fn from_input(s: &str) -> Option<Self> {
        let day = match s {
            "all" => return Some(DayFilter::All),
            "monday" => Weekday::Mon,
            "tuesday" => Weekday::Tue,
            "wednesday" => Weekday::Wed,
            "thursday" => Weekday::Thu,
            "friday" => Weekday::Fri,
            "saturday" => Weekday::Sat,
            "sunday" => Weekday::Sun,
            _ => return None,
        };
        Some(DayFilter::Day(day))
    }

    pub fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == day,
        }
    }
}

/// Validated (city, month, day) selection for one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filters {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

/// Tidy trip row used across the crate (one row = one trip).
///
/// `month`, `weekday`, and `hour` are derived from `start_time` at load and
/// never written back to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Trip length in whole seconds.
    pub duration_secs: u64,
    pub user_type: String,
    /// Absent for Washington; empty cells elsewhere load as `None`.
    pub gender: Option<String>,
    /// Absent for Washington; empty cells elsewhere load as `None`.
    pub birth_year: Option<i32>,
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl Trip {
    /// Route label joining the start and end stations.
    pub fn route(&self) -> String {
        format!("{} -> {}", self.start_station, self.end_station)
    }
}

/// Raw entry as exported (header names preserved). Columns beyond these are
/// ignored; Gender and Birth Year default to `None` when the header is absent.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "Trip Duration", deserialize_with = "de_duration_secs")]
    pub duration_secs: u64,
    #[serde(rename = "User Type")]
    pub user_type: String,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default, deserialize_with = "de_opt_birth_year")]
    pub birth_year: Option<i32>,
}

impl RawTrip {
    /// Parse the timestamp and attach the derived columns.
    pub(crate) fn into_trip(self) -> Result<Trip, chrono::ParseError> {
        let start_time = NaiveDateTime::parse_from_str(&self.start_time, START_TIME_FORMAT)?;
        Ok(Trip {
            start_time,
            start_station: self.start_station,
            end_station: self.end_station,
            duration_secs: self.duration_secs,
            user_type: self.user_type,
            gender: self.gender.filter(|g| !g.trim().is_empty()),
            birth_year: self.birth_year,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        })
    }
}

/// Serde helper: parse integer seconds that some exports write as a float
/// (e.g. "300.0"). Negative values are rejected.
fn de_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    let s = raw.trim();
    if let Ok(v) = s.parse::<u64>() {
        return Ok(v);
    }
    match s.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => Ok(v.round() as u64),
        _ => Err(D::Error::custom(format!("invalid trip duration: {raw:?}"))),
    }
}

/// Serde helper: parse an optional birth-year cell. Empty cells and floats
/// like "1992.0" both occur in the exports; normalize to an integer year.
fn de_opt_birth_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v.round() as i32)),
            _ => Err(D::Error::custom(format!("invalid birth year: {s:?}"))),
        },
    }
}
