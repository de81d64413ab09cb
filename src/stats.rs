use std::cmp::Reverse;
use std::hash::Hash;

use ahash::AHashMap;
use chrono::Weekday;

use crate::error::{Error, Result};
use crate::models::Trip;

/// Most frequent value in `values`; ties keep the first-encountered value,
/// so the result is deterministic for any iteration order. `None` on an
/// empty sequence.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: AHashMap<T, (usize, usize)> = AHashMap::new();
    for (idx, v) in values.into_iter().enumerate() {
        counts.entry(v).or_insert((0, idx)).0 += 1;
    }
    counts
        .into_iter()
        .min_by_key(|&(_, (count, first))| (Reverse(count), first))
        .map(|(v, _)| v)
}

/// Frequency of each distinct value, descending by count; equal counts keep
/// first-occurrence order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: AHashMap<T, (usize, usize)> = AHashMap::new();
    for (idx, v) in values.into_iter().enumerate() {
        counts.entry(v).or_insert((0, idx)).0 += 1;
    }
    let mut out: Vec<(T, usize, usize)> = counts
        .into_iter()
        .map(|(v, (count, first))| (v, count, first))
        .collect();
    out.sort_by_key(|&(_, count, first)| (Reverse(count), first));
    out.into_iter().map(|(v, count, _)| (v, count)).collect()
}

/// Most frequent travel times over a filtered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSummary {
    /// 1-based month number.
    pub month: u32,
    pub weekday: Weekday,
    /// Start hour, 0-23.
    pub hour: u32,
}

/// Mode of derived month, weekday, and start hour.
pub fn time_summary(trips: &[Trip]) -> Result<TimeSummary> {
    let month = mode(trips.iter().map(|t| t.month)).ok_or(Error::EmptyTable)?;
    let weekday = mode(trips.iter().map(|t| t.weekday)).ok_or(Error::EmptyTable)?;
    let hour = mode(trips.iter().map(|t| t.hour)).ok_or(Error::EmptyTable)?;
    Ok(TimeSummary {
        month,
        weekday,
        hour,
    })
}

/// Most popular stations and route over a filtered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSummary {
    pub popular_start: String,
    pub popular_end: String,
    pub popular_route: String,
}

/// Mode of start station, end station, and start->end route.
pub fn station_summary(trips: &[Trip]) -> Result<StationSummary> {
    let popular_start = mode(trips.iter().map(|t| t.start_station.as_str()))
        .ok_or(Error::EmptyTable)?
        .to_string();
    let popular_end = mode(trips.iter().map(|t| t.end_station.as_str()))
        .ok_or(Error::EmptyTable)?
        .to_string();
    let popular_route = mode(trips.iter().map(Trip::route)).ok_or(Error::EmptyTable)?;
    Ok(StationSummary {
        popular_start,
        popular_end,
        popular_route,
    })
}

/// Trip-duration aggregates over a filtered table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationSummary {
    /// Total travel time in seconds. Accumulated in u64; city exports are
    /// large enough to overflow a 32-bit sum.
    pub total_secs: u64,
    pub mean_secs: f64,
}

/// Sum and arithmetic mean of trip duration.
pub fn duration_summary(trips: &[Trip]) -> Result<DurationSummary> {
    if trips.is_empty() {
        return Err(Error::EmptyTable);
    }
    let total_secs: u64 = trips.iter().map(|t| t.duration_secs).sum();
    Ok(DurationSummary {
        total_secs,
        mean_secs: total_secs as f64 / trips.len() as f64,
    })
}

/// Birth-year aggregates over the rows that carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearSummary {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

/// User demographics. `gender_counts` and `birth_year` are `None` for the
/// reduced variant (datasets without those columns) and for a full-variant
/// table in which every row lacks the value.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    /// Count per distinct user type, descending by count.
    pub user_type_counts: Vec<(String, usize)>,
    /// Count per distinct gender, descending by count. Null cells excluded.
    pub gender_counts: Option<Vec<(String, usize)>>,
    pub birth_year: Option<BirthYearSummary>,
}

/// Full variant: user types plus gender and birth-year aggregates. Null
/// gender and birth-year values are excluded from every aggregate rather
/// than reported as their own bucket.
pub fn user_summary(trips: &[Trip]) -> Result<UserSummary> {
    if trips.is_empty() {
        return Err(Error::EmptyTable);
    }
    let gender_counts = owned_counts(value_counts(trips.iter().filter_map(|t| t.gender.as_deref())));

    let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
    let birth_year = match (
        years.iter().min().copied(),
        years.iter().max().copied(),
        mode(years.iter().copied()),
    ) {
        (Some(earliest), Some(latest), Some(most_common)) => Some(BirthYearSummary {
            earliest,
            latest,
            most_common,
        }),
        _ => None,
    };

    Ok(UserSummary {
        user_type_counts: user_type_counts(trips),
        gender_counts: Some(gender_counts),
        birth_year,
    })
}

/// Reduced variant for datasets without Gender/Birth Year columns
/// (Washington): user-type counts only.
pub fn user_summary_reduced(trips: &[Trip]) -> Result<UserSummary> {
    if trips.is_empty() {
        return Err(Error::EmptyTable);
    }
    Ok(UserSummary {
        user_type_counts: user_type_counts(trips),
        gender_counts: None,
        birth_year: None,
    })
}

fn user_type_counts(trips: &[Trip]) -> Vec<(String, usize)> {
    owned_counts(value_counts(trips.iter().map(|t| t.user_type.as_str())))
}

fn owned_counts(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(v, count)| (v.to_string(), count))
        .collect()
}
