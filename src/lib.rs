//! bikeshare-explorer
//!
//! A lightweight Rust library for loading, filtering, and summarizing US
//! bikeshare trip data. Pairs with the `bikeshare` CLI.
//!
//! ### Features
//! - Load a city's trip export from CSV, deriving month/weekday/hour columns
//! - Filter by month (January through June) and day of week
//! - Popular travel times, stations and routes, trip duration totals, and
//!   user demographics (with a reduced variant for datasets lacking gender
//!   and birth-year columns)
//!
//! ### Example
//! ```no_run
//! use bikeshare_explorer::{City, DayFilter, Filters, MonthFilter};
//!
//! let filters = Filters {
//!     city: City::Chicago,
//!     month: MonthFilter::All,
//!     day: DayFilter::All,
//! };
//! let trips = bikeshare_explorer::loader::load_trips("data", &filters)?;
//! let times = bikeshare_explorer::stats::time_summary(&trips)?;
//! println!("{:#?}", times);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod stats;

pub use error::{Error, Result};
pub use models::{City, DayFilter, Filters, MonthFilter, Trip};
