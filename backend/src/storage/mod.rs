//! # Storage Module
//!
//! Persistence for the weight log. The domain layer only sees the traits in
//! [`traits`]; the CSV implementation keeps every entry in a single
//! `animal_weight_log.csv` file under the configured data directory.

pub mod csv;
pub mod traits;

pub use self::csv::{CsvConnection, WeightLogRepository};
pub use traits::{Connection, WeightLogStorage};
