//! # REST API
//!
//! HTTP handlers for the `animal_weight_log` resource.

pub mod mappers;
pub mod weight_log_apis;

pub use weight_log_apis::*;
