//! # Domain Module
//!
//! Business rules for the animal weight log: canonicalizing submitted weights
//! to kilograms, assigning server-side fields and deciding what a create,
//! update or delete means for the stored log.

pub mod commands;
pub mod models;
pub mod weight_log_service;

pub use weight_log_service::{WeightLogService, WeightLogServiceError};
