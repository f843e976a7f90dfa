//! # Weight Log Frontend
//!
//! The weight log tab of an animal record. [`WeightLogController`] owns the
//! session's in-memory list of weight entries and brokers add, edit and delete
//! against the remote `animal_weight_log` resource. Dialog and table widgets
//! are reached through the traits in [`ports`]; this crate only describes
//! them declaratively (see [`components`]).
//!
//! Weights are always held in kilograms. The configured display unit only
//! changes what is rendered and what the edit dialog is pre-filled with.

pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod ports;
pub mod services;

pub use config::{SelectionMode, WeightLogConfig};
pub use controller::{RenderedView, WeightLogController, WeightLogView};
pub use error::{FieldError, RemoteError, RenderError, WeightLogError};
pub use ports::{FormEngine, RemoteStore, SessionContext, TableEngine};
pub use services::api::ApiClient;
