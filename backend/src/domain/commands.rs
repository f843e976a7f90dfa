//! Domain-level command and result types.
//! The REST layer maps the public DTOs from the `shared` crate onto these;
//! they are not exposed over the API.

use chrono::NaiveDate;
use shared::{AnimalId, WeightEntryId, WeightUnit};

/// Input for recording a new weight
#[derive(Debug, Clone)]
pub struct CreateWeightEntryCommand {
    pub animal_id: AnimalId,
    pub date: NaiveDate,
    /// Weight as entered, in `weight_unit`
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub recorded_by: String,
}

/// Input for correcting an existing weight
#[derive(Debug, Clone)]
pub struct UpdateWeightEntryCommand {
    pub weight_id: WeightEntryId,
    pub date: NaiveDate,
    /// Weight as entered, in `weight_unit`
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub recorded_by: String,
}

#[derive(Debug, Clone)]
pub struct DeleteWeightEntriesCommand {
    pub ids: Vec<WeightEntryId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteWeightEntriesResult {
    pub deleted_count: usize,
    pub not_found_ids: Vec<WeightEntryId>,
    pub success_message: String,
}
