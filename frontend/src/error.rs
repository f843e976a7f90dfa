use shared::WeightEntryId;

use crate::components::weight_dialog::{FIELD_DATE, FIELD_UNIT, FIELD_WEIGHT};

/// A problem with one field of the add/edit dialog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Blank(&'static str),
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),
    #[error("'{0}' is not a valid weight")]
    InvalidNumber(String),
    #[error("'{0}' is not a weight unit")]
    InvalidUnit(String),
}

impl FieldError {
    /// Post field name of the offending input, for inline highlighting
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Blank(field) => field,
            FieldError::InvalidDate(_) => FIELD_DATE,
            FieldError::InvalidNumber(_) => FIELD_WEIGHT,
            FieldError::InvalidUnit(_) => FIELD_UNIT,
        }
    }
}

/// Failure talking to the `animal_weight_log` resource.
/// A timeout or dropped connection is a `Network` error like any other.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Weight entry {id} has an invalid weight ({weight_kg})")]
    InvalidWeight { id: WeightEntryId, weight_kg: f64 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightLogError {
    #[error("Invalid weight entry: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Weight entry {0} is not in the log")]
    UnknownEntry(WeightEntryId),
}

fn describe_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
