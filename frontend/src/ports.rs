//! Seams between the weight log controller and the widgets and remote store it
//! drives.

use async_trait::async_trait;
use shared::{
    AnimalId, AnimalRecord, CreateWeightEntryRequest, DeleteWeightEntriesRequest,
    DeleteWeightEntriesResponse, UpdateWeightEntryRequest, WeightEntry, WeightEntryId,
};

use crate::components::buttons::ButtonSpec;
use crate::components::weight_dialog::{DialogMode, DialogSpec, FieldValues};
use crate::components::weight_table::{TableRow, TableSpec};
use crate::error::{FieldError, RemoteError};

/// Everything the weight log tab knows about the page it is shown on
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub animal: AnimalRecord,
    /// Logged-in user, recorded against new entries
    pub username: String,
    /// Entries for `animal` as last confirmed by the server
    pub entries: Vec<WeightEntry>,
}

impl SessionContext {
    pub fn new(animal: AnimalRecord, username: impl Into<String>, entries: Vec<WeightEntry>) -> Self {
        Self {
            animal,
            username: username.into(),
            entries,
        }
    }

    pub fn animal_id(&self) -> AnimalId {
        self.animal.id
    }
}

/// Dialog widget
#[async_trait]
pub trait FormEngine: Send {
    /// Show the dialog with `values` filled in. Resolves to the submitted
    /// values, or `None` if the user dismissed it.
    async fn show_dialog(
        &mut self,
        mode: DialogMode,
        spec: &DialogSpec,
        values: &FieldValues,
    ) -> Option<FieldValues>;

    fn show_validation_errors(&mut self, errors: &[FieldError]);

    /// Ask the user to confirm deleting `count` entries
    async fn confirm_delete(&mut self, count: usize) -> bool;

    fn close_dialog(&mut self);
}

/// Table widget
pub trait TableEngine: Send {
    fn update(&mut self, spec: &TableSpec, rows: &[TableRow]);

    fn selected_ids(&self) -> Vec<WeightEntryId>;

    /// Clear the selection and re-evaluate the toolbar buttons
    fn reset_buttons(&mut self, buttons: &[ButtonSpec]);
}

/// The `animal_weight_log` resource
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Record a new entry and return its id
    async fn create(&self, request: &CreateWeightEntryRequest) -> Result<WeightEntryId, RemoteError>;

    async fn update(&self, request: &UpdateWeightEntryRequest) -> Result<(), RemoteError>;

    async fn delete(
        &self,
        request: &DeleteWeightEntriesRequest,
    ) -> Result<DeleteWeightEntriesResponse, RemoteError>;

    async fn list(&self, animal_id: AnimalId) -> Result<Vec<WeightEntry>, RemoteError>;
}
