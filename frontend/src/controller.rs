//! # Weight Log Controller
//!
//! View-model for the weight log tab of an animal record. The controller owns
//! the session's in-memory list of [`WeightEntry`] values and keeps it equal
//! to the last state the server confirmed: every mutation is sent to the
//! [`RemoteStore`] first and applied locally only once the call succeeds.
//!
//! Each dialog interaction runs idle -> dialog open -> validate -> submit ->
//! idle. Mutating operations take `&mut self`, so only one interaction can be
//! in flight at a time.

use chrono::Utc;
use shared::{
    canonical_kilograms, CreateWeightEntryRequest, DeleteWeightEntriesRequest, UpdateWeightEntryRequest,
    WeightEntry, WeightEntryId, WeightUnit,
};
use tracing::{debug, error, info, warn};

use crate::components::buttons::{weight_log_buttons, ButtonSpec};
use crate::components::weight_dialog::{DialogMode, DialogSpec, FieldValues, WeightDraft, FIELD_USERNAME};
use crate::components::weight_table::{build_rows, TableRow, TableSpec};
use crate::config::WeightLogConfig;
use crate::error::{RenderError, WeightLogError};
use crate::ports::{FormEngine, RemoteStore, SessionContext, TableEngine};
use crate::services::date_utils::today;

/// Tab identifier on the animal record page
pub const WEIGHT_LOG_TAB: &str = "weight_log";

/// Everything needed to draw the tab
#[derive(Debug, Clone, PartialEq)]
pub struct WeightLogView {
    pub dialog: DialogSpec,
    pub table: TableSpec,
    pub buttons: Vec<ButtonSpec>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    Ready {
        title: String,
        header: String,
        tab: &'static str,
        view: WeightLogView,
    },
    /// Shown in place of the tab when the view could not be built
    Fallback { message: String },
}

pub struct WeightLogController<F, T, R> {
    config: WeightLogConfig,
    session: SessionContext,
    form: F,
    table: T,
    store: R,
}

impl<F, T, R> WeightLogController<F, T, R>
where
    F: FormEngine,
    T: TableEngine,
    R: RemoteStore,
{
    pub fn new(config: WeightLogConfig, session: SessionContext, form: F, table: T, store: R) -> Self {
        Self {
            config,
            session,
            form,
            table,
            store,
        }
    }

    pub fn config(&self) -> &WeightLogConfig {
        &self.config
    }

    pub fn entries(&self) -> &[WeightEntry] {
        &self.session.entries
    }

    /// Page title, e.g. "Rex - D001 (Male Dog aged 2 years)"
    pub fn title(&self) -> String {
        self.session.animal.title()
    }

    fn dialog_spec(&self) -> DialogSpec {
        DialogSpec::weight_entry(&self.config, today())
    }

    fn table_spec(&self) -> TableSpec {
        TableSpec::weight_log(&self.config)
    }

    fn buttons(&self) -> Vec<ButtonSpec> {
        weight_log_buttons(self.config.selection_mode)
    }

    /// Build the view from current state without any I/O
    pub fn list_view(&self) -> Result<WeightLogView, RenderError> {
        let rows = build_rows(&self.session.entries, self.config.display_unit, self.config.precision)?;
        Ok(WeightLogView {
            dialog: self.dialog_spec(),
            table: self.table_spec(),
            buttons: self.buttons(),
            rows,
        })
    }

    /// Build the tab, or a fallback message if the entries cannot be shown
    pub fn render(&self) -> RenderedView {
        match self.list_view() {
            Ok(view) => RenderedView::Ready {
                title: self.title(),
                header: self.session.animal.header(),
                tab: WEIGHT_LOG_TAB,
                view,
            },
            Err(e) => {
                error!(animal_id = self.session.animal_id(), "Failed to render weight log: {}", e);
                RenderedView::Fallback {
                    message: format!("The weight log could not be displayed: {}", e),
                }
            }
        }
    }

    /// Push the current rows to the table widget
    pub fn bind(&mut self) {
        match build_rows(&self.session.entries, self.config.display_unit, self.config.precision) {
            Ok(rows) => {
                let spec = self.table_spec();
                self.table.update(&spec, &rows);
            }
            Err(e) => error!(animal_id = self.session.animal_id(), "Failed to bind weight log table: {}", e),
        }
    }

    /// Switch the unit weights are shown in. Stored kilograms are untouched.
    pub fn set_display_unit(&mut self, unit: WeightUnit) {
        debug!("Weight display unit set to {}", unit);
        self.config.display_unit = unit;
        self.bind();
    }

    /// Reload the entries from the server. On failure the last known entries
    /// are kept.
    pub async fn sync(&mut self) -> Result<usize, WeightLogError> {
        let animal_id = self.session.animal_id();
        match self.store.list(animal_id).await {
            Ok(entries) => {
                info!(animal_id, "Loaded {} weight entries", entries.len());
                self.session.entries = entries;
                self.bind();
                Ok(self.session.entries.len())
            }
            Err(e) => {
                error!(animal_id, "Failed to load weight entries: {}", e);
                Err(e.into())
            }
        }
    }

    /// Open the add dialog and record the entry it returns.
    /// `Ok(None)` if the dialog was dismissed.
    pub async fn create(&mut self) -> Result<Option<WeightEntry>, WeightLogError> {
        let spec = self.dialog_spec();
        let values = spec
            .add_defaults()
            .with(FIELD_USERNAME, self.session.username.clone());

        match self.form.show_dialog(DialogMode::Add, &spec, &values).await {
            Some(submitted) => self.submit_create(&submitted).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn submit_create(&mut self, values: &FieldValues) -> Result<WeightEntry, WeightLogError> {
        let draft = self.validate(values)?;
        let request = CreateWeightEntryRequest {
            animal_id: self.session.animal_id(),
            date: draft.date,
            weight: draft.weight,
            weight_unit: draft.unit,
            recorded_by: self.session.username.clone(),
        };

        let id = match self.store.create(&request).await {
            Ok(id) => id,
            Err(e) => {
                error!(animal_id = request.animal_id, "Failed to create weight entry: {}", e);
                return Err(e.into());
            }
        };

        let entry = WeightEntry {
            id,
            animal_id: request.animal_id,
            date: request.date,
            weight_kg: canonical_kilograms(request.weight, request.weight_unit),
            recorded_by: request.recorded_by,
            created_at: Utc::now(),
        };
        info!(animal_id = entry.animal_id, "Created weight entry {}", entry.id);

        self.session.entries.push(entry.clone());
        self.bind();
        self.form.close_dialog();
        Ok(entry)
    }

    /// Open the edit dialog for entry `id` and apply what it returns.
    /// `Ok(None)` if the dialog was dismissed.
    pub async fn edit(&mut self, id: WeightEntryId) -> Result<Option<WeightEntry>, WeightLogError> {
        let entry = self
            .session
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(WeightLogError::UnknownEntry(id))?;

        let spec = self.dialog_spec();
        let values = FieldValues::for_entry(entry, &self.config);

        match self.form.show_dialog(DialogMode::Edit, &spec, &values).await {
            Some(submitted) => self.submit_edit(id, &submitted).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn submit_edit(
        &mut self,
        id: WeightEntryId,
        values: &FieldValues,
    ) -> Result<WeightEntry, WeightLogError> {
        let index = self
            .session
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(WeightLogError::UnknownEntry(id))?;
        let draft = self.validate(values)?;

        let recorded_by = if draft.recorded_by.is_empty() {
            self.session.entries[index].recorded_by.clone()
        } else {
            draft.recorded_by
        };
        let request = UpdateWeightEntryRequest {
            weight_id: id,
            date: draft.date,
            weight: draft.weight,
            weight_unit: draft.unit,
            recorded_by,
        };

        if let Err(e) = self.store.update(&request).await {
            error!(animal_id = self.session.animal_id(), "Failed to update weight entry {}: {}", id, e);
            return Err(e.into());
        }

        let entry = &mut self.session.entries[index];
        entry.date = request.date;
        entry.weight_kg = canonical_kilograms(request.weight, request.weight_unit);
        entry.recorded_by = request.recorded_by;
        let updated = entry.clone();
        info!(animal_id = updated.animal_id, "Updated weight entry {}", id);

        self.bind();
        self.form.close_dialog();
        Ok(updated)
    }

    /// Delete the entries currently selected in the table
    pub async fn delete_table_selection(&mut self) -> Result<usize, WeightLogError> {
        let selected = self.table.selected_ids();
        self.delete_selected(&selected).await
    }

    /// Delete `selected_ids` after confirmation. Returns how many entries were
    /// removed locally; 0 if nothing was selected or the user declined.
    pub async fn delete_selected(&mut self, selected_ids: &[WeightEntryId]) -> Result<usize, WeightLogError> {
        if selected_ids.is_empty() {
            return Ok(0);
        }
        if !self.form.confirm_delete(selected_ids.len()).await {
            debug!("Deletion of {} weight entries declined", selected_ids.len());
            return Ok(0);
        }

        let buttons = self.buttons();
        self.table.reset_buttons(&buttons);

        let request = DeleteWeightEntriesRequest {
            ids: selected_ids.to_vec(),
        };
        match self.store.delete(&request).await {
            Ok(response) => {
                if !response.not_found_ids.is_empty() {
                    warn!("Weight entries already gone on the server: {:?}", response.not_found_ids);
                }
            }
            Err(e) => {
                error!(animal_id = self.session.animal_id(), "Failed to delete weight entries: {}", e);
                return Err(e.into());
            }
        }

        let before = self.session.entries.len();
        self.session.entries.retain(|e| !selected_ids.contains(&e.id));
        let removed = before - self.session.entries.len();
        info!(animal_id = self.session.animal_id(), "Deleted {} weight entries", removed);

        self.bind();
        Ok(removed)
    }

    /// Close any open dialog and hand the session back to its owner
    pub fn destroy(mut self) -> SessionContext {
        self.form.close_dialog();
        self.session
    }

    fn validate(&mut self, values: &FieldValues) -> Result<WeightDraft, WeightLogError> {
        self.dialog_spec().validate(values).map_err(|errors| {
            warn!("Weight entry failed validation: {:?}", errors);
            self.form.show_validation_errors(&errors);
            WeightLogError::Validation(errors)
        })
    }
}
