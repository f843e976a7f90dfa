//! Weight log table: column layout and row formatting.
//!
//! Rows are built from the kilogram entries held by the controller. Only the
//! weight column depends on the display unit and precision, so switching the
//! unit re-renders strings without touching the underlying data.

use shared::{format_weight, DisplayPrecision, WeightEntry, WeightEntryId, WeightUnit};

use crate::config::{SelectionMode, WeightLogConfig};
use crate::error::RenderError;
use crate::services::date_utils::{format_date, format_datetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// How a column's cell text is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    Date,      // "2024-01-01"
    Weight,    // "22.0 lb"
    Text,
    DateTime,  // "2024-01-01 09:30"
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub display: &'static str,
    pub initial_sort: Option<SortDirection>,
    pub format: ColumnFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub id_column: &'static str,
    pub selection_mode: SelectionMode,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn weight_log(config: &WeightLogConfig) -> Self {
        Self {
            id_column: "ID",
            selection_mode: config.selection_mode,
            columns: vec![
                ColumnSpec {
                    field: "WEIGHT_DATE",
                    display: "Date",
                    initial_sort: Some(SortDirection::Descending),
                    format: ColumnFormat::Date,
                },
                ColumnSpec {
                    field: "WEIGHT",
                    display: "Weight",
                    initial_sort: None,
                    format: ColumnFormat::Weight,
                },
                ColumnSpec {
                    field: "USERNAME",
                    display: "Recorded by",
                    initial_sort: None,
                    format: ColumnFormat::Text,
                },
                ColumnSpec {
                    field: "CREATED_DATE",
                    display: "Created",
                    initial_sort: None,
                    format: ColumnFormat::DateTime,
                },
            ],
        }
    }

    /// The column the table is first sorted on, with its direction
    pub fn initial_sort(&self) -> Option<(&ColumnSpec, SortDirection)> {
        self.columns
            .iter()
            .find_map(|c| c.initial_sort.map(|dir| (c, dir)))
    }
}

/// One formatted table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: WeightEntryId,
    pub date: String,
    pub weight: String,
    pub recorded_by: String,
    pub created: String,
}

/// Format `entries` for display, newest first.
///
/// Fails on the first entry whose stored weight cannot be shown.
pub fn build_rows(
    entries: &[WeightEntry],
    unit: WeightUnit,
    precision: DisplayPrecision,
) -> Result<Vec<TableRow>, RenderError> {
    let mut ordered: Vec<&WeightEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.created_at.cmp(&a.created_at))
            .then(b.id.cmp(&a.id))
    });

    ordered
        .into_iter()
        .map(|entry| format_row(entry, unit, precision))
        .collect()
}

fn format_row(
    entry: &WeightEntry,
    unit: WeightUnit,
    precision: DisplayPrecision,
) -> Result<TableRow, RenderError> {
    if !entry.weight_kg.is_finite() || entry.weight_kg < 0.0 {
        return Err(RenderError::InvalidWeight {
            id: entry.id,
            weight_kg: entry.weight_kg,
        });
    }

    Ok(TableRow {
        id: entry.id,
        date: format_date(entry.date),
        weight: format_weight(entry.weight_kg, unit, precision),
        recorded_by: entry.recorded_by.clone(),
        created: format_datetime(entry.created_at),
    })
}
