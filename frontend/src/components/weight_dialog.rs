//! Declarative description of the add/edit weight dialog and the validation
//! applied to what comes back from it.

use chrono::NaiveDate;
use shared::{display_value, WeightEntry, WeightUnit};
use std::collections::BTreeMap;

use crate::config::WeightLogConfig;
use crate::error::FieldError;
use crate::services::date_utils::{format_date, parse_date_input};

pub const FIELD_DATE: &str = "weightdate";
pub const FIELD_WEIGHT: &str = "weight";
pub const FIELD_UNIT: &str = "weightunit";
pub const FIELD_USERNAME: &str = "username";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Date,
    Number,
    /// Options as (value, label) pairs
    Select(Vec<(String, String)>),
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidation {
    None,
    NotBlank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Name the value is posted under
    pub post_field: &'static str,
    /// Row column the value is loaded from, if any
    pub json_field: Option<&'static str>,
    pub label: &'static str,
    pub field_type: FieldType,
    pub validation: FieldValidation,
    pub readonly: bool,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Add,
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogSpec {
    pub add_title: &'static str,
    pub edit_title: &'static str,
    /// Keep the dialog open after OK until the controller closes it
    pub close_on_ok: bool,
    pub columns: u8,
    pub width: u32,
    /// Fields in layout order
    pub fields: Vec<FieldSpec>,
}

impl DialogSpec {
    pub fn weight_entry(config: &WeightLogConfig, today: NaiveDate) -> Self {
        let unit_options = WeightUnit::all()
            .iter()
            .map(|unit| (unit.as_str().to_string(), unit.as_str().to_string()))
            .collect();

        Self {
            add_title: "Add weight entry",
            edit_title: "Edit weight entry",
            close_on_ok: false,
            columns: 1,
            width: config.dialog_width,
            fields: vec![
                FieldSpec {
                    post_field: FIELD_DATE,
                    json_field: Some("WEIGHT_DATE"),
                    label: "Date",
                    field_type: FieldType::Date,
                    validation: FieldValidation::NotBlank,
                    readonly: false,
                    default_value: Some(format_date(today)),
                },
                FieldSpec {
                    post_field: FIELD_WEIGHT,
                    json_field: Some("WEIGHT"),
                    label: "Weight",
                    field_type: FieldType::Number,
                    validation: FieldValidation::NotBlank,
                    readonly: false,
                    default_value: None,
                },
                FieldSpec {
                    post_field: FIELD_UNIT,
                    json_field: None,
                    label: "Unit",
                    field_type: FieldType::Select(unit_options),
                    validation: FieldValidation::None,
                    readonly: false,
                    default_value: Some(config.display_unit.as_str().to_string()),
                },
                FieldSpec {
                    post_field: FIELD_USERNAME,
                    json_field: Some("USERNAME"),
                    label: "Recorded by",
                    field_type: FieldType::Text,
                    validation: FieldValidation::None,
                    readonly: true,
                    default_value: None,
                },
            ],
        }
    }

    pub fn title(&self, mode: DialogMode) -> &'static str {
        match mode {
            DialogMode::Add => self.add_title,
            DialogMode::Edit => self.edit_title,
        }
    }

    pub fn field(&self, post_field: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.post_field == post_field)
    }

    /// Initial values of an empty add dialog
    pub fn add_defaults(&self) -> FieldValues {
        let mut values = FieldValues::new();
        for field in &self.fields {
            if let Some(default) = &field.default_value {
                values.set(field.post_field, default.clone());
            }
        }
        values
    }

    /// Check submitted values against the field list and parse them
    pub fn validate(&self, values: &FieldValues) -> Result<WeightDraft, Vec<FieldError>> {
        let mut errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter(|f| f.validation == FieldValidation::NotBlank && values.is_blank(f.post_field))
            .map(|f| FieldError::Blank(f.post_field))
            .collect();

        let date = match values.get(FIELD_DATE).filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_date_input(raw).or_else(|| {
                errors.push(FieldError::InvalidDate(raw.to_string()));
                None
            }),
            None => None,
        };

        let weight = match values.get(FIELD_WEIGHT).filter(|v| !v.trim().is_empty()) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(w) if w.is_finite() && w >= 0.0 => Some(w),
                _ => {
                    errors.push(FieldError::InvalidNumber(raw.to_string()));
                    None
                }
            },
            None => None,
        };

        let unit = match values.get(FIELD_UNIT).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.parse::<WeightUnit>().map_err(|_| {
                errors.push(FieldError::InvalidUnit(raw.to_string()));
            }).ok(),
            // A missing selector falls back to the default option
            None => self
                .field(FIELD_UNIT)
                .and_then(|f| f.default_value.as_deref())
                .and_then(|d| d.parse().ok()),
        };

        match (date, weight, unit) {
            (Some(date), Some(weight), Some(unit)) if errors.is_empty() => Ok(WeightDraft {
                date,
                weight,
                unit,
                recorded_by: values.get(FIELD_USERNAME).unwrap_or_default().trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Raw field values keyed by post field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_blank(&self, field: &str) -> bool {
        self.get(field).map_or(true, |v| v.trim().is_empty())
    }

    /// Values for editing `entry`, with the weight converted into `config.display_unit`
    pub fn for_entry(entry: &WeightEntry, config: &WeightLogConfig) -> Self {
        let weight = display_value(entry.weight_kg, config.display_unit, config.precision);
        Self::new()
            .with(FIELD_DATE, format_date(entry.date))
            .with(FIELD_WEIGHT, format!("{:.*}", config.precision.decimals(), weight))
            .with(FIELD_UNIT, config.display_unit.as_str())
            .with(FIELD_USERNAME, entry.recorded_by.clone())
    }
}

/// A validated dialog submission. `weight` is still in `unit`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightDraft {
    pub date: NaiveDate,
    pub weight: f64,
    pub unit: WeightUnit,
    pub recorded_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::weight_table::build_rows;
    use chrono::{TimeZone, Utc};
    use shared::DisplayPrecision;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn dialog(unit: WeightUnit) -> DialogSpec {
        let config = WeightLogConfig {
            display_unit: unit,
            ..WeightLogConfig::default()
        };
        DialogSpec::weight_entry(&config, today())
    }

    #[test]
    fn test_field_order_and_flags() {
        let spec = dialog(WeightUnit::Kg);
        let names: Vec<_> = spec.fields.iter().map(|f| f.post_field).collect();
        assert_eq!(names, vec![FIELD_DATE, FIELD_WEIGHT, FIELD_UNIT, FIELD_USERNAME]);
        assert!(spec.field(FIELD_USERNAME).unwrap().readonly);
        assert_eq!(spec.width, 550);
        assert!(!spec.close_on_ok);
        assert_eq!(spec.title(DialogMode::Edit), "Edit weight entry");
    }

    #[test]
    fn test_add_defaults_follow_preference() {
        let values = dialog(WeightUnit::Lb).add_defaults();
        assert_eq!(values.get(FIELD_DATE), Some("2024-06-01"));
        assert_eq!(values.get(FIELD_UNIT), Some("lb"));
        assert_eq!(values.get(FIELD_WEIGHT), None);
    }

    #[test]
    fn test_validate_success() {
        let values = FieldValues::new()
            .with(FIELD_DATE, "2024-01-01")
            .with(FIELD_WEIGHT, " 22.0 ")
            .with(FIELD_UNIT, "lb")
            .with(FIELD_USERNAME, "alice");
        let draft = dialog(WeightUnit::Kg).validate(&values).unwrap();
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(draft.weight, 22.0);
        assert_eq!(draft.unit, WeightUnit::Lb);
        assert_eq!(draft.recorded_by, "alice");
    }

    #[test]
    fn test_validate_reports_blank_required_fields() {
        let values = FieldValues::new().with(FIELD_DATE, " ").with(FIELD_UNIT, "kg");
        let errors = dialog(WeightUnit::Kg).validate(&values).unwrap_err();
        assert_eq!(errors, vec![FieldError::Blank(FIELD_DATE), FieldError::Blank(FIELD_WEIGHT)]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let values = FieldValues::new()
            .with(FIELD_DATE, "2024-13-01")
            .with(FIELD_WEIGHT, "-4")
            .with(FIELD_UNIT, "stone");
        let errors = dialog(WeightUnit::Kg).validate(&values).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::InvalidDate("2024-13-01".to_string()),
                FieldError::InvalidNumber("-4".to_string()),
                FieldError::InvalidUnit("stone".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_unit_uses_default_option() {
        let values = FieldValues::new()
            .with(FIELD_DATE, "2024-01-01")
            .with(FIELD_WEIGHT, "3");
        let draft = dialog(WeightUnit::Lb).validate(&values).unwrap();
        assert_eq!(draft.unit, WeightUnit::Lb);
    }

    #[test]
    fn test_values_for_entry_convert_to_display_unit() {
        let entry = WeightEntry {
            id: 4,
            animal_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            weight_kg: 10.0,
            recorded_by: "bob".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        };
        let config = WeightLogConfig {
            display_unit: WeightUnit::Lb,
            precision: DisplayPrecision::Three,
            ..WeightLogConfig::default()
        };

        let values = FieldValues::for_entry(&entry, &config);
        assert_eq!(values.get(FIELD_WEIGHT), Some("22.046"));
        assert_eq!(values.get(FIELD_UNIT), Some("lb"));
        assert_eq!(values.get(FIELD_DATE), Some("2024-01-01"));
        assert_eq!(values.get(FIELD_USERNAME), Some("bob"));
    }

    #[test]
    fn test_edit_prefill_matches_table_on_rounding_tie() {
        let entry = WeightEntry {
            id: 5,
            animal_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            weight_kg: 10.25,
            recorded_by: "bob".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        };
        let config = WeightLogConfig::default();

        let rows = build_rows(&[entry.clone()], config.display_unit, config.precision).unwrap();
        let values = FieldValues::for_entry(&entry, &config);

        assert_eq!(rows[0].weight, "10.3 kg");
        assert_eq!(values.get(FIELD_WEIGHT), Some("10.3"));
        assert_eq!(
            rows[0].weight,
            format!("{} {}", values.get(FIELD_WEIGHT).unwrap(), config.display_unit)
        );
    }
}
