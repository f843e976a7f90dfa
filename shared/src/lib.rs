use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pounds per kilogram
pub const KG_TO_LB: f64 = 2.20462;

/// Server-assigned identifier of a weight entry
pub type WeightEntryId = i64;

/// Identifier of the animal record a weight entry belongs to
pub type AnimalId = i64;

/// One weight measurement for an animal.
///
/// `weight_kg` is always stored in kilograms; the unit shown to the user is a
/// presentation concern and never lives on the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: WeightEntryId,
    /// Animal this entry belongs to
    pub animal_id: AnimalId,
    /// Calendar date the weight was recorded
    pub date: NaiveDate,
    /// Canonical weight in kilograms
    pub weight_kg: f64,
    /// Username of whoever recorded the entry
    pub recorded_by: String,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
}

/// Unit used to display or enter a weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }

    /// Map the legacy "ShowWeightInLbs" configuration string to a unit
    pub fn from_show_in_lbs(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("yes") {
            WeightUnit::Lb
        } else {
            WeightUnit::Kg
        }
    }

    /// How many of this unit make up one kilogram
    pub fn per_kilogram(&self) -> f64 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lb => KG_TO_LB,
        }
    }

    pub fn all() -> [WeightUnit; 2] {
        [WeightUnit::Kg, WeightUnit::Lb]
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lb" => Ok(WeightUnit::Lb),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitParseError(pub String);

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown weight unit '{}', expected kg or lb", self.0)
    }
}

impl std::error::Error for UnitParseError {}

/// Number of decimal places shown when a weight is displayed or edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPrecision {
    #[default]
    One,
    Three,
}

impl DisplayPrecision {
    pub fn decimals(&self) -> usize {
        match self {
            DisplayPrecision::One => 1,
            DisplayPrecision::Three => 3,
        }
    }

    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals() as i32);
        (value * scale).round() / scale
    }

    /// Largest error introduced by `round`, in the displayed unit
    pub fn tolerance(&self) -> f64 {
        0.5 * 10f64.powi(-(self.decimals() as i32))
    }
}

/// Convert a canonical kilogram weight into `unit`
pub fn from_kilograms(weight_kg: f64, unit: WeightUnit) -> f64 {
    weight_kg * unit.per_kilogram()
}

/// Convert a weight expressed in `unit` back to kilograms
pub fn to_kilograms(value: f64, unit: WeightUnit) -> f64 {
    value / unit.per_kilogram()
}

/// Decimal places kept on a stored kilogram value
pub const CANONICAL_DECIMALS: i32 = 6;

/// Kilogram value stored for a weight entered in `unit`, rounded to
/// `CANONICAL_DECIMALS` places
pub fn canonical_kilograms(value: f64, unit: WeightUnit) -> f64 {
    let scale = 10f64.powi(CANONICAL_DECIMALS);
    (to_kilograms(value, unit) * scale).round() / scale
}

/// Rounded numeric value shown to the user for a kilogram weight
pub fn display_value(weight_kg: f64, unit: WeightUnit, precision: DisplayPrecision) -> f64 {
    precision.round(from_kilograms(weight_kg, unit))
}

/// Render a kilogram weight as e.g. "22.0 lb" or "10.000 kg"
pub fn format_weight(weight_kg: f64, unit: WeightUnit, precision: DisplayPrecision) -> String {
    format!(
        "{:.*} {}",
        precision.decimals(),
        display_value(weight_kg, unit, precision),
        unit
    )
}

/// Animal whose weight log is being displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: AnimalId,
    /// Shelter code, e.g. "D2024001"
    pub code: String,
    pub name: String,
    pub sex_name: String,
    pub species_name: String,
    /// Human-readable age, e.g. "2 years"
    pub age: String,
}

impl AnimalRecord {
    /// Page title: "Rex - D001 (Male Dog aged 2 years)"
    pub fn title(&self) -> String {
        format!(
            "{} - {} ({} {} aged {})",
            self.name, self.code, self.sex_name, self.species_name, self.age
        )
    }

    /// Content header: "D001 Rex"
    pub fn header(&self) -> String {
        format!("{} {}", self.code, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWeightEntryRequest {
    pub animal_id: AnimalId,
    pub date: NaiveDate,
    /// Weight exactly as entered, expressed in `weight_unit`
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub recorded_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWeightEntryResponse {
    pub id: WeightEntryId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateWeightEntryRequest {
    pub weight_id: WeightEntryId,
    pub date: NaiveDate,
    /// Weight exactly as entered, expressed in `weight_unit`
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub recorded_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateWeightEntryResponse {
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteWeightEntriesRequest {
    pub ids: Vec<WeightEntryId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteWeightEntriesResponse {
    pub deleted_count: usize,
    pub success_message: String,
    /// Requested ids that did not exist
    pub not_found_ids: Vec<WeightEntryId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntryListResponse {
    pub entries: Vec<WeightEntry>,
}
