use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{canonical_kilograms, AnimalId, WeightEntryId, WeightUnit};
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub id: WeightEntryId,
    pub animal_id: AnimalId,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub recorded_by: String,
    pub created_at: DateTime<Utc>,
}

/// A validated entry that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeightEntry {
    pub animal_id: AnimalId,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub recorded_by: String,
    pub created_at: DateTime<Utc>,
}

impl NewWeightEntry {
    pub fn with_id(self, id: WeightEntryId) -> WeightEntry {
        WeightEntry {
            id,
            animal_id: self.animal_id,
            date: self.date,
            weight_kg: self.weight_kg,
            recorded_by: self.recorded_by,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightEntryValidationError {
    #[error("Weight must be a finite number")]
    NonFiniteWeight,
    #[error("Weight cannot be negative")]
    NegativeWeight,
    #[error("Recorded by cannot be empty")]
    MissingRecordedBy,
    #[error("At least one weight entry id is required")]
    NoIdsGiven,
    #[error("Weight id in the path ({path}) does not match the body ({body})")]
    MismatchedId { path: WeightEntryId, body: WeightEntryId },
}

/// Derive the stored kilogram value from a weight as entered.
///
/// This is the only place a pound entry becomes kilograms on its way to
/// storage; clients post the value and unit untouched.
pub fn canonical_weight_kg(weight: f64, unit: WeightUnit) -> Result<f64, WeightEntryValidationError> {
    if !weight.is_finite() {
        return Err(WeightEntryValidationError::NonFiniteWeight);
    }
    if weight < 0.0 {
        return Err(WeightEntryValidationError::NegativeWeight);
    }
    Ok(canonical_kilograms(weight, unit))
}

pub fn validate_recorded_by(recorded_by: &str) -> Result<String, WeightEntryValidationError> {
    let trimmed = recorded_by.trim();
    if trimmed.is_empty() {
        return Err(WeightEntryValidationError::MissingRecordedBy);
    }
    Ok(trimmed.to_string())
}

/// Newest first: date descending, then id descending
pub fn newest_first(a: &WeightEntry, b: &WeightEntry) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_weight_from_pounds() {
        let kg = canonical_weight_kg(22.0, WeightUnit::Lb).unwrap();
        assert!((kg - 9.979044).abs() < 1e-6);
    }

    #[test]
    fn test_canonical_weight_from_kilograms_is_unchanged() {
        assert_eq!(canonical_weight_kg(10.0, WeightUnit::Kg).unwrap(), 10.0);
        assert_eq!(canonical_weight_kg(0.0, WeightUnit::Lb).unwrap(), 0.0);
    }

    #[test]
    fn test_canonical_weight_rejects_bad_values() {
        assert_eq!(
            canonical_weight_kg(-1.0, WeightUnit::Kg),
            Err(WeightEntryValidationError::NegativeWeight)
        );
        assert_eq!(
            canonical_weight_kg(f64::NAN, WeightUnit::Kg),
            Err(WeightEntryValidationError::NonFiniteWeight)
        );
        assert_eq!(
            canonical_weight_kg(f64::INFINITY, WeightUnit::Lb),
            Err(WeightEntryValidationError::NonFiniteWeight)
        );
    }

    #[test]
    fn test_validate_recorded_by() {
        assert_eq!(validate_recorded_by("  alice ").unwrap(), "alice");
        assert!(validate_recorded_by("   ").is_err());
    }

    #[test]
    fn test_newest_first_ordering() {
        let created_at = Utc::now();
        let entry = |id, day| WeightEntry {
            id,
            animal_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            weight_kg: 1.0,
            recorded_by: "a".to_string(),
            created_at,
        };
        let mut entries = vec![entry(1, 1), entry(2, 3), entry(3, 1)];
        entries.sort_by(newest_first);
        let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
