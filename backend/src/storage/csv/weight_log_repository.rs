//! # CSV Weight Log Repository
//!
//! Every weight entry for every animal lives in one CSV file:
//!
//! ```text
//! id,animal_id,date,weight_kg,recorded_by,created_at
//! 1,42,2024-01-01,9.979044,alice,2024-01-01T09:30:00+00:00
//! ```
//!
//! Writes go to a temp file that is renamed over the original, and the
//! connection's lock is held across every read-modify-write.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::{Reader, StringRecord, Writer};
use shared::{AnimalId, WeightEntryId};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tracing::{debug, info};

use super::connection::{CsvConnection, WEIGHT_LOG_HEADER};
use crate::domain::models::weight_entry::{newest_first, NewWeightEntry, WeightEntry};
use crate::storage::traits::WeightLogStorage;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV-based weight log repository
#[derive(Clone)]
pub struct WeightLogRepository {
    connection: CsvConnection,
}

impl WeightLogRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every entry in the log file, in file order
    fn read_entries(&self) -> Result<Vec<WeightEntry>> {
        self.connection.ensure_weight_log_file_exists()?;

        let file_path = self.connection.weight_log_file_path();
        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut entries = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            // Header is line 1
            let line = index + 2;
            let entry = Self::parse_record(&record)
                .with_context(|| format!("{} line {}", file_path.display(), line))?;
            entries.push(entry);
        }

        Ok(entries)
    }

    fn parse_record(record: &StringRecord) -> Result<WeightEntry> {
        let field = |i: usize| {
            record
                .get(i)
                .ok_or_else(|| anyhow!("missing column '{}'", WEIGHT_LOG_HEADER[i]))
        };

        Ok(WeightEntry {
            id: field(0)?.parse().context("invalid id")?,
            animal_id: field(1)?.parse().context("invalid animal_id")?,
            date: NaiveDate::parse_from_str(field(2)?, DATE_FORMAT).context("invalid date")?,
            weight_kg: field(3)?.parse().context("invalid weight_kg")?,
            recorded_by: field(4)?.to_string(),
            created_at: DateTime::parse_from_rfc3339(field(5)?)
                .context("invalid created_at")?
                .with_timezone(&Utc),
        })
    }

    /// Replace the log file contents with `entries`
    fn write_entries(&self, entries: &[WeightEntry]) -> Result<()> {
        let file_path = self.connection.weight_log_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            csv_writer.write_record(WEIGHT_LOG_HEADER)?;

            for entry in entries {
                csv_writer.write_record([
                    entry.id.to_string(),
                    entry.animal_id.to_string(),
                    entry.date.format(DATE_FORMAT).to_string(),
                    entry.weight_kg.to_string(),
                    entry.recorded_by.clone(),
                    entry.created_at.to_rfc3339(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl WeightLogStorage for WeightLogRepository {
    async fn insert_entry(&self, entry: NewWeightEntry) -> Result<WeightEntry> {
        let _guard = self.connection.lock().await;

        let mut entries = self.read_entries()?;
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let stored = entry.with_id(next_id);
        entries.push(stored.clone());
        self.write_entries(&entries)?;

        info!(
            "Stored weight entry {} for animal {} ({} kg)",
            stored.id, stored.animal_id, stored.weight_kg
        );
        Ok(stored)
    }

    async fn get_entry(&self, id: WeightEntryId) -> Result<Option<WeightEntry>> {
        let _guard = self.connection.lock().await;
        Ok(self.read_entries()?.into_iter().find(|e| e.id == id))
    }

    async fn list_entries(&self, animal_id: AnimalId) -> Result<Vec<WeightEntry>> {
        let _guard = self.connection.lock().await;

        let mut entries: Vec<WeightEntry> = self
            .read_entries()?
            .into_iter()
            .filter(|e| e.animal_id == animal_id)
            .collect();
        entries.sort_by(newest_first);

        debug!("Listed {} weight entries for animal {}", entries.len(), animal_id);
        Ok(entries)
    }

    async fn update_entry(&self, entry: &WeightEntry) -> Result<bool> {
        let _guard = self.connection.lock().await;

        let mut entries = self.read_entries()?;
        let Some(existing) = entries.iter_mut().find(|e| e.id == entry.id) else {
            return Ok(false);
        };
        *existing = entry.clone();
        self.write_entries(&entries)?;

        info!("Updated weight entry {}", entry.id);
        Ok(true)
    }

    async fn delete_entries(&self, ids: &[WeightEntryId]) -> Result<Vec<WeightEntryId>> {
        let _guard = self.connection.lock().await;

        let wanted: HashSet<WeightEntryId> = ids.iter().copied().collect();
        let (removed, kept): (Vec<WeightEntry>, Vec<WeightEntry>) = self
            .read_entries()?
            .into_iter()
            .partition(|e| wanted.contains(&e.id));

        if !removed.is_empty() {
            self.write_entries(&kept)?;
        }

        let removed_ids: Vec<WeightEntryId> = removed.iter().map(|e| e.id).collect();
        info!("Deleted {} weight entries", removed_ids.len());
        Ok(removed_ids)
    }
}
