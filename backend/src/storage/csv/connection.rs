use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::storage::traits::Connection;

pub const WEIGHT_LOG_FILE: &str = "animal_weight_log.csv";
pub const WEIGHT_LOG_HEADER: [&str; 6] = ["id", "animal_id", "date", "weight_kg", "recorded_by", "created_at"];

/// CsvConnection owns the data directory and serializes access to the log file
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    file_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            info!("Creating data directory {}", base_path.display());
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
            file_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn weight_log_file_path(&self) -> PathBuf {
        self.base_directory.join(WEIGHT_LOG_FILE)
    }

    /// Ensure the log file exists with its header row
    pub fn ensure_weight_log_file_exists(&self) -> Result<()> {
        let file_path = self.weight_log_file_path();
        if !file_path.exists() {
            let header = format!("{}\n", WEIGHT_LOG_HEADER.join(","));
            fs::write(&file_path, header)?;
        }
        Ok(())
    }

    /// Hold this guard across a read-modify-write of the log file
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.file_lock.lock().await
    }
}

impl Connection for CsvConnection {
    type WeightLogRepository = super::weight_log_repository::WeightLogRepository;

    fn create_weight_log_repository(&self) -> Self::WeightLogRepository {
        super::weight_log_repository::WeightLogRepository::new(self.clone())
    }
}
