//! Task storage - data file persistence plus export/import

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::StorageError;
use super::format::{Format, ImportReport};
use super::store::TaskStore;

pub const DEFAULT_DATA_FILE: &str = "tasks.csv";

pub type Result<T> = std::result::Result<T, StorageError>;

pub struct Storage {
    data_path: PathBuf,
    export_dir: PathBuf,
    backup: bool,
}

impl Storage {
    pub fn new(data_path: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            export_dir: export_dir.into(),
            backup: false,
        }
    }

    /// Keep a `.bak` copy of the previous data file on every save
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.data_path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Load the data file into `store`. A missing or blank file loads nothing.
    pub fn load_into(&self, store: &mut TaskStore) -> Result<ImportReport> {
        if !self.data_path.exists() {
            debug!("No data file at {}", self.data_path.display());
            return Ok(ImportReport::default());
        }

        let content =
            fs::read_to_string(&self.data_path).map_err(|e| StorageError::io(&self.data_path, e))?;
        if content.trim().is_empty() {
            return Ok(ImportReport::default());
        }

        let report = Format::Csv
            .decode(&content)
            .map_err(|e| StorageError::format(&self.data_path, e))?;
        let count = report.apply(store);
        debug!("Loaded {} tasks from {}", count, self.data_path.display());
        Ok(report)
    }

    pub fn save(&self, store: &TaskStore) -> Result<()> {
        if self.backup && self.data_path.exists() {
            let backup_path = self.backup_path();
            if let Err(e) = fs::copy(&self.data_path, &backup_path) {
                warn!("Failed to create backup: {}", e);
            }
        }

        write_format(&self.data_path, Format::Csv, store)?;
        debug!("Saved {} tasks to {}", store.len(), self.data_path.display());
        Ok(())
    }

    /// Write the store to `<export_dir>/tasks.<ext>`, overwriting
    pub fn export(&self, store: &TaskStore, format: Format) -> Result<PathBuf> {
        let path = self.export_dir.join(format.default_file_name());
        write_format(&path, format, store)?;
        Ok(path)
    }

    /// Merge tasks from `path` into `store` without clearing it first
    pub fn import(&self, path: &Path, format: Format, store: &mut TaskStore) -> Result<ImportReport> {
        if !path.exists() {
            return Err(StorageError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        let report = format
            .decode(&content)
            .map_err(|e| StorageError::format(path, e))?;
        let count = report.apply(store);
        debug!(
            "Imported {} tasks ({} skipped) from {}",
            count,
            report.skipped.len(),
            path.display()
        );
        Ok(report)
    }
}

fn write_format(path: &Path, format: Format, store: &TaskStore) -> Result<()> {
    let content = format
        .encode(store)
        .map_err(|e| StorageError::format(path, e))?;
    fs::write(path, content).map_err(|e| StorageError::io(path, e))
}
