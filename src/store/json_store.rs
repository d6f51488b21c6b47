use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::store::schema::{EXPORT_VERSION, ExportData, ProgressData, SCHEMA_VERSION};

const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unsupported export version: {found} (expected {expected})")]
    UnsupportedExportVersion { found: u32, expected: u32 },
    #[error("Exported progress has schema version {found} (expected {expected})")]
    StaleProgressSchema { found: u32, expected: u32 },
    #[error("Export file {path} could not be parsed: {source}")]
    InvalidExport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wortdrill");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        write_atomic(&self.file_path(name), data)
    }

    /// Load progress. Returns None if the file exists but cannot be parsed
    /// (schema mismatch / corruption).
    pub fn load_progress(&self) -> Option<ProgressData> {
        let path = self.file_path(PROGRESS_FILE);
        if path.exists() {
            let content = fs::read_to_string(&path).ok()?;
            match serde_json::from_str(&content) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable progress file");
                    None
                }
            }
        } else {
            Some(ProgressData::default())
        }
    }

    pub fn save_progress(&self, data: &ProgressData) -> Result<()> {
        self.save(PROGRESS_FILE, data)
    }

    pub fn export_all(&self, config: &Config) -> ExportData {
        ExportData {
            wortdrill_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            config: config.clone(),
            progress: self.load_progress().unwrap_or_default(),
        }
    }

    pub fn export_to(&self, config: &Config, path: &Path) -> Result<()> {
        write_atomic(path, &self.export_all(config))
    }

    /// Replace stored progress with the exported one. The previous file is
    /// only overwritten once the new one is fully written.
    pub fn import_all(&self, data: &ExportData) -> Result<()> {
        if data.wortdrill_export_version != EXPORT_VERSION {
            return Err(StoreError::UnsupportedExportVersion {
                found: data.wortdrill_export_version,
                expected: EXPORT_VERSION,
            }
            .into());
        }
        if data.progress.needs_reset() {
            return Err(StoreError::StaleProgressSchema {
                found: data.progress.schema_version,
                expected: SCHEMA_VERSION,
            }
            .into());
        }
        self.save_progress(&data.progress)?;
        tracing::info!(
            records = data.progress.records.len(),
            "imported progress"
        );
        Ok(())
    }

    pub fn import_from(&self, path: &Path) -> Result<ExportData> {
        let content = fs::read_to_string(path)?;
        let data: ExportData =
            serde_json::from_str(&content).map_err(|source| StoreError::InvalidExport {
                path: path.to_path_buf(),
                source,
            })?;
        self.import_all(&data)?;
        Ok(data)
    }
}

fn write_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(data)?;
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;
    Ok(())
}
