//! Data loading: config, per-test documents, advice.
//!
//! Failure taxonomy:
//! - configuration errors are fatal and abort the whole load;
//! - an individual test file that is missing or malformed is skipped, so
//!   that test type is simply absent downstream;
//! - a missing advice document degrades the advice sections to placeholders.
//!
//! The result is an explicit [`ReportContext`] handed to every downstream
//! component; no globals, no load-timing assumptions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::{AdviceBook, ReportConfig, TestRecord};

/// Relative path of the configuration document.
pub const CONFIG_FILE: &str = "config.json";
/// Relative path of the advice document.
pub const ADVICE_FILE: &str = "recomm/medical_advice.json";

/// Fatal load errors.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration is malformed: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("no test data could be loaded")]
    NoTestData,
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Everything the renderer and navigation builder need, loaded once.
#[derive(Debug)]
pub struct ReportContext {
    pub config: ReportConfig,
    /// Test identifier → loaded record; absent identifiers failed to load.
    pub records: HashMap<String, TestRecord>,
    /// Advice reference data; `None` degrades advice sections.
    pub advice: Option<AdviceBook>,
    /// Year assumed for identifiers that carry none.
    pub default_year: i32,
}

/// Loads report data from a directory.
pub struct ReportLoader {
    data_dir: PathBuf,
}

impl ReportLoader {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self { data_dir: data_dir.as_ref().to_path_buf() }
    }

    /// Load the full report context.
    ///
    /// Fails only on configuration problems or when not a single test
    /// document could be loaded.
    pub fn load(&self) -> LoadResult<ReportContext> {
        let config = self.load_config()?;
        let records = self.load_records(&config);
        if records.is_empty() {
            return Err(LoadError::NoTestData);
        }
        let advice = self.load_advice();

        Ok(ReportContext {
            config,
            records,
            advice,
            default_year: chrono::Local::now().year(),
        })
    }

    fn load_config(&self) -> LoadResult<ReportConfig> {
        let path = self.data_dir.join(CONFIG_FILE);
        let text = std::fs::read_to_string(&path)
            .map_err(|source| LoadError::ConfigRead { path: path.clone(), source })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load every active test document, skipping individual failures.
    fn load_records(&self, config: &ReportConfig) -> HashMap<String, TestRecord> {
        let mut records = HashMap::new();
        for test_type in &config.active_tests {
            let Some(source) = config.source(test_type) else {
                warn!(test_type = %test_type, "active test has no availableTests entry, skipping");
                continue;
            };
            let path = self.data_dir.join(&source.data_file);
            match read_record(&path) {
                Ok(record) => {
                    records.insert(test_type.clone(), record);
                }
                Err(reason) => {
                    warn!(test_type = %test_type, %reason, "skipping test document");
                }
            }
        }
        records
    }

    fn load_advice(&self) -> Option<AdviceBook> {
        let path = self.data_dir.join(ADVICE_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                error!(path = %path.display(), %err, "advice data unavailable");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(book) => Some(book),
            Err(err) => {
                error!(path = %path.display(), %err, "advice data malformed");
                None
            }
        }
    }
}

fn read_record(path: &Path) -> Result<TestRecord, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn config_json() -> &'static str {
        r#"{
            "activeTests": ["blood_2022", "liver_2020"],
            "availableTests": {
                "blood_2022": { "dataFile": "blood_2022.json", "name": "Blood panel" },
                "liver_2020": { "dataFile": "liver_2020.json", "name": "Liver panel" }
            }
        }"#
    }

    fn record_json() -> &'static str {
        r#"{ "diagnosis": { "name": "Blood panel", "sort": 9 } }"#
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReportLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, LoadError::ConfigRead { .. }));
    }

    #[test]
    fn test_malformed_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILE, "{ not json");
        let err = ReportLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, LoadError::ConfigParse(_)));
    }

    #[test]
    fn test_config_without_active_tests_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILE, r#"{ "availableTests": {} }"#);
        let err = ReportLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, LoadError::ConfigParse(_)));
    }

    #[test]
    fn test_broken_test_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILE, config_json());
        write(dir.path(), "blood_2022.json", record_json());
        write(dir.path(), "liver_2020.json", "{ broken");

        let ctx = ReportLoader::new(dir.path()).load().unwrap();
        assert!(ctx.records.contains_key("blood_2022"));
        assert!(!ctx.records.contains_key("liver_2020"));
    }

    #[test]
    fn test_zero_records_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILE, config_json());
        let err = ReportLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, LoadError::NoTestData));
    }

    #[test]
    fn test_missing_advice_degrades() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILE, config_json());
        write(dir.path(), "blood_2022.json", record_json());

        let ctx = ReportLoader::new(dir.path()).load().unwrap();
        assert!(ctx.advice.is_none());
    }

    #[test]
    fn test_advice_loads_when_present() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIG_FILE, config_json());
        write(dir.path(), "blood_2022.json", record_json());
        write(
            dir.path(),
            ADVICE_FILE,
            r#"{ "advice": { "diet": { "title": "Diet" } } }"#,
        );

        let ctx = ReportLoader::new(dir.path()).load().unwrap();
        let advice = ctx.advice.unwrap();
        assert!(advice.section(crate::models::AdviceCategory::Diet).is_some());
    }
}
