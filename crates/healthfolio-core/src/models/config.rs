//! Report configuration loaded from `config.json`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level report configuration.
///
/// `active_tests` and `available_tests` are required; a configuration
/// document missing either fails deserialization, which the loader treats
/// as a fatal error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    /// Test identifiers to load and render, in editorial order.
    pub active_tests: Vec<String>,
    /// Identifier → data-file binding for every known test.
    pub available_tests: HashMap<String, TestSource>,
    /// Patient header metadata.
    #[serde(default)]
    pub patient_info: PatientInfo,
    /// Free-text follow-up note shown in the usage section.
    #[serde(default)]
    pub general_notes: Option<String>,
}

impl ReportConfig {
    /// Look up the data source for a test identifier.
    pub fn source(&self, test_type: &str) -> Option<&TestSource> {
        self.available_tests.get(test_type)
    }
}

/// Where and how a single test's data is loaded and displayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestSource {
    /// File name under the data directory.
    pub data_file: String,
    /// Display name for navigation entries.
    pub name: String,
    /// Menu icon.
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether this test contributes a trend chart.
    #[serde(default)]
    pub has_chart: bool,
}

/// Patient metadata rendered in the page header.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub doctors: Option<String>,
}
