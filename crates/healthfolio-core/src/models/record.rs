//! Test-record models for per-test JSON documents.

use serde::{Deserialize, Deserializer, Serialize};

/// One loaded test/report document for a specific (type, year) pair.
///
/// Created once at load time from a fetched JSON document; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    /// Diagnosis header (name, color, icon, editorial sort weight).
    pub diagnosis: Diagnosis,
    /// When and how the test was performed.
    #[serde(default)]
    pub test_info: Option<TestInfo>,
    /// Ordered result rows; schema varies by test kind.
    #[serde(default)]
    pub results: Vec<ResultRow>,
    /// Current medication plan (allergy reports).
    #[serde(default)]
    pub medications: Vec<Medication>,
    /// Doctor's recommendations attached to this test.
    #[serde(default)]
    pub recommendations: Option<Recommendations>,
    /// Blood-donation screening details.
    #[serde(default)]
    pub donation_info: Option<DonationInfo>,
    /// Physical-exam findings (comprehensive checkups).
    #[serde(default)]
    pub physical_exam: Vec<ExamSection>,
    /// Imaging findings (comprehensive checkups).
    #[serde(default)]
    pub imaging_results: Vec<ExamSection>,
    /// Pre-built trend chart series (thyroid).
    #[serde(default)]
    pub trend_data: Option<TrendData>,
    /// Antibody history points for the multi-year comparison chart.
    #[serde(default)]
    pub history_data: Vec<AntibodyPoint>,
}

/// Schema kind of a test record.
///
/// Replaces string checks on the test identifier: the kind is derived once
/// from the document itself and dispatched exhaustively by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Name/value/status/reference rows.
    Standard,
    /// Allergen sensitivity rows.
    Allergy,
    /// Category-grouped rows plus physical-exam and imaging findings.
    ComprehensiveCheckup,
    /// Standard rows plus blood-donation screening details.
    Donation,
}

impl TestRecord {
    /// Derive the schema kind of this record.
    ///
    /// The diagnosis discriminator wins; otherwise the row shape decides,
    /// with donation info promoting a standard record to [`RecordKind::Donation`].
    pub fn kind(&self) -> RecordKind {
        if self.diagnosis.kind.as_deref() == Some("comprehensive_checkup") {
            return RecordKind::ComprehensiveCheckup;
        }
        if matches!(self.results.first(), Some(ResultRow::Allergy(_))) {
            return RecordKind::Allergy;
        }
        if self.donation_info.is_some() {
            return RecordKind::Donation;
        }
        RecordKind::Standard
    }
}

/// Diagnosis header of a test record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    /// Display name of the diagnosis/test.
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Editorial priority; higher sorts earlier across groups.
    #[serde(default)]
    pub sort: f64,
    /// Optional schema discriminator, e.g. `"comprehensive_checkup"`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Date/time/method of a test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestInfo {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

/// One result row; the three shapes are distinguished structurally.
///
/// Allergy rows are tried first (an `allergen` field is unambiguous), then
/// comprehensive rows (`category` + `name`), then plain standard rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResultRow {
    Allergy(AllergyRow),
    Checkup(CheckupRow),
    Standard(StandardRow),
}

/// Allergen sensitivity row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllergyRow {
    /// Allergen class (food, pollen, ...).
    pub category: String,
    /// Specific allergen.
    pub allergen: String,
    /// Sensitivity grade.
    pub sensitivity: String,
    /// IgE measurement (kU/L); source data mixes numbers and strings.
    #[serde(deserialize_with = "flexible_string")]
    pub ige_value: String,
    /// Seasonality note.
    #[serde(default)]
    pub season: Option<String>,
    /// Whether the row counts as an allergic reaction.
    #[serde(default)]
    pub is_allergic: bool,
}

/// Category-grouped row from a comprehensive checkup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckupRow {
    /// Panel category the row belongs to.
    pub category: String,
    pub name: String,
    #[serde(deserialize_with = "flexible_string")]
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub status: String,
    #[serde(deserialize_with = "flexible_string")]
    pub reference: String,
    #[serde(default)]
    pub is_normal: bool,
}

/// Plain name/value/status/reference row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandardRow {
    pub name: String,
    #[serde(deserialize_with = "flexible_string")]
    pub value: String,
    /// Unit column is omitted entirely when the data carries none.
    #[serde(default)]
    pub unit: Option<String>,
    pub status: String,
    #[serde(deserialize_with = "flexible_string")]
    pub reference: String,
    #[serde(default)]
    pub is_normal: bool,
}

/// One entry of the current medication plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub timing: Option<String>,
    #[serde(default)]
    pub indication: Option<String>,
}

/// Doctor's recommendations attached to a single test.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
    /// Allergy-season protection note.
    #[serde(default)]
    pub seasonal_protection: Option<String>,
    /// Allergy medication guidance.
    #[serde(default)]
    pub medication_guidance: Option<String>,
    /// Household/environment management checklist.
    #[serde(default)]
    pub environmental_management: Vec<String>,
    /// Symptoms to watch for.
    #[serde(default)]
    pub symptoms: Option<String>,
    /// Blood-test donation reminder.
    #[serde(default)]
    pub donation_notes: Option<String>,
    /// Follow-up schedule.
    #[serde(default)]
    pub follow_up: Option<String>,
}

/// Blood-donation screening details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationInfo {
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub rh_type: Option<String>,
}

/// Physical-exam or imaging section: a labeled list of findings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamSection {
    /// Exam type label (e.g. "Ultrasound").
    #[serde(rename = "type")]
    pub label: String,
    #[serde(default)]
    pub findings: Vec<String>,
}

/// Pre-built chart series shipped with a test document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendData {
    pub labels: Vec<String>,
    pub datasets: Vec<TrendSeries>,
}

/// One named, colored series of a trend chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub data: Vec<f64>,
}

/// One antibody measurement for the multi-year comparison chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AntibodyPoint {
    pub date: String,
    /// Thyroglobulin antibody (IU/mL).
    pub tgab: f64,
    /// Thyroid peroxidase antibody (kIU/L).
    pub tpoab: f64,
    #[serde(default)]
    pub institution: Option<String>,
}

/// Accept either a JSON string or a bare number/bool for display fields.
fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}
