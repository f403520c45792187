//! Medical-advice reference data.
//!
//! Loaded once from `recomm/medical_advice.json` and shared by the per-test
//! recommendation renderer and the standalone advice overview.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The four advice categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdviceCategory {
    Lifestyle,
    Diet,
    Medication,
    Exercise,
}

impl AdviceCategory {
    /// All categories in overview display order.
    pub const ALL: [AdviceCategory; 4] = [
        AdviceCategory::Lifestyle,
        AdviceCategory::Diet,
        AdviceCategory::Medication,
        AdviceCategory::Exercise,
    ];

    /// JSON key of this category in the advice document.
    pub fn key(self) -> &'static str {
        match self {
            AdviceCategory::Lifestyle => "lifestyle",
            AdviceCategory::Diet => "diet",
            AdviceCategory::Medication => "medication",
            AdviceCategory::Exercise => "exercise",
        }
    }

    /// Overview card title.
    pub fn title(self) -> &'static str {
        match self {
            AdviceCategory::Lifestyle => "Lifestyle",
            AdviceCategory::Diet => "Diet",
            AdviceCategory::Medication => "Medication",
            AdviceCategory::Exercise => "Exercise",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AdviceCategory::Lifestyle => "📝",
            AdviceCategory::Diet => "🍎",
            AdviceCategory::Medication => "💊",
            AdviceCategory::Exercise => "🏃",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            AdviceCategory::Lifestyle => "#74b9ff",
            AdviceCategory::Diet => "#00b894",
            AdviceCategory::Medication => "#e17055",
            AdviceCategory::Exercise => "#fd79a8",
        }
    }

    /// Parse a category from its JSON key.
    pub fn from_key(key: &str) -> Option<AdviceCategory> {
        AdviceCategory::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Advice categories relevant to a given base test type.
    ///
    /// Unknown types fall back to lifestyle advice only.
    pub fn relevant_for(base_type: &str) -> &'static [AdviceCategory] {
        use AdviceCategory::*;
        match base_type {
            "allergy" => &[Lifestyle, Diet],
            "thyroid" => &[Lifestyle, Diet, Medication],
            "thyroid_history" => &[Lifestyle, Diet],
            "blood" => &[Lifestyle, Diet, Exercise],
            "checkup" => &[Lifestyle, Exercise],
            "liver" => &[Lifestyle, Diet],
            "kidney" => &[Lifestyle, Diet, Exercise],
            _ => &[Lifestyle],
        }
    }
}

/// The full advice document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceBook {
    /// Category key → titled advice section.
    #[serde(default)]
    pub advice: HashMap<String, AdviceSection>,
    /// Optional key-points summary shown below the overview cards.
    #[serde(default)]
    pub summary: Option<AdviceSummary>,
}

impl AdviceBook {
    /// Section for a category, if present in the document.
    pub fn section(&self, category: AdviceCategory) -> Option<&AdviceSection> {
        self.advice.get(category.key())
    }
}

/// A titled advice section with ordered entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceSection {
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sections: Vec<AdviceEntry>,
}

/// One advice entry: a category heading, body text, optional detail list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceEntry {
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Key-points summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceSummary {
    #[serde(default)]
    pub key_points: Vec<String>,
}
