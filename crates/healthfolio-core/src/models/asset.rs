//! Portfolio asset and preset models.

use serde::{Deserialize, Serialize};

/// Fallback color for assets that arrive without one.
pub const DEFAULT_ASSET_COLOR: &str = "#999999";

/// One named allocation entry in the portfolio.
///
/// The trimmed name is the unique key; the deduplicator guarantees at most
/// one asset per name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub name: String,
    /// Allocation share in percent, never negative.
    pub percentage: f64,
    pub color: String,
    pub description: String,
}

impl Asset {
    /// Amount this asset represents at a given total capital.
    pub fn amount(&self, total_capital: f64) -> f64 {
        total_capital * self.percentage / 100.0
    }
}

/// A raw asset-like record as read from a preset file or form input.
/// Any field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawAsset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<Asset> for RawAsset {
    fn from(asset: Asset) -> Self {
        RawAsset {
            name: Some(asset.name),
            percentage: Some(asset.percentage),
            color: Some(asset.color),
            description: Some(asset.description),
        }
    }
}

/// Expected-performance figures of a preset (percentages).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    /// Expected yearly return.
    #[serde(rename = "shouyi", default)]
    pub expected_return: f64,
    /// Expected maximum drawdown.
    #[serde(rename = "huiche", default)]
    pub max_drawdown: f64,
}

/// Contents of a preset data file: capital, projection and the asset list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PresetData {
    /// Total capital in 10k units.
    #[serde(rename = "all_money", default)]
    pub total_capital: Option<f64>,
    #[serde(default)]
    pub yuji: Option<Projection>,
    #[serde(default)]
    pub list: Vec<RawAsset>,
}

/// The three runtime-selectable presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Balanced,
    Conservative,
    Aggressive,
}

impl PresetKind {
    /// File name of this preset's data file.
    pub fn file_name(self) -> &'static str {
        match self {
            PresetKind::Balanced => "fund_data_list.js",
            PresetKind::Conservative => "fund_data_list_small.js",
            PresetKind::Aggressive => "fund_data_list_big.js",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PresetKind::Balanced => "balanced",
            PresetKind::Conservative => "conservative",
            PresetKind::Aggressive => "aggressive",
        }
    }

    pub fn from_label(label: &str) -> Option<PresetKind> {
        match label {
            "balanced" => Some(PresetKind::Balanced),
            "conservative" => Some(PresetKind::Conservative),
            "aggressive" => Some(PresetKind::Aggressive),
            _ => None,
        }
    }
}

/// Built-in default preset, used when neither the store nor a preset file
/// provides data.
pub fn default_preset() -> PresetData {
    fn raw(name: &str, percentage: f64, color: &str, description: &str) -> RawAsset {
        RawAsset {
            name: Some(name.to_string()),
            percentage: Some(percentage),
            color: Some(color.to_string()),
            description: Some(description.to_string()),
        }
    }

    PresetData {
        total_capital: Some(100.0),
        yuji: Some(Projection { expected_return: 7.0, max_drawdown: 35.0 }),
        list: vec![
            raw("S&P 500", 50.0, "#3C3B6E", "US large-cap index"),
            raw("Bonds", 20.0, "#DE2910", "Domestic bond funds"),
            raw("Europe", 10.0, "#0055A4", "European markets"),
            raw("Gold", 5.0, "#DAA520", "Precious metals"),
            raw("Resources", 5.0, "#FF6F00", "Oil and gas sector"),
            raw("Japan", 5.0, "#BC002D", "Japanese markets"),
            raw("India", 5.0, "#FF9933", "Indian markets"),
            raw("Biotech", 0.0, "#10B981", "Biotechnology sector"),
            raw("Nasdaq 100", 0.0, "#00A3E0", "Nasdaq 100 index"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_amount() {
        let asset = Asset {
            name: "Gold".into(),
            percentage: 5.0,
            color: "#DAA520".into(),
            description: String::new(),
        };
        assert_eq!(asset.amount(100.0), 5.0);
        assert_eq!(asset.amount(0.0), 0.0);
    }

    #[test]
    fn test_preset_data_parses_renamed_fields() {
        let json = r#"{
            "all_money": 100,
            "yuji": { "shouyi": 7, "huiche": 35 },
            "list": [ { "name": "Gold", "percentage": 5 } ]
        }"#;
        let preset: PresetData = serde_json::from_str(json).unwrap();
        assert_eq!(preset.total_capital, Some(100.0));
        let projection = preset.yuji.unwrap();
        assert_eq!(projection.expected_return, 7.0);
        assert_eq!(projection.max_drawdown, 35.0);
        assert_eq!(preset.list[0].name.as_deref(), Some("Gold"));
        assert!(preset.list[0].color.is_none());
    }

    #[test]
    fn test_default_preset_shape() {
        let preset = default_preset();
        assert_eq!(preset.list.len(), 9);
        let total: f64 = preset.list.iter().filter_map(|a| a.percentage).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_preset_kind_labels() {
        for kind in [PresetKind::Balanced, PresetKind::Conservative, PresetKind::Aggressive] {
            assert_eq!(PresetKind::from_label(kind.label()), Some(kind));
        }
        assert!(PresetKind::from_label("reckless").is_none());
    }
}
