//! Preset export: writes the asset list back out as script text.
//!
//! The output reconstructs the preset data structure (`yuji` block plus
//! `list`) as literal source, so a round trip through the preset reader
//! yields the same assets and projection.

use crate::models::{Asset, Projection};

/// Conventional file name of the exported document.
pub const EXPORT_FILE_NAME: &str = "fund_data_list.js";

/// Build the exported script text.
pub fn export_script(assets: &[Asset], projection: Projection) -> String {
    let mut lines = Vec::new();
    lines.push("var fund_data_list = {".to_string());
    lines.push("    yuji: {".to_string());
    lines.push(format!(
        "        shouyi: {}, // expected yearly return {}%",
        projection.expected_return, projection.expected_return
    ));
    lines.push(format!(
        "        huiche: {} // expected max drawdown {}%",
        projection.max_drawdown, projection.max_drawdown
    ));
    lines.push("    },".to_string());
    lines.push("    list: [".to_string());

    for (index, asset) in assets.iter().enumerate() {
        let comma = if index + 1 < assets.len() { "," } else { "" };
        lines.push(format!(
            "        {{ name: \"{}\", percentage: {}, color: \"{}\", description: \"{}\" }}{}",
            escape(&asset.name),
            asset.percentage,
            escape(&asset.color),
            escape(&asset.description),
            comma,
        ));
    }

    lines.push("    ]".to_string());
    lines.push("}".to_string());
    lines.join("\n")
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::parse_preset;

    fn make_assets() -> Vec<Asset> {
        vec![
            Asset {
                name: "S&P 500".into(),
                percentage: 50.0,
                color: "#3C3B6E".into(),
                description: "US large-cap index".into(),
            },
            Asset {
                name: "Gold".into(),
                percentage: 5.0,
                color: "#DAA520".into(),
                description: String::new(),
            },
        ]
    }

    #[test]
    fn test_export_shape() {
        let text = export_script(&make_assets(), Projection { expected_return: 7.0, max_drawdown: 35.0 });
        assert!(text.starts_with("var fund_data_list = {"));
        assert!(text.contains("shouyi: 7"));
        assert!(text.contains("huiche: 35"));
        assert!(text.contains("{ name: \"S&P 500\", percentage: 50,"));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn test_export_round_trips_through_reader() {
        let assets = make_assets();
        let projection = Projection { expected_return: 7.0, max_drawdown: 35.0 };
        let text = export_script(&assets, projection);

        let preset = parse_preset(&text).unwrap();
        assert_eq!(preset.yuji, Some(projection));
        assert_eq!(preset.list.len(), assets.len());
        for (raw, asset) in preset.list.iter().zip(&assets) {
            assert_eq!(raw.name.as_deref(), Some(asset.name.as_str()));
            assert_eq!(raw.percentage, Some(asset.percentage));
            assert_eq!(raw.color.as_deref(), Some(asset.color.as_str()));
            assert_eq!(raw.description.as_deref(), Some(asset.description.as_str()));
        }
    }

    #[test]
    fn test_quotes_are_escaped() {
        let assets = vec![Asset {
            name: "the \"core\" fund".into(),
            percentage: 1.0,
            color: "#111111".into(),
            description: String::new(),
        }];
        let text = export_script(&assets, Projection::default());
        let preset = parse_preset(&text).unwrap();
        assert_eq!(preset.list[0].name.as_deref(), Some("the \"core\" fund"));
    }
}
