//! Asset deduplication and defaults backfill.

use std::collections::HashMap;

use crate::models::{Asset, RawAsset, DEFAULT_ASSET_COLOR};

/// Merge raw asset records by trimmed name.
///
/// Input order is preserved for first occurrences. Records with an
/// empty/whitespace-only name are dropped. Percentages are clamped at zero
/// before use, so the output total equals the clamped total over all
/// valid-name inputs. Repeats add their percentage to the existing entry
/// and backfill an empty description; the first color always wins.
pub fn dedupe_assets(list: &[RawAsset]) -> Vec<Asset> {
    let mut assets: Vec<Asset> = Vec::new();

    for raw in list {
        let name = raw.name.as_deref().unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let percentage = raw.percentage.unwrap_or(0.0).max(0.0);

        match assets.iter_mut().find(|a| a.name == name) {
            Some(existing) => {
                existing.percentage += percentage;
                if existing.description.is_empty() {
                    if let Some(description) = &raw.description {
                        existing.description = description.clone();
                    }
                }
            }
            None => assets.push(Asset {
                name: name.to_string(),
                percentage,
                color: raw
                    .color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ASSET_COLOR.to_string()),
                description: raw.description.clone().unwrap_or_default(),
            }),
        }
    }

    assets
}

/// Color/description defaults per asset name, built from the default preset
/// and used to backfill sparse preset files.
#[derive(Debug, Default)]
pub struct DefaultsMap {
    entries: HashMap<String, (Option<String>, Option<String>)>,
}

impl DefaultsMap {
    /// Build the map from a raw asset list; empty names are ignored.
    pub fn from_list(list: &[RawAsset]) -> Self {
        let mut entries = HashMap::new();
        for raw in list {
            let name = raw.name.as_deref().unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }
            entries.insert(name.to_string(), (raw.color.clone(), raw.description.clone()));
        }
        Self { entries }
    }

    /// Fill missing color/description fields from the defaults.
    pub fn enrich(&self, list: &[RawAsset]) -> Vec<RawAsset> {
        list.iter()
            .map(|raw| {
                let name = raw.name.as_deref().unwrap_or("").trim();
                let (default_color, default_description) = self
                    .entries
                    .get(name)
                    .cloned()
                    .unwrap_or((None, None));
                RawAsset {
                    name: Some(name.to_string()),
                    percentage: Some(raw.percentage.unwrap_or(0.0)),
                    color: raw.color.clone().or(default_color),
                    description: raw.description.clone().or(default_description),
                }
            })
            .collect()
    }
}
