//! Portfolio allocation: asset CRUD, presets, projection figures.
//!
//! Pipeline: preset file / stored list / form input → dedup → views.
//!
//! The deduplicator runs at every entry point; a save that would create a
//! duplicate name among *other* entries is a hard validation error rather
//! than a silent merge.

mod dedupe;
mod export;
mod grid;
mod preset;

pub use dedupe::*;
pub use export::*;
pub use grid::*;
pub use preset::*;

use thiserror::Error;

use crate::models::{default_preset, Asset, PresetData, Projection, RawAsset};
use crate::store::{LocalStore, StoreError};

/// Portfolio errors.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset name must not be empty")]
    EmptyName,

    #[error("an asset named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("no asset at index {0}")]
    BadIndex(usize),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("preset error: {0}")]
    Preset(#[from] PresetError),
}

pub type AssetResult<T> = Result<T, AssetError>;

/// The portfolio: deduped assets plus display figures.
pub struct Portfolio {
    assets: Vec<Asset>,
    projection: Projection,
    /// Total capital in 10k units.
    total_capital: f64,
    /// Color/description defaults from the built-in preset.
    defaults: DefaultsMap,
}

impl Portfolio {
    /// Build a portfolio from preset data.
    pub fn from_preset(data: PresetData) -> Self {
        let base = default_preset();
        let defaults = DefaultsMap::from_list(&base.list);
        let assets = dedupe_assets(&defaults.enrich(&data.list));
        Portfolio {
            assets,
            projection: data.yuji.unwrap_or_default(),
            total_capital: data
                .total_capital
                .or(base.total_capital)
                .unwrap_or(0.0)
                .max(0.0),
            defaults,
        }
    }

    /// Load the portfolio: the persisted asset list wins, the built-in
    /// preset fills in when nothing was stored yet.
    pub fn load(store: &LocalStore) -> AssetResult<Self> {
        let mut portfolio = Portfolio::from_preset(default_preset());
        if let Some(stored) = store.load_assets()? {
            let raws: Vec<RawAsset> = stored.into_iter().map(RawAsset::from).collect();
            portfolio.assets = dedupe_assets(&raws);
        }
        Ok(portfolio)
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Assets shown in the table view: zero-percentage entries are hidden.
    pub fn table_assets(&self) -> Vec<&Asset> {
        self.assets.iter().filter(|a| a.percentage > 0.0).collect()
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn total_capital(&self) -> f64 {
        self.total_capital
    }

    pub fn total_percentage(&self) -> f64 {
        self.assets.iter().map(|a| a.percentage).sum()
    }

    /// Expected yearly return at the current capital.
    pub fn expected_return_amount(&self) -> f64 {
        self.total_capital * self.projection.expected_return / 100.0
    }

    /// Expected maximum drawdown at the current capital.
    pub fn expected_drawdown_amount(&self) -> f64 {
        self.total_capital * self.projection.max_drawdown / 100.0
    }

    /// Add (`index == None`) or replace (`index == Some(i)`) an asset.
    ///
    /// Validation: the trimmed name must be non-empty and unique among all
    /// *other* entries. After the edit a defensive re-dedup runs and the
    /// list is persisted.
    pub fn save_asset(
        &mut self,
        index: Option<usize>,
        input: RawAsset,
        store: &LocalStore,
    ) -> AssetResult<()> {
        let name = input.name.as_deref().unwrap_or("").trim().to_string();
        if name.is_empty() {
            return Err(AssetError::EmptyName);
        }
        let duplicate = self
            .assets
            .iter()
            .enumerate()
            .any(|(i, a)| a.name == name && Some(i) != index);
        if duplicate {
            return Err(AssetError::DuplicateName(name));
        }

        let asset = Asset {
            name,
            percentage: input.percentage.unwrap_or(0.0).max(0.0),
            color: input
                .color
                .unwrap_or_else(|| crate::models::DEFAULT_ASSET_COLOR.to_string()),
            description: input.description.unwrap_or_default(),
        };

        match index {
            Some(i) => {
                if i >= self.assets.len() {
                    return Err(AssetError::BadIndex(i));
                }
                self.assets[i] = asset;
            }
            None => self.assets.push(asset),
        }

        // Defensive pass; a validated save cannot actually merge anything.
        let raws: Vec<RawAsset> = self.assets.drain(..).map(RawAsset::from).collect();
        self.assets = dedupe_assets(&raws);

        store.save_assets(&self.assets)?;
        Ok(())
    }

    /// Delete an asset and persist the shortened list.
    pub fn remove_asset(&mut self, index: usize, store: &LocalStore) -> AssetResult<Asset> {
        if index >= self.assets.len() {
            return Err(AssetError::BadIndex(index));
        }
        let removed = self.assets.remove(index);
        store.save_assets(&self.assets)?;
        Ok(removed)
    }

    /// Replace the asset list from preset data and re-derive the display
    /// figures. The new list overwrites the persisted one.
    pub fn apply_preset(&mut self, data: PresetData, store: &LocalStore) -> AssetResult<()> {
        if let Some(projection) = data.yuji {
            self.projection = projection;
        }
        if let Some(capital) = data.total_capital {
            if capital >= 0.0 {
                self.total_capital = capital;
            }
        }
        self.assets = dedupe_assets(&self.defaults.enrich(&data.list));
        store.save_assets(&self.assets)?;
        Ok(())
    }

    /// Produce the export script text and clear the persisted list, so the
    /// next start-up reads the exported file instead of stale storage.
    pub fn export(&self, store: &LocalStore) -> AssetResult<String> {
        let text = export_script(&self.assets, self.projection);
        store.clear_assets()?;
        Ok(text)
    }

    /// Pack the current assets into the 10×10 cloud grid.
    pub fn cloud_layout(&self) -> GridLayout {
        GridLayout::pack(&self.assets)
    }
}
