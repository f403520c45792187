//! Typed asset persistence on top of the key-value store.

use crate::models::Asset;

use super::{LocalStore, StoreResult};

/// Storage key holding the portfolio asset list as a JSON array.
pub const PORTFOLIO_ASSETS_KEY: &str = "portfolioAssets";

impl LocalStore {
    /// Load the persisted asset list, if any.
    pub fn load_assets(&self) -> StoreResult<Option<Vec<Asset>>> {
        match self.get_item(PORTFOLIO_ASSETS_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the persisted asset list.
    pub fn save_assets(&self, assets: &[Asset]) -> StoreResult<()> {
        let json = serde_json::to_string(assets)?;
        self.set_item(PORTFOLIO_ASSETS_KEY, &json)
    }

    /// Drop the persisted asset list (done on export).
    pub fn clear_assets(&self) -> StoreResult<()> {
        self.remove_item(PORTFOLIO_ASSETS_KEY)
    }
}
