use std::fs;
use std::path::Path;

use tracing::info;

use crate::engine::policy::ForecastPolicy;
use crate::error::Result;
use crate::state::KitchenStore;

/// Load a store from a JSON file.
///
/// A missing file yields an empty store. Duplicate ids keep the last occurrence.
pub fn load_store<P: AsRef<Path>>(path: P) -> Result<KitchenStore> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "store file not found, starting empty");
        return Ok(KitchenStore::new());
    }

    let content = fs::read_to_string(path)?;
    let raw: KitchenStore = serde_json::from_str(&content)?;
    let (items, waste) = raw.into_parts();
    let store = KitchenStore::from_parts(items, waste);
    info!(items = store.len(), records = store.waste().len(), "loaded store");
    Ok(store)
}

/// Save a store to a JSON file.
pub fn save_store<P: AsRef<Path>>(path: P, store: &KitchenStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load and validate a forecasting policy. Missing fields take defaults.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<ForecastPolicy> {
    let content = fs::read_to_string(path)?;
    let policy: ForecastPolicy = serde_json::from_str(&content)?;
    policy.validate()?;
    Ok(policy)
}

/// Write a policy as pretty JSON.
pub fn save_policy<P: AsRef<Path>>(path: P, policy: &ForecastPolicy) -> Result<()> {
    let json = serde_json::to_string_pretty(policy)?;
    fs::write(path, json)?;
    Ok(())
}
