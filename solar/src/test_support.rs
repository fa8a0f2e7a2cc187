//! Test-only helpers for constructing assets and stores.

use crate::core::types::{Asset, AssetDraft, AssetStatus};
use crate::io::config::StoreConfig;
use crate::io::store::AssetStore;

/// Create a deterministic asset with default dates and location.
pub fn asset(id: &str, status: AssetStatus, capacity: f64) -> Asset {
    asset_at(id, status, capacity, "California Solar Farm")
}

/// Create a deterministic asset at an explicit location.
pub fn asset_at(id: &str, status: AssetStatus, capacity: f64, location: &str) -> Asset {
    Asset {
        id: id.to_string(),
        name: format!("Solar Array {}", id),
        capacity,
        location: location.to_string(),
        status,
        install_date: "2021-06-15".to_string(),
        efficiency: 85.0,
        last_maintenance: "2023-03-01".to_string(),
    }
}

/// Create a valid draft with the given name.
pub fn draft(name: &str) -> AssetDraft {
    AssetDraft {
        name: name.to_string(),
        capacity: 750.0,
        location: "Arizona Array Site".to_string(),
        status: AssetStatus::Active,
        install_date: "2024-01-10".to_string(),
        efficiency: 91.0,
        last_maintenance: "2024-05-20".to_string(),
    }
}

/// Store with no latency and no failure injection.
pub fn instant_store(assets: Vec<Asset>) -> AssetStore {
    AssetStore::new(&StoreConfig::instant(), assets)
}

/// Three assets covering every status.
pub fn mixed_assets() -> Vec<Asset> {
    vec![
        asset("SA-0001", AssetStatus::Active, 1200.0),
        asset("SA-0002", AssetStatus::Maintenance, 800.0),
        asset("SA-0003", AssetStatus::Inactive, 2600.0),
    ]
}
