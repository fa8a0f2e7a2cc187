//! In-memory asset store that behaves like a slow, flaky remote API.
//!
//! Every operation sleeps for its configured latency, then may fail with a
//! simulated network error, then applies its effect atomically under the
//! collection lock. The lock is never held across the delay, so overlapping
//! calls interleave at their suspension points: two concurrent updates to the
//! same id resolve last-write-wins by completion order.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::core::seed::{format_asset_id, generate_assets, parse_asset_number};
use crate::core::types::{Asset, AssetDraft, AssetPatch};
use crate::io::config::{LatencyConfig, StoreConfig};

/// Failures surfaced by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Simulated transient failure; the same call may be retried.
    #[error("Network error: Unable to connect to server")]
    Network,
    /// The id does not exist (deleted concurrently or mistyped).
    #[error("Asset with id {id} not found")]
    NotFound { id: String },
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Network)
    }
}

/// Authoritative asset collection. Construct once and share via `Arc`.
pub struct AssetStore {
    latency: LatencyConfig,
    failure_rate: f64,
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    assets: Vec<Asset>,
    /// Next sequence number for `SA-NNNN` ids; never reused.
    next_id: u64,
    rng: StdRng,
}

impl StoreInner {
    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.assets
            .iter()
            .position(|asset| asset.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn roll_failure(&mut self, failure_rate: f64) -> Result<(), StoreError> {
        if failure_rate > 0.0 && self.rng.gen_bool(failure_rate) {
            return Err(StoreError::Network);
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> String {
        let id = format_asset_id(self.next_id);
        self.next_id += 1;
        id
    }
}

impl AssetStore {
    /// Create a store holding `assets` in their given order.
    pub fn new(config: &StoreConfig, assets: Vec<Asset>) -> Self {
        Self::with_rng(config, assets, make_rng(config.rng_seed))
    }

    /// Create a store seeded with `config.seed_count` synthetic assets.
    pub fn seeded(config: &StoreConfig) -> Self {
        let mut rng = make_rng(config.rng_seed);
        let assets = generate_assets(config.seed_count, &mut rng);
        Self::with_rng(config, assets, rng)
    }

    fn with_rng(config: &StoreConfig, assets: Vec<Asset>, rng: StdRng) -> Self {
        let highest = assets
            .iter()
            .filter_map(|asset| parse_asset_number(&asset.id))
            .max()
            .unwrap_or(0);
        let next_id = highest.max(assets.len() as u64) + 1;
        Self {
            latency: config.latency.clone(),
            failure_rate: config.failure_rate.clamp(0.0, 1.0),
            inner: Mutex::new(StoreInner {
                assets,
                next_id,
                rng,
            }),
        }
    }

    /// Copy of the whole collection in insertion order.
    #[instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<Asset>, StoreError> {
        simulate_latency(self.latency.list()).await;
        let mut inner = self.inner.lock().await;
        self.check_failure(&mut inner, "list")?;
        debug!(count = inner.assets.len(), "listed assets");
        Ok(inner.assets.clone())
    }

    /// Copy of a single asset.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn get(&self, id: &str) -> Result<Asset, StoreError> {
        simulate_latency(self.latency.list()).await;
        let mut inner = self.inner.lock().await;
        self.check_failure(&mut inner, "get")?;
        let index = inner.position(id)?;
        Ok(inner.assets[index].clone())
    }

    /// Append a new asset with a freshly assigned id. No validation.
    #[instrument(skip_all, fields(name = %draft.name))]
    pub async fn create(&self, draft: AssetDraft) -> Result<Asset, StoreError> {
        simulate_latency(self.latency.create()).await;
        let mut inner = self.inner.lock().await;
        self.check_failure(&mut inner, "create")?;
        let id = inner.allocate_id();
        let asset = draft.into_asset(id);
        inner.assets.push(asset.clone());
        debug!(id = %asset.id, count = inner.assets.len(), "created asset");
        Ok(asset)
    }

    /// Merge `patch` over the stored asset, keeping its position.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: &str, patch: AssetPatch) -> Result<Asset, StoreError> {
        simulate_latency(self.latency.update()).await;
        let mut inner = self.inner.lock().await;
        self.check_failure(&mut inner, "update")?;
        let index = inner.position(id)?;
        let updated = patch.apply_to(&inner.assets[index]);
        inner.assets[index] = updated.clone();
        debug!(index, "updated asset");
        Ok(updated)
    }

    /// Remove an asset.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        simulate_latency(self.latency.delete()).await;
        let mut inner = self.inner.lock().await;
        self.check_failure(&mut inner, "delete")?;
        let index = inner.position(id)?;
        inner.assets.remove(index);
        debug!(count = inner.assets.len(), "deleted asset");
        Ok(())
    }

    /// Current collection size, without latency or failure injection.
    pub async fn count(&self) -> usize {
        self.inner.lock().await.assets.len()
    }

    fn check_failure(&self, inner: &mut StoreInner, operation: &str) -> Result<(), StoreError> {
        inner.roll_failure(self.failure_rate).inspect_err(|_| {
            warn!(operation, "simulated network failure");
        })
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
