//! Store configuration loaded from `solar.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "solar.toml";

/// Store configuration (TOML).
///
/// Missing fields default to demonstration values: 800 seeded records, a
/// two-second list delay and no injected failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of synthetic records generated at startup.
    pub seed_count: usize,

    /// Fixed RNG seed for reproducible seeding and failure injection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,

    /// Probability in `[0, 1]` that any store call fails with a network error.
    pub failure_rate: f64,

    pub latency: LatencyConfig,
}

/// Simulated round-trip delay per store operation, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LatencyConfig {
    pub list_ms: u64,
    pub create_ms: u64,
    pub update_ms: u64,
    pub delete_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            list_ms: 2000,
            create_ms: 1000,
            update_ms: 800,
            delete_ms: 800,
        }
    }
}

impl LatencyConfig {
    pub fn none() -> Self {
        Self {
            list_ms: 0,
            create_ms: 0,
            update_ms: 0,
            delete_ms: 0,
        }
    }

    pub fn list(&self) -> Duration {
        Duration::from_millis(self.list_ms)
    }

    pub fn create(&self) -> Duration {
        Duration::from_millis(self.create_ms)
    }

    pub fn update(&self) -> Duration {
        Duration::from_millis(self.update_ms)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_count: 800,
            rng_seed: None,
            failure_rate: 0.0,
            latency: LatencyConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Zero latency and zero failure probability, for tests and scripting.
    pub fn instant() -> Self {
        Self {
            failure_rate: 0.0,
            latency: LatencyConfig::none(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(anyhow!(
                "failure_rate must be within [0, 1], got {}",
                self.failure_rate
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `StoreConfig::default()`.
pub fn load_config(path: &Path) -> Result<StoreConfig> {
    if !path.exists() {
        let cfg = StoreConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: StoreConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &StoreConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
