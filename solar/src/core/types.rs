//! Asset record types shared by every layer.
//!
//! Field names serialize in camelCase (`installDate`, `lastMaintenance`) so
//! JSON payloads match what browser clients already send.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operational state of an installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Inactive,
    Maintenance,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 3] = [
        AssetStatus::Active,
        AssetStatus::Inactive,
        AssetStatus::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Inactive => "inactive",
            AssetStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseValueError::new("status", s))
    }
}

/// Rejected textual value for one of the enumerations in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// One solar installation as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Store-assigned identifier (`SA-0001`), immutable after creation.
    pub id: String,
    pub name: String,
    /// Nameplate capacity in kilowatts.
    pub capacity: f64,
    pub location: String,
    pub status: AssetStatus,
    /// `YYYY-MM-DD`.
    pub install_date: String,
    /// Percentage in `0..=100`.
    pub efficiency: f64,
    /// `YYYY-MM-DD`.
    pub last_maintenance: String,
}

/// Create input: every field of [`Asset`] except the store-assigned `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDraft {
    pub name: String,
    pub capacity: f64,
    pub location: String,
    pub status: AssetStatus,
    pub install_date: String,
    pub efficiency: f64,
    pub last_maintenance: String,
}

impl AssetDraft {
    /// Attach a store-assigned id.
    pub fn into_asset(self, id: String) -> Asset {
        Asset {
            id,
            name: self.name,
            capacity: self.capacity,
            location: self.location,
            status: self.status,
            install_date: self.install_date,
            efficiency: self.efficiency,
            last_maintenance: self.last_maintenance,
        }
    }
}

/// Partial update. Supplied fields fully replace the stored value; `None`
/// fields are retained. An `id` key in a JSON body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<String>,
}

impl AssetPatch {
    /// Produce a new record with this patch merged over `current`.
    pub fn apply_to(&self, current: &Asset) -> Asset {
        Asset {
            id: current.id.clone(),
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            capacity: self.capacity.unwrap_or(current.capacity),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| current.location.clone()),
            status: self.status.unwrap_or(current.status),
            install_date: self
                .install_date
                .clone()
                .unwrap_or_else(|| current.install_date.clone()),
            efficiency: self.efficiency.unwrap_or(current.efficiency),
            last_maintenance: self
                .last_maintenance
                .clone()
                .unwrap_or_else(|| current.last_maintenance.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == AssetPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::asset;

    #[test]
    fn patch_replaces_only_supplied_fields() {
        let current = asset("SA-0001", AssetStatus::Active, 1200.0);
        let patch = AssetPatch {
            status: Some(AssetStatus::Maintenance),
            efficiency: Some(64.5),
            ..AssetPatch::default()
        };

        let merged = patch.apply_to(&current);

        assert_eq!(merged.status, AssetStatus::Maintenance);
        assert_eq!(merged.efficiency, 64.5);
        assert_eq!(merged.id, current.id);
        assert_eq!(merged.name, current.name);
        assert_eq!(merged.capacity, current.capacity);
        assert_eq!(merged.location, current.location);
        assert_eq!(merged.install_date, current.install_date);
        assert_eq!(merged.last_maintenance, current.last_maintenance);
    }

    #[test]
    fn patch_json_ignores_id_and_uses_camel_case() {
        let patch: AssetPatch =
            serde_json::from_str(r#"{"id":"SA-9999","lastMaintenance":"2024-02-03"}"#)
                .expect("parse patch");
        assert_eq!(patch.last_maintenance.as_deref(), Some("2024-02-03"));
        assert_eq!(patch.name, None);
        assert!(!patch.is_empty());
    }

    #[test]
    fn status_parses_lowercase_names_only() {
        assert_eq!("maintenance".parse::<AssetStatus>(), Ok(AssetStatus::Maintenance));
        let err = "Active".parse::<AssetStatus>().expect_err("case sensitive");
        assert_eq!(err.to_string(), "unknown status 'Active'");
    }
}
