//! Dashboard statistics over a record snapshot.

use serde::Serialize;

use crate::core::types::{Asset, AssetStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub total: usize,
    pub active: usize,
    pub maintenance: usize,
    pub total_capacity_kw: f64,
    /// Megawatts rounded to one decimal place.
    pub total_capacity_mw: f64,
    /// Mean efficiency rounded to the nearest percent; `0` for no records.
    pub average_efficiency: u32,
}

pub fn summarize(assets: &[Asset]) -> AssetSummary {
    let count_status = |status: AssetStatus| {
        assets
            .iter()
            .filter(|asset| asset.status == status)
            .count()
    };
    let total_capacity_kw: f64 = assets.iter().map(|asset| asset.capacity).sum();
    let average_efficiency = if assets.is_empty() {
        0
    } else {
        let sum: f64 = assets.iter().map(|asset| asset.efficiency).sum();
        (sum / assets.len() as f64).round() as u32
    };

    AssetSummary {
        total: assets.len(),
        active: count_status(AssetStatus::Active),
        maintenance: count_status(AssetStatus::Maintenance),
        total_capacity_kw,
        total_capacity_mw: (total_capacity_kw / 100.0).round() / 10.0,
        average_efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::asset;

    #[test]
    fn empty_collection_has_zero_average() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_efficiency, 0);
        assert_eq!(summary.total_capacity_mw, 0.0);
    }

    #[test]
    fn counts_statuses_and_rounds_totals() {
        let mut slow = asset("SA-0003", AssetStatus::Maintenance, 1000.0);
        slow.efficiency = 71.0;
        let assets = vec![
            asset("SA-0001", AssetStatus::Active, 1250.0),
            asset("SA-0002", AssetStatus::Inactive, 2000.0),
            slow,
        ];

        let summary = summarize(&assets);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.maintenance, 1);
        assert_eq!(summary.total_capacity_kw, 4250.0);
        assert_eq!(summary.total_capacity_mw, 4.3);
        // (85 + 85 + 71) / 3 = 80.33
        assert_eq!(summary.average_efficiency, 80);
    }
}
