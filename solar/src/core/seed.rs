//! Synthetic asset generation for seeding a fresh store.
//!
//! Generation is driven by a caller-supplied RNG so a fixed seed reproduces
//! the same collection.

use rand::Rng;

use crate::core::types::{Asset, AssetStatus};

pub const LOCATIONS: [&str; 12] = [
    "California Solar Farm",
    "Texas Desert Installation",
    "Arizona Array Site",
    "Nevada Solar Park",
    "New Mexico Grid",
    "Colorado Mountain Array",
    "Oregon Coast Installation",
    "Washington Valley Site",
    "Utah Desert Farm",
    "Idaho Solar Grid",
    "Montana Plains Array",
    "Wyoming Solar Park",
];

const ID_PREFIX: &str = "SA-";

/// Format a sequence number as an asset id (`SA-0042`).
pub fn format_asset_id(number: u64) -> String {
    format!("{ID_PREFIX}{number:04}")
}

/// Sequence number embedded in an asset id, if it has the `SA-` form.
pub fn parse_asset_number(id: &str) -> Option<u64> {
    id.strip_prefix(ID_PREFIX)?.parse().ok()
}

/// Generate `count` assets with ids `SA-0001..`.
pub fn generate_assets<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Asset> {
    (1..=count as u64)
        .map(|number| Asset {
            id: format_asset_id(number),
            name: format!("Solar Array {number}"),
            capacity: f64::from(rng.gen_range(100u32..5100)),
            location: LOCATIONS[rng.gen_range(0..LOCATIONS.len())].to_string(),
            status: AssetStatus::ALL[rng.gen_range(0..AssetStatus::ALL.len())],
            install_date: random_date(rng, 2018, 2024),
            efficiency: f64::from(rng.gen_range(70u32..100)),
            last_maintenance: random_date(rng, 2022, 2024),
        })
        .collect()
}

// Days stop at 28 so every month is valid.
fn random_date<R: Rng + ?Sized>(rng: &mut R, first_year: i32, last_year: i32) -> String {
    let year = rng.gen_range(first_year..=last_year);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    format!("{year}-{month:02}-{day:02}")
}
