//! List view pipeline: filter, then sort, then paginate.
//!
//! Every call recomputes from the full snapshot. Nothing is cached between
//! calls; collections stay in the low thousands.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::types::{Asset, AssetStatus, ParseValueError};

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Status selector; `All` disables status filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Maintenance,
}

impl StatusFilter {
    pub fn matches(self, status: AssetStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == AssetStatus::Active,
            StatusFilter::Inactive => status == AssetStatus::Inactive,
            StatusFilter::Maintenance => status == AssetStatus::Maintenance,
        }
    }
}

impl From<AssetStatus> for StatusFilter {
    fn from(status: AssetStatus) -> Self {
        match status {
            AssetStatus::Active => StatusFilter::Active,
            AssetStatus::Inactive => StatusFilter::Inactive,
            AssetStatus::Maintenance => StatusFilter::Maintenance,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse::<AssetStatus>()
            .map(StatusFilter::from)
            .map_err(|_| ParseValueError::new("status filter", s))
    }
}

/// Filter inputs. Status and search are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub status: StatusFilter,
    /// Case-insensitive substring matched against `id`, `name` and `location`.
    /// Empty disables the search predicate.
    pub search: String,
}

impl FilterState {
    pub fn matches(&self, asset: &Asset) -> bool {
        if !self.status.matches(asset.status) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [&asset.id, &asset.name, &asset.location]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Sortable column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Capacity,
    Location,
    Status,
    Efficiency,
    InstallDate,
    LastMaintenance,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Id,
        SortField::Name,
        SortField::Capacity,
        SortField::Location,
        SortField::Status,
        SortField::Efficiency,
        SortField::InstallDate,
        SortField::LastMaintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Capacity => "capacity",
            SortField::Location => "location",
            SortField::Status => "status",
            SortField::Efficiency => "efficiency",
            SortField::InstallDate => "installDate",
            SortField::LastMaintenance => "lastMaintenance",
        }
    }
}

impl FromStr for SortField {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseValueError::new("sort field", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ParseValueError::new("sort direction", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Zero-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub index: usize,
    pub size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Output of [`compute_visible_page`].
#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePage {
    pub records: Vec<Asset>,
    /// Records left after filtering, across all pages.
    pub matched_count: usize,
    pub page_count: usize,
}

/// Derive the visible slice of `records` for the given view state.
pub fn compute_visible_page(
    records: &[Asset],
    filter: &FilterState,
    sort: &SortState,
    page: &PageState,
) -> VisiblePage {
    let mut matched = filter_assets(records, filter);
    sort_assets(&mut matched, sort);
    let matched_count = matched.len();
    let page_count = if page.size == 0 {
        0
    } else {
        matched_count.div_ceil(page.size)
    };
    let records = paginate(&matched, page).into_iter().cloned().collect();
    VisiblePage {
        records,
        matched_count,
        page_count,
    }
}

/// Keep records satisfying the filter, in input order.
pub fn filter_assets<'a>(records: &'a [Asset], filter: &FilterState) -> Vec<&'a Asset> {
    records.iter().filter(|asset| filter.matches(asset)).collect()
}

/// Stable sort; equal keys keep their relative order in both directions.
pub fn sort_assets(records: &mut [&Asset], sort: &SortState) {
    records.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Slice one page out of `items`. Out-of-range pages are empty.
pub fn paginate<T: Copy>(items: &[T], page: &PageState) -> Vec<T> {
    let Some(start) = page.index.checked_mul(page.size) else {
        return Vec::new();
    };
    if page.size == 0 || start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page.size).min(items.len());
    items[start..end].to_vec()
}

fn compare_by_field(a: &Asset, b: &Asset, field: SortField) -> Ordering {
    match field {
        SortField::Id => compare_text(&a.id, &b.id),
        SortField::Name => compare_text(&a.name, &b.name),
        SortField::Capacity => a.capacity.total_cmp(&b.capacity),
        SortField::Location => compare_text(&a.location, &b.location),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::Efficiency => a.efficiency.total_cmp(&b.efficiency),
        SortField::InstallDate => compare_text(&a.install_date, &b.install_date),
        SortField::LastMaintenance => compare_text(&a.last_maintenance, &b.last_maintenance),
    }
}

/// Case-insensitive primary ordering, raw bytes as the secondary key.
fn compare_text(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}

/// Serializable listing returned by the CLI and the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListing {
    pub items: Vec<Asset>,
    pub matched_count: usize,
    /// Collection size before filtering.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
}

impl AssetListing {
    pub fn new(visible: VisiblePage, page: &PageState, total: usize) -> Self {
        Self {
            items: visible.records,
            matched_count: visible.matched_count,
            total,
            page: page.index,
            page_size: page.size,
            page_count: visible.page_count,
        }
    }
}
