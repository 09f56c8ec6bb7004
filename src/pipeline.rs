//! List pipeline: filter, sort, aggregate, assemble
//!
//! This module implements the data path behind the campaign and link list
//! endpoints. Every stage is a pure function over already-resident records:
//!
//! 1. Filter - reduce the record store by status selector and text query
//! 2. Sort - stable, type-aware ordering by a selectable column
//! 3. Aggregate - counts, sums and volume-weighted averages
//! 4. Assemble - rows with derived flags and display strings, plus the
//!    aggregation result, as one snapshot per recomputation
//!
//! Empty results are ordinary values, and a zero-weight aggregation yields
//! exactly zero rather than NaN.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::{format_count, format_date, format_money, format_pct, format_relative};
use crate::model::{
    Campaign, CampaignSortKey, CampaignStatus, CampaignStatusFilter, LinkSortKey, LinkStatus,
    LinkStatusFilter, SortDirection, TrackedLink,
};

/// An active campaign below this click-through rate is flagged as
/// underperforming in the list view
pub const LOW_CTR_THRESHOLD: f64 = 0.06;

/// Filter criteria for the campaign list
///
/// Ephemeral per-view state: built from query parameters on each request and
/// never stored.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    pub status: CampaignStatusFilter,
    pub query: String,
}

/// Filter criteria for the link list
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    pub status: LinkStatusFilter,
    pub query: String,
}

/// Sort criteria: a column and a direction
///
/// Toggling the active column flips the direction; selecting a new column
/// resets to descending so the biggest values surface first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriteria<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortCriteria<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        SortCriteria { key, direction }
    }

    /// Applies a header click to the criteria
    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Desc;
        }
    }
}

impl<K: Default> Default for SortCriteria<K> {
    fn default() -> Self {
        SortCriteria {
            key: K::default(),
            direction: SortDirection::Desc,
        }
    }
}

/// Summary statistics over the filtered campaign list
///
/// `ctr` is weighted by clicks and `cpi` by installs: an unweighted mean of
/// per-record ratios misrepresents blended performance when record volumes
/// differ by orders of magnitude.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CampaignStats {
    /// Number of records after filtering
    pub total: usize,

    /// Records whose status is `active`
    pub active_count: usize,

    /// Sum of clicks
    pub clicks: u64,

    /// Sum of installs
    pub installs: u64,

    /// Click-weighted average click-through rate; 0 when no clicks
    pub ctr: f64,

    /// Install-weighted average cost per install; 0 when no installs
    pub cpi: f64,
}

/// Summary totals over the filtered link list
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkTotals {
    /// Number of records after filtering
    pub total: usize,

    /// Records whose status is `active`
    pub active_count: usize,

    /// Sum of clicks
    pub clicks: u64,

    /// Sum of installs
    pub installs: u64,
}

/// A campaign row as presented to the dashboard table
#[derive(Serialize, Debug, Clone)]
pub struct CampaignRow {
    #[serde(flatten)]
    pub campaign: Campaign,

    /// Active but converting below [`LOW_CTR_THRESHOLD`]; recomputed on
    /// every pass, never stored
    pub low_ctr: bool,

    pub clicks_display: String,
    pub installs_display: String,
    pub ctr_display: String,
    pub cpi_display: String,
    pub updated_relative: String,
}

/// A link row as presented to the dashboard table
#[derive(Serialize, Debug, Clone)]
pub struct LinkRow {
    #[serde(flatten)]
    pub link: TrackedLink,

    pub clicks_display: String,
    pub installs_display: String,
    pub created_display: String,
}

/// One recomputation cycle's output for the campaign list
#[derive(Serialize, Debug, Clone)]
pub struct CampaignSnapshot {
    /// Filtered, sorted rows
    pub data: Vec<CampaignRow>,

    /// Aggregates over the filtered set
    pub stats: CampaignStats,

    /// Rows matching the filter (same as `data.len()`)
    pub matched: usize,

    /// Size of the unfiltered record store
    pub total: usize,
}

/// One recomputation cycle's output for the link list
#[derive(Serialize, Debug, Clone)]
pub struct LinkSnapshot {
    pub data: Vec<LinkRow>,
    pub totals: LinkTotals,
    pub matched: usize,
    pub total: usize,
}

/// Reduces the campaign store to records matching the filter criteria
///
/// A record passes when the status selector admits its status AND the query
/// is blank or a case-insensitive substring of its name, channel label or
/// status label. The input is untouched; matches are cloned out.
pub fn filter_campaigns(records: &[Campaign], filter: &CampaignFilter) -> Vec<Campaign> {
    let q = filter.query.trim().to_lowercase();

    records
        .iter()
        .filter(|c| {
            if !filter.status.matches(c.status) {
                return false;
            }
            if q.is_empty() {
                return true;
            }
            c.name.to_lowercase().contains(&q)
                || c.channel.as_str().contains(&q)
                || c.status.as_str().contains(&q)
        })
        .cloned()
        .collect()
}

/// Reduces the link store to records matching the filter criteria
///
/// The link variant searches name, short URL and destination.
pub fn filter_links(records: &[TrackedLink], filter: &LinkFilter) -> Vec<TrackedLink> {
    let q = filter.query.trim().to_lowercase();

    records
        .iter()
        .filter(|l| {
            if !filter.status.matches(l.status) {
                return false;
            }
            if q.is_empty() {
                return true;
            }
            l.name.to_lowercase().contains(&q)
                || l.short_url.to_lowercase().contains(&q)
                || l.destination.to_lowercase().contains(&q)
        })
        .cloned()
        .collect()
}

/// Orders campaigns by the requested column and direction
///
/// Text columns compare case-insensitively, numeric columns by value and the
/// timestamp column by instant. The sort is stable, so records with equal
/// keys keep their relative order in either direction.
pub fn sort_campaigns(
    mut rows: Vec<Campaign>,
    sort: SortCriteria<CampaignSortKey>,
) -> Vec<Campaign> {
    rows.sort_by(|a, b| {
        let ord = match sort.key {
            CampaignSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            CampaignSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            CampaignSortKey::Channel => a.channel.as_str().cmp(b.channel.as_str()),
            CampaignSortKey::Clicks => a.clicks.cmp(&b.clicks),
            CampaignSortKey::Installs => a.installs.cmp(&b.installs),
            CampaignSortKey::Ctr => a.ctr.partial_cmp(&b.ctr).unwrap_or(Ordering::Equal),
            CampaignSortKey::Cpi => a.cpi.partial_cmp(&b.cpi).unwrap_or(Ordering::Equal),
            CampaignSortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        sort.direction.apply(ord)
    });
    rows
}

/// Orders links by the requested column and direction
pub fn sort_links(mut rows: Vec<TrackedLink>, sort: SortCriteria<LinkSortKey>) -> Vec<TrackedLink> {
    rows.sort_by(|a, b| {
        let ord = match sort.key {
            LinkSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            LinkSortKey::Clicks => a.clicks.cmp(&b.clicks),
            LinkSortKey::Installs => a.installs.cmp(&b.installs),
            LinkSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            LinkSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        sort.direction.apply(ord)
    });
    rows
}

/// Sum of `ratio * weight` over the rows, divided by the weight sum
///
/// Returns exactly 0 when the weight sum is 0 (empty list or all-zero
/// volume); the division must never be left to produce NaN.
fn weighted_ratio<T>(
    rows: &[T],
    ratio: impl Fn(&T) -> f64,
    weight: impl Fn(&T) -> u64,
) -> f64 {
    let denom: u64 = rows.iter().map(&weight).sum();
    if denom == 0 {
        return 0.0;
    }
    let num: f64 = rows.iter().map(|r| ratio(r) * weight(r) as f64).sum();
    num / denom as f64
}

/// Computes summary statistics over the filtered campaign list
pub fn campaign_stats(rows: &[Campaign]) -> CampaignStats {
    CampaignStats {
        total: rows.len(),
        active_count: rows
            .iter()
            .filter(|c| c.status == CampaignStatus::Active)
            .count(),
        clicks: rows.iter().map(|c| c.clicks).sum(),
        installs: rows.iter().map(|c| c.installs).sum(),
        ctr: weighted_ratio(rows, |c| c.ctr, |c| c.clicks),
        cpi: weighted_ratio(rows, |c| c.cpi, |c| c.installs),
    }
}

/// Computes summary totals over the filtered link list
pub fn link_totals(rows: &[TrackedLink]) -> LinkTotals {
    LinkTotals {
        total: rows.len(),
        active_count: rows
            .iter()
            .filter(|l| l.status == LinkStatus::Active)
            .count(),
        clicks: rows.iter().map(|l| l.clicks).sum(),
        installs: rows.iter().map(|l| l.installs).sum(),
    }
}

/// Runs the full campaign pipeline and assembles the view snapshot
///
/// `now` anchors the relative-age display strings.
pub fn campaign_snapshot(
    records: &[Campaign],
    filter: &CampaignFilter,
    sort: SortCriteria<CampaignSortKey>,
    now: DateTime<Utc>,
) -> CampaignSnapshot {
    let filtered = filter_campaigns(records, filter);
    let stats = campaign_stats(&filtered);
    let ordered = sort_campaigns(filtered, sort);

    let data: Vec<CampaignRow> = ordered
        .into_iter()
        .map(|c| {
            let low_ctr = c.status == CampaignStatus::Active && c.ctr < LOW_CTR_THRESHOLD;
            CampaignRow {
                low_ctr,
                clicks_display: format_count(c.clicks),
                installs_display: format_count(c.installs),
                ctr_display: format_pct(c.ctr),
                cpi_display: format_money(c.cpi),
                updated_relative: format_relative(c.updated_at, now),
                campaign: c,
            }
        })
        .collect();

    CampaignSnapshot {
        matched: data.len(),
        total: records.len(),
        data,
        stats,
    }
}

/// Runs the full link pipeline and assembles the view snapshot
pub fn link_snapshot(
    records: &[TrackedLink],
    filter: &LinkFilter,
    sort: SortCriteria<LinkSortKey>,
) -> LinkSnapshot {
    let filtered = filter_links(records, filter);
    let totals = link_totals(&filtered);
    let ordered = sort_links(filtered, sort);

    let data: Vec<LinkRow> = ordered
        .into_iter()
        .map(|l| LinkRow {
            clicks_display: format_count(l.clicks),
            installs_display: format_count(l.installs),
            created_display: format_date(l.created_at),
            link: l,
        })
        .collect();

    LinkSnapshot {
        matched: data.len(),
        total: records.len(),
        data,
        totals,
    }
}
