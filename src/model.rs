//! Data models for the marketing-analytics dashboard
//!
//! This module defines all the data structures used throughout the application:
//! the campaign and link records served by the list endpoints, the closed
//! enumerations they draw their status/channel/sort values from, and the
//! request models of the HTTP API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a campaign
///
/// Campaigns move between a small fixed set of states; every other value is
/// rejected at deserialization time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Draft,
}

impl CampaignStatus {
    /// Lowercase label, used for text search and status ordering
    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Draft => "draft",
        }
    }
}

/// Acquisition channel a campaign runs on
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Paid,
    Organic,
    Referral,
}

impl Channel {
    /// Lowercase label, used for text search and channel ordering
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Paid => "paid",
            Channel::Organic => "organic",
            Channel::Referral => "referral",
        }
    }
}

/// A marketing campaign record
///
/// Records are seeded once at startup and never mutated; the list endpoint
/// derives filtered/sorted views from them on every request.
///
/// Invariants:
/// - `id` is unique within the record store
/// - `ctr` is a ratio in `[0, 1]`
/// - `cpi` is a non-negative dollar amount
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Campaign {
    /// Opaque unique identifier (e.g., "cmp_001")
    pub id: String,

    /// Display name shown in the dashboard
    pub name: String,

    /// Current lifecycle status
    pub status: CampaignStatus,

    /// Acquisition channel classification
    pub channel: Channel,

    /// Total ad clicks attributed to this campaign
    pub clicks: u64,

    /// Total app installs attributed to this campaign
    pub installs: u64,

    /// Click-through rate, 0.0 - 1.0
    pub ctr: f64,

    /// Cost per install in dollars
    pub cpi: f64,

    /// When the campaign was last touched; drives recency sort and the
    /// relative-age column
    pub updated_at: DateTime<Utc>,

    /// Optional free-text description
    pub description: Option<String>,
}

/// Lifecycle status of a tracked link
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Paused,
}

impl LinkStatus {
    /// Lowercase label, used for text search and status ordering
    pub fn as_str(self) -> &'static str {
        match self {
            LinkStatus::Active => "active",
            LinkStatus::Paused => "paused",
        }
    }
}

/// A tracked deep link record
///
/// Seed links are loaded at startup; links created through the API are held
/// in memory only and vanish on restart (there is no authoritative write
/// path for link records).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrackedLink {
    /// Opaque unique identifier (e.g., "lnk_1")
    pub id: String,

    /// Display name shown in the dashboard
    pub name: String,

    /// The branded short URL (e.g., "lb.sh/winter")
    pub short_url: String,

    /// Where the short URL resolves to: a web URL or an app deep link
    pub destination: String,

    /// Total clicks recorded against this link
    pub clicks: u64,

    /// Total installs recorded against this link
    pub installs: u64,

    /// Current lifecycle status
    pub status: LinkStatus,

    /// Calendar date the link was created
    pub created_at: NaiveDate,
}

/// One day of click/install counts in a link's performance series
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatPoint {
    /// Short day label (e.g., "Jan 4")
    pub day: String,

    /// Clicks recorded on that day
    pub clicks: u64,

    /// Installs recorded on that day
    pub installs: u64,
}

/// Status selector for filtering the campaign list
///
/// `All` disables the status constraint; every other variant matches exactly
/// one [`CampaignStatus`]. Parsed straight from the `status` query parameter.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatusFilter {
    #[default]
    All,
    Active,
    Paused,
    Draft,
}

impl CampaignStatusFilter {
    /// Whether a record with the given status passes this selector
    pub fn matches(self, status: CampaignStatus) -> bool {
        match self {
            CampaignStatusFilter::All => true,
            CampaignStatusFilter::Active => status == CampaignStatus::Active,
            CampaignStatusFilter::Paused => status == CampaignStatus::Paused,
            CampaignStatusFilter::Draft => status == CampaignStatus::Draft,
        }
    }
}

/// Status selector for filtering the link list
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatusFilter {
    #[default]
    All,
    Active,
    Paused,
}

impl LinkStatusFilter {
    /// Whether a record with the given status passes this selector
    pub fn matches(self, status: LinkStatus) -> bool {
        match self {
            LinkStatusFilter::All => true,
            LinkStatusFilter::Active => status == LinkStatus::Active,
            LinkStatusFilter::Paused => status == LinkStatus::Paused,
        }
    }
}

/// Sort direction for list views
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Applies this direction to an ascending comparison result
    pub fn apply(self, ord: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Columns the campaign table can be sorted by
///
/// One variant per sortable field, so adding or removing a column is a
/// compile-time-checked change in the comparator dispatch.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CampaignSortKey {
    Name,
    Status,
    Channel,
    #[default]
    Clicks,
    Installs,
    Ctr,
    Cpi,
    UpdatedAt,
}

/// Columns the link table can be sorted by
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkSortKey {
    Name,
    #[default]
    Clicks,
    Installs,
    Status,
    CreatedAt,
}

/// Query parameters for the campaign list endpoint
///
/// # Example Request
///
/// `GET /api/campaigns?status=active&q=promo&sort=ctr&dir=asc`
#[derive(Deserialize, Default)]
pub struct CampaignListParams {
    /// Status selector; defaults to `all`
    #[serde(default)]
    pub status: CampaignStatusFilter,

    /// Free-text query matched against name, channel and status labels
    pub q: Option<String>,

    /// Sort column; defaults to `clicks`
    #[serde(default)]
    pub sort: CampaignSortKey,

    /// Sort direction; defaults to `desc` (most relevant first)
    #[serde(default)]
    pub dir: SortDirection,
}

/// Query parameters for the link list endpoint
///
/// # Example Request
///
/// `GET /api/links?q=invite&sort=installs&dir=desc`
#[derive(Deserialize, Default)]
pub struct LinkListParams {
    /// Status selector; defaults to `all`
    #[serde(default)]
    pub status: LinkStatusFilter,

    /// Free-text query matched against name, short URL and destination
    pub q: Option<String>,

    /// Sort column; defaults to `clicks`
    #[serde(default)]
    pub sort: LinkSortKey,

    /// Sort direction; defaults to `desc`
    #[serde(default)]
    pub dir: SortDirection,
}

/// Query parameters for the overview endpoint
///
/// # Example Request
///
/// `GET /api/overview?range=7d`
#[derive(Deserialize, Default)]
pub struct OverviewParams {
    /// "7d" selects the short window; anything else falls back to 30 days
    pub range: Option<String>,
}

/// Request payload for the login endpoint
///
/// # Example
/// ```json
/// { "email": "demo@linkboard.dev" }
/// ```
#[derive(Deserialize)]
pub struct LoginRequest {
    /// Any non-empty email is accepted by the demo auth
    #[serde(default)]
    pub email: String,
}

/// Request payload for creating a tracked link
///
/// # Example
/// ```json
/// {
///   "name": "Spring Campaign",
///   "destination": "https://example.com/landing",
///   "deep_link": "myapp://product/123"
/// }
/// ```
#[derive(Deserialize)]
pub struct CreateLinkRequest {
    /// Display name; also the source of the short URL slug
    #[serde(default)]
    pub name: String,

    /// Web destination URL
    #[serde(default)]
    pub destination: String,

    /// Optional app deep link; takes priority over `destination` when set
    pub deep_link: Option<String>,
}

/// Request payload for updating the theme preference
#[derive(Deserialize)]
pub struct ThemeUpdate {
    /// Must be "light" or "dark"; validated in the handler so an invalid
    /// value produces a 400 with a message rather than a body rejection
    pub theme: Option<String>,
}

/// UI theme preference persisted per user
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Parses a theme label, rejecting anything outside the closed set
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// A dashboard user account
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    /// Opaque unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Login email
    pub email: String,
}

/// Per-user settings stored in the database
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserSettings {
    /// Current UI theme
    pub theme: Theme,
}
