//! HTTP request handlers for the dashboard API
//!
//! This module implements all the endpoint logic:
//! - Demo login/logout issuing and clearing the session cookie
//! - Current-user and theme-preference endpoints backed by the database
//! - The overview KPI report
//! - Campaign and link list views driven by the filter/sort/aggregate pipeline
//! - Transient link creation and the link detail view

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use redb::{ReadableDatabase, ReadableTable};
use serde_json::json;
use std::env;
use tracing::{debug, info};

use crate::database::{AppState, DEMO_USER_ID, TABLE_SETTINGS, TABLE_USERS};
use crate::fixtures;
use crate::format::format_pct;
use crate::middleware::{session_clear_cookie, session_set_cookie};
use crate::model::{
    CampaignListParams, CreateLinkRequest, LinkListParams, LinkStatus, LoginRequest,
    OverviewParams, Theme, ThemeUpdate, TrackedLink, User, UserSettings,
};
use crate::overview::{build_overview, OverviewRange};
use crate::pipeline::{campaign_snapshot, link_snapshot, CampaignFilter, LinkFilter, SortCriteria};

/// Demo sign-in
///
/// Accepts any non-empty email and establishes the session by setting the
/// session cookie. There is no password and no account lookup; the cookie is
/// the whole session.
///
/// # Request Body
///
/// ```json
/// { "email": "demo@linkboard.dev" }
/// ```
///
/// # Response
///
/// - **200 OK** - Session cookie set
/// - **400 Bad Request** - Email missing or blank
pub async fn login(Json(payload): Json<LoginRequest>) -> impl IntoResponse {
    let email = payload.email.trim();

    if email.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Email is required"
            })),
        )
            .into_response();
    }

    info!("session opened for {}", email);

    (
        [(header::SET_COOKIE, session_set_cookie())],
        Json(json!({ "ok": true })),
    )
        .into_response()
}

/// Signs the session out by expiring the session cookie
pub async fn logout() -> impl IntoResponse {
    info!("session closed");

    (
        [(header::SET_COOKIE, session_clear_cookie())],
        Json(json!({ "ok": true })),
    )
        .into_response()
}

/// Returns the signed-in user and their stored settings
///
/// The demo auth maps every session to the single seeded account. Settings
/// fall back to the light theme if the row is somehow missing.
///
/// # Response
///
/// - **200 OK** - `{ "user": ..., "settings": ..., "generated_at": ... }`
/// - **404 Not Found** - The seeded account is absent from the database
pub async fn me(State(state): State<AppState>) -> impl IntoResponse {
    let read_txn = state.db.begin_read().unwrap();
    let users = read_txn.open_table(TABLE_USERS).unwrap();

    let user: User = match users.get(DEMO_USER_ID).unwrap() {
        Some(guard) => serde_json::from_str(guard.value()).unwrap(),
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "User not found"
                })),
            )
                .into_response()
        }
    };

    let settings_table = read_txn.open_table(TABLE_SETTINGS).unwrap();
    let settings: UserSettings = match settings_table.get(DEMO_USER_ID).unwrap() {
        Some(guard) => serde_json::from_str(guard.value()).unwrap(),
        None => UserSettings {
            theme: Theme::Light,
        },
    };

    Json(json!({
        "user": user,
        "settings": settings,
        "generated_at": Utc::now(),
    }))
    .into_response()
}

/// Updates the theme preference
///
/// # Request Body
///
/// ```json
/// { "theme": "dark" }
/// ```
///
/// # Response
///
/// - **200 OK** - `{ "settings": { "theme": ... } }`
/// - **400 Bad Request** - Theme is not "light" or "dark"
/// - **404 Not Found** - The seeded account is absent from the database
pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<ThemeUpdate>,
) -> impl IntoResponse {
    let theme = match payload.theme.as_deref().and_then(Theme::parse) {
        Some(theme) => theme,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid theme. Use 'light' or 'dark'."
                })),
            )
                .into_response()
        }
    };

    let write_txn = state.db.begin_write().unwrap();
    let settings = UserSettings { theme };
    {
        let users = write_txn.open_table(TABLE_USERS).unwrap();
        if users.get(DEMO_USER_ID).unwrap().is_none() {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "User not found"
                })),
            )
                .into_response();
        }

        // Upsert: insert overwrites any previous value for the key
        let mut table = write_txn.open_table(TABLE_SETTINGS).unwrap();
        let settings_json = serde_json::to_string(&settings).unwrap();
        table.insert(DEMO_USER_ID, settings_json.as_str()).unwrap();
    }
    write_txn.commit().unwrap();

    info!("theme preference saved: {:?}", theme);

    Json(json!({ "settings": settings })).into_response()
}

/// Overview KPI report for the selected window
///
/// # Query Parameters
///
/// - `range` (optional) - "7d" for the short window; anything else means 30 days
///
/// # Example Request
///
/// `GET /api/overview?range=7d`
pub async fn overview(Query(params): Query<OverviewParams>) -> impl IntoResponse {
    let range = OverviewRange::from_param(params.range.as_deref());
    let now = Utc::now();

    debug!("building overview report for {:?}", range);

    Json(build_overview(range, now.date_naive(), now)).into_response()
}

/// Campaign list view
///
/// Runs the full pipeline over the campaign store: status/text filtering,
/// stable column sort, weighted aggregation and row assembly. The response
/// is one snapshot: rows, stats, and matched/total counts.
///
/// # Query Parameters
///
/// - `status` (optional) - "all", "active", "paused" or "draft" (default "all")
/// - `q` (optional) - free-text query over name, channel and status labels
/// - `sort` (optional) - sort column (default "clicks")
/// - `dir` (optional) - "asc" or "desc" (default "desc")
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(params): Query<CampaignListParams>,
) -> impl IntoResponse {
    let filter = CampaignFilter {
        status: params.status,
        query: params.q.unwrap_or_default(),
    };
    let sort = SortCriteria::new(params.sort, params.dir);

    let snapshot = campaign_snapshot(&state.campaigns, &filter, sort, Utc::now());

    debug!(
        "campaign list: {} of {} records match",
        snapshot.matched, snapshot.total
    );

    Json(snapshot).into_response()
}

/// Link list view
///
/// Same pipeline as the campaign list with the link-variant criteria: the
/// text query searches name, short URL and destination, and the aggregation
/// is plain click/install totals.
pub async fn list_links(
    State(state): State<AppState>,
    Query(params): Query<LinkListParams>,
) -> impl IntoResponse {
    let filter = LinkFilter {
        status: params.status,
        query: params.q.unwrap_or_default(),
    };
    let sort = SortCriteria::new(params.sort, params.dir);

    let links = state.links.read();
    let snapshot = link_snapshot(&links, &filter, sort);

    Json(snapshot).into_response()
}

/// Creates a tracked link
///
/// The record lives in process memory only: it shows up in subsequent list
/// calls but is gone after a restart. The short URL slug is derived from the
/// name; the deep link, when provided, wins over the web destination.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Spring Campaign",
///   "destination": "https://example.com/landing",
///   "deep_link": "myapp://product/123"
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - The new link record
/// - **400 Bad Request** - Name or destination blank
pub async fn create_link(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> impl IntoResponse {
    let name = payload.name.trim();
    let destination = payload.destination.trim();

    if name.is_empty() || destination.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Name and destination are required"
            })),
        )
            .into_response();
    }

    // Random 8-character suffix; collisions are not a practical concern at
    // demo-store sizes
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let id = format!("lnk_{}", suffix.to_lowercase());

    let domain = env::var("SHORT_DOMAIN").unwrap_or_else(|_| "lb.sh".to_string());

    // Deep link takes priority when present and non-blank
    let destination = match payload.deep_link.as_deref().map(str::trim) {
        Some(deep_link) if !deep_link.is_empty() => deep_link.to_string(),
        _ => destination.to_string(),
    };

    let record = TrackedLink {
        id,
        name: name.to_string(),
        short_url: format!("{}/{}", domain, slugify(name)),
        destination,
        clicks: 0,
        installs: 0,
        status: LinkStatus::Active,
        created_at: Utc::now().date_naive(),
    };

    info!("link created: {} -> {}", record.short_url, record.destination);

    // Replace the list wholesale under the write lock; readers see either
    // the old list or the new one, never a partial update
    {
        let mut links = state.links.write();
        let mut next = Vec::with_capacity(links.len() + 1);
        next.push(record.clone());
        next.extend(links.iter().cloned());
        *links = next;
    }

    (StatusCode::CREATED, Json(record)).into_response()
}

/// Link detail view
///
/// Returns the link record, its one-week performance series and the series
/// totals including the click-to-install conversion rate.
///
/// # Path Parameters
///
/// - `id` - The link identifier (e.g., "lnk_1")
///
/// # Response
///
/// - **200 OK** - `{ "link": ..., "series": [...], "totals": ... }`
/// - **404 Not Found** - No link with that id
pub async fn get_link(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let link = {
        let links = state.links.read();
        links.iter().find(|l| l.id == id).cloned()
    };

    let link = match link {
        Some(link) => link,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Link not found"
                })),
            )
                .into_response()
        }
    };

    let series = fixtures::link_series();
    let clicks: u64 = series.iter().map(|p| p.clicks).sum();
    let installs: u64 = series.iter().map(|p| p.installs).sum();
    // explicit zero branch, same policy as the pipeline aggregates
    let cvr = if clicks == 0 {
        0.0
    } else {
        installs as f64 / clicks as f64
    };

    Json(json!({
        "link": link,
        "series": series,
        "totals": {
            "clicks": clicks,
            "installs": installs,
            "cvr": cvr,
            "cvr_display": format_pct(cvr),
        },
    }))
    .into_response()
}

/// Lowercases a link name into a short URL slug
///
/// Whitespace runs become single dashes and the result is capped at 24
/// characters, falling back to "link" for all-whitespace names.
fn slugify(name: &str) -> String {
    let slug = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    let slug: String = slug.chars().take(24).collect();

    if slug.is_empty() {
        "link".to_string()
    } else {
        slug
    }
}
