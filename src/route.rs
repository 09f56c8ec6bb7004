//! Route definitions for the dashboard API
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers. It creates the Axum router with the application state.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::database::AppState;
use crate::handler::{
    create_link, get_link, list_campaigns, list_links, login, logout, me, overview,
    update_settings,
};

use crate::middleware::session_middleware;
use axum::middleware;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /api/auth/login` - Establishes the demo session (public)
/// - `POST /api/auth/logout` - Clears the session cookie (public)
/// - `GET /api/me` - Signed-in user and settings
/// - `PATCH /api/me/settings` - Updates the theme preference
/// - `GET /api/overview` - KPI report for a 7/30-day window
/// - `GET /api/campaigns` - Filtered/sorted campaign list with aggregates
/// - `GET /api/links` - Filtered/sorted link list with totals
/// - `POST /api/links` - Creates a transient tracked link
/// - `GET /api/links/{id}` - Link detail with performance series
///
/// Everything except the auth pair sits behind the session-cookie middleware.
///
/// # Arguments
///
/// * `state` - Application state containing the database and record stores
///
/// # Returns
///
/// Configured Axum Router ready to handle requests
pub fn create_app(state: AppState) -> Router {
    // Dashboard routes that require an established session
    let dashboard_routes = Router::new()
        .route("/me", get(me))
        .route("/me/settings", patch(update_settings))
        .route("/overview", get(overview))
        .route("/campaigns", get(list_campaigns))
        .route("/links", get(list_links).post(create_link))
        .route("/links/{id}", get(get_link))
        .layer(middleware::from_fn(session_middleware));

    // Auth endpoints stay reachable without a session
    let auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout));

    Router::new()
        // Mount everything under /api
        .nest("/api", auth_routes.merge(dashboard_routes))
        // Inject the application state into all handlers
        .with_state(state)
}
