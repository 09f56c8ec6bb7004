use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::env;

/// Name of the session cookie issued by the login endpoint
pub const SESSION_COOKIE: &str = "session";

/// The demo session token; real token issuance is out of scope for this app
pub const SESSION_TOKEN: &str = "demo-session";

/// Session lifetime: 7 days
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// Extracts the session cookie value from the request headers
///
/// Returns `None` when the `Cookie` header is missing, unparseable, or does
/// not carry a non-empty `session` pair.
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// Builds the `Set-Cookie` value that establishes a session
///
/// HttpOnly + SameSite=Lax, scoped to the whole site. The Secure attribute
/// is only added when APP_ENV=production so local plain-HTTP development
/// still gets a cookie.
pub fn session_set_cookie() -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, SESSION_TOKEN, SESSION_TTL_SECS
    );
    if env::var("APP_ENV").as_deref() == Ok("production") {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that clears the session immediately
pub fn session_clear_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

/// Middleware guarding the dashboard API
///
/// Every route behind this layer requires the session cookie set by the
/// login endpoint. Rejections are JSON 401s; this service has no HTML
/// surface to redirect to.
pub async fn session_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    if session_from_headers(&headers).is_none() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized"
            })),
        )
            .into_response());
    }

    Ok(next.run(request).await)
}
