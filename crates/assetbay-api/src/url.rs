//! URL construction helpers for the marketplace API.
//!
//! Pure functions, one per consumed endpoint, so the integration contract
//! is visible in one place.

use url::Url;

/// Append path segments to the base URL, percent-encoding each segment.
fn with_path(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    let tail = segments
        .iter()
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    url.set_path(&format!("{base_path}/{tail}"));
    url
}

/// `GET /assets/{id}/download-status`
pub fn download_status_url(base: &Url, asset_id: &str) -> Url {
    with_path(base, &["assets", asset_id, "download-status"])
}

/// `POST /assets/{id}/download`
pub fn perform_download_url(base: &Url, asset_id: &str) -> Url {
    with_path(base, &["assets", asset_id, "download"])
}

/// `GET /assets/{id}`
pub fn asset_url(base: &Url, asset_id: &str) -> Url {
    with_path(base, &["assets", asset_id])
}

/// `GET /packages[?active=true]`
pub fn packages_url(base: &Url, only_active: bool) -> Url {
    let mut url = with_path(base, &["packages"]);
    if only_active {
        url.set_query(Some("active=true"));
    }
    url
}

/// `GET /subscriptions/current`
pub fn current_subscription_url(base: &Url) -> Url {
    with_path(base, &["subscriptions", "current"])
}

/// `POST /subscriptions/change`
pub fn change_subscription_url(base: &Url) -> Url {
    with_path(base, &["subscriptions", "change"])
}

/// `POST /checkout/session`
pub fn checkout_session_url(base: &Url) -> Url {
    with_path(base, &["checkout", "session"])
}

/// `GET /auth/profile`
pub fn profile_url(base: &Url) -> Url {
    with_path(base, &["auth", "profile"])
}
