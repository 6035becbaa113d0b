//! Avatar reference resolution.
//!
//! The backend hands out avatar references either as server-relative paths
//! (`/api/about/photo`) or as absolute URLs. Relative paths hang off the
//! backend origin, which is the API base without its `/api` suffix.

/// The backend origin for an API base URL.
///
/// `http://host:8080/api` and `http://host:8080/api/` both give
/// `http://host:8080`. A base without an `/api` suffix is returned without
/// its trailing slash.
pub fn api_origin(base_url: &str) -> &str {
    let trimmed = base_url.strip_suffix('/').unwrap_or(base_url);
    trimmed.strip_suffix("/api").unwrap_or(trimmed)
}

/// Resolve an avatar reference into an address a viewer can load.
///
/// Empty or missing references resolve to `None`.
pub fn resolve_avatar_url(base_url: &str, avatar: Option<&str>) -> Option<String> {
    let avatar = avatar.filter(|a| !a.is_empty())?;
    if avatar.starts_with('/') {
        Some(format!("{}{}", api_origin(base_url), avatar))
    } else {
        Some(avatar.to_string())
    }
}
