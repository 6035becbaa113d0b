//! Content requests.

/// Fetch profile, links and (optionally) projects together.
#[derive(Debug, Clone)]
pub struct LoadContentReq;

impl LoadContentReq {
    pub const PATH: &'static str = "content/load";
}
