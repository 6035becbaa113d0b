//! Photo upload state — stored at `upload/state`.

use serde::Serialize;

/// Upload lock. While `busy`, further uploads are refused.
///
/// Taken with `StateStore::update`, so two callers on different threads
/// cannot both acquire it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadState {
    pub busy: bool,
}

impl UploadState {
    pub const PATH: &'static str = "upload/state";
}
