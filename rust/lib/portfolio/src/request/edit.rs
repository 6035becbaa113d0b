//! Profile edit requests.

use crate::state::ProfileField;

/// Seed a draft from the current profile.
#[derive(Debug, Clone)]
pub struct BeginEditReq;

impl BeginEditReq {
    pub const PATH: &'static str = "edit/begin";
}

#[derive(Debug, Clone)]
pub struct EditFieldReq {
    pub field: ProfileField,
    pub value: String,
}

impl EditFieldReq {
    pub const PATH: &'static str = "edit/field";
}

/// Discard the draft. Never touches the network.
#[derive(Debug, Clone)]
pub struct CancelEditReq;

impl CancelEditReq {
    pub const PATH: &'static str = "edit/cancel";
}

/// Send the draft to the backend.
#[derive(Debug, Clone)]
pub struct CommitEditReq;

impl CommitEditReq {
    pub const PATH: &'static str = "edit/commit";
}
