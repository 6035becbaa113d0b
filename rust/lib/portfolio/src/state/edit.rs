//! Profile edit state — stored at `edit/about`.

use folio_client::ProfileRecord;
use serde::Serialize;

/// Text fields of the profile a draft may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Headline,
    Summary,
    Location,
}

impl std::str::FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "headline" => Ok(ProfileField::Headline),
            "summary" => Ok(ProfileField::Summary),
            "location" => Ok(ProfileField::Location),
            other => Err(format!("unknown profile field: {}", other)),
        }
    }
}

/// An uncommitted copy of the profile.
///
/// Owns its record outright; nothing else sees edits until a commit
/// succeeds. The id is fixed at seeding time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    record: ProfileRecord,
}

impl Draft {
    pub fn seed(base: &ProfileRecord) -> Self {
        Self {
            record: base.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    pub fn apply(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::Headline => self.record.headline = value,
            ProfileField::Summary => self.record.summary = value,
            ProfileField::Location => self.record.location = value,
        }
    }

    /// Take the avatar reference from a server record, leaving every other
    /// field as edited. Refused (returns false) for a different record.
    pub fn adopt_avatar(&mut self, from: &ProfileRecord) -> bool {
        if from.id != self.record.id {
            return false;
        }
        self.record.avatar_url = from.avatar_url.clone();
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<Draft>,
    /// A commit is outstanding.
    pub saving: bool,
}

impl EditState {
    pub const PATH: &'static str = "edit/about";

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }
}
