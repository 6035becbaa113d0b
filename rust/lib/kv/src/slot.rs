use std::sync::Arc;

use crate::error::KVError;
use crate::traits::KVStore;

/// A single named string slot on top of a KVStore.
///
/// This is all the session layer needs from persistence: read, write, clear
/// one value. The slot never holds more than one value.
#[derive(Clone)]
pub struct Slot {
    kv: Arc<dyn KVStore>,
    key: String,
}

impl Slot {
    pub fn new(kv: Arc<dyn KVStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the slot. An empty stored value reads as absent.
    pub fn get(&self) -> Result<Option<String>, KVError> {
        match self.kv.get(&self.key)? {
            Some(bytes) if bytes.is_empty() => Ok(None),
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| KVError::Encoding(self.key.clone())),
            None => Ok(None),
        }
    }

    pub fn set(&self, value: &str) -> Result<(), KVError> {
        self.kv.set(&self.key, value.as_bytes())
    }

    pub fn clear(&self) -> Result<(), KVError> {
        self.kv.delete(&self.key)
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot").field("key", &self.key).finish()
    }
}
