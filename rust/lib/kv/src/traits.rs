use crate::error::KVError;

/// KVStore is the narrow persistence capability the client core depends on.
///
/// Keys are flat strings (`portfolio_admin_token`). Implementations must
/// survive process restarts unless they say otherwise (see `MemoryStore`).
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;
}
