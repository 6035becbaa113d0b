pub mod error;
pub mod memory;
pub mod redb;
pub mod slot;
pub mod traits;

pub use error::KVError;
pub use memory::MemoryStore;
pub use redb::RedbStore;
pub use slot::Slot;
pub use traits::KVStore;
