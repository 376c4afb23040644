pub mod identity;
pub mod refresh;

pub use identity::{StaticRoleDirectory, UserRoleLookup, DEFAULT_ROLE};
pub use refresh::{MemoryRefreshStore, RefreshStore};
