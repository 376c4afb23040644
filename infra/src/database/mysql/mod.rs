//! MySQL implementations of the core ports

pub mod refresh_store_impl;
pub mod user_role_lookup_impl;

pub use refresh_store_impl::MySqlRefreshStore;
pub use user_role_lookup_impl::MySqlUserRoleLookup;
