pub mod auth;
pub mod error;

pub use auth::{LogoutResponse, ReissueResponse, SessionsTerminatedResponse};
pub use error::{ErrorResponse, ErrorResponseExt};
