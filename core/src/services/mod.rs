//! Business services containing the token lifecycle logic.

pub mod lifecycle;

// Re-export commonly used types
pub use lifecycle::{
    IssuanceService, IssuedSession, JwtTokenCodec, LoggedOut, RevocationService,
    RotationService, SessionsTerminated, TokenCodec, TokenStatus, TokenValidator,
};
