//! Domain entities representing the token lifecycle.

pub mod refresh_record;
pub mod token;


pub use refresh_record::{expiration_display, RefreshTokenRecord};
pub use token::{
    Claims, TokenCategory, TokenPair, ACCESS_TOKEN_TTL_MS, REFRESH_TOKEN_TTL_MS,
};
