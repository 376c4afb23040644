//! Value objects for the domain layer.

pub mod cookie;

pub use cookie::{
    build_clear_directive, build_set_directive, CookieDirective, ACCESS_COOKIE,
    AUTH_COOKIE_MAX_AGE_SECONDS, REFRESH_COOKIE, SESSION_COOKIE, USER_ID_COOKIE,
};
