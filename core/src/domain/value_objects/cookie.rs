//! Cookie directives emitted by the token lifecycle.
//!
//! The core never touches HTTP types. Services describe the cookies a response
//! must carry as immutable [`CookieDirective`] values and the HTTP boundary
//! applies them in order.

use serde::{Deserialize, Serialize};

/// Bearer access token cookie
pub const ACCESS_COOKIE: &str = "access";

/// Bearer refresh token cookie
pub const REFRESH_COOKIE: &str = "refresh";

/// Servlet-era session cookie, only ever cleared
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Convenience cookie holding the signed-in user id, only ever cleared
pub const USER_ID_COOKIE: &str = "userId";

/// Max-age of the `access` and `refresh` cookies (7 days)
pub const AUTH_COOKIE_MAX_AGE_SECONDS: i64 = 7 * 24 * 60 * 60;

/// "Set this cookie" instruction for the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieDirective {
    pub name: String,
    pub value: String,
    pub max_age_seconds: i64,
    pub http_only: bool,
    pub path: String,
}

impl CookieDirective {
    /// True when the directive tells the client to drop the cookie
    pub fn is_removal(&self) -> bool {
        self.max_age_seconds == 0
    }
}

/// Builds a directive that stores `value` under `name` for `ttl_seconds`
pub fn build_set_directive(
    name: &str,
    value: impl Into<String>,
    ttl_seconds: i64,
    http_only: bool,
) -> CookieDirective {
    CookieDirective {
        name: name.to_string(),
        value: value.into(),
        max_age_seconds: ttl_seconds,
        http_only,
        path: "/".to_string(),
    }
}

/// Builds a directive that expires `name` immediately
pub fn build_clear_directive(name: &str) -> CookieDirective {
    CookieDirective {
        name: name.to_string(),
        value: String::new(),
        max_age_seconds: 0,
        http_only: false,
        path: "/".to_string(),
    }
}
