//! Cookie transport for the `access` and `refresh` tokens.
//!
//! The core describes cookies as immutable [`CookieDirective`] values; this
//! module reads incoming cookies and turns directives into `Set-Cookie`
//! headers.

use actix_web::cookie::{time::Duration, Cookie};
use actix_web::dev::ServiceRequest;
use actix_web::{HttpRequest, HttpResponseBuilder};

use dc_core::domain::value_objects::cookie::{
    build_clear_directive, build_set_directive, CookieDirective,
};

/// Request types that expose their cookies by name
pub trait CookieSource {
    fn cookie(&self, name: &str) -> Option<Cookie<'static>>;
}

impl CookieSource for HttpRequest {
    fn cookie(&self, name: &str) -> Option<Cookie<'static>> {
        HttpRequest::cookie(self, name)
    }
}

impl CookieSource for ServiceRequest {
    fn cookie(&self, name: &str) -> Option<Cookie<'static>> {
        ServiceRequest::cookie(self, name)
    }
}

/// Reads and writes authentication cookies
pub struct CookieTransport;

impl CookieTransport {
    /// Value of cookie `name`, if the request carries a non-empty one
    pub fn extract<R: CookieSource>(req: &R, name: &str) -> Option<String> {
        req.cookie(name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Directive that sets `name` to `value` for `ttl_seconds`, path `/`
    pub fn build_set_directive(
        name: &str,
        value: &str,
        ttl_seconds: i64,
        http_only: bool,
    ) -> CookieDirective {
        build_set_directive(name, value, ttl_seconds, http_only)
    }

    /// Directive that removes `name` from the client
    pub fn build_clear_directive(name: &str) -> CookieDirective {
        build_clear_directive(name)
    }

    /// Framework cookie for one directive
    pub fn to_cookie(directive: &CookieDirective) -> Cookie<'static> {
        Cookie::build(directive.name.clone(), directive.value.clone())
            .path(directive.path.clone())
            .http_only(directive.http_only)
            .max_age(Duration::seconds(directive.max_age_seconds))
            .finish()
    }

    /// Emits every directive on `builder`, in order
    pub fn apply(builder: &mut HttpResponseBuilder, directives: &[CookieDirective]) {
        for directive in directives {
            builder.cookie(Self::to_cookie(directive));
        }
    }
}
