//! Moving tokens between HTTP requests/responses and the core

pub mod cookies;

pub use cookies::CookieTransport;
