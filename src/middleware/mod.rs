//! Middleware applied around the whole router.

pub mod security_headers;
