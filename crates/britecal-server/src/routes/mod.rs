//! HTTP routes.

pub mod export;
pub mod oauth;
