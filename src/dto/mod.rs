//! Data transfer objects shared by routes, services and the HTTP client.

pub mod api;
