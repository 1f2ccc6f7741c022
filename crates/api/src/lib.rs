//! HTTP adapter: configuration, auth gate, form routes and view rendering.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
