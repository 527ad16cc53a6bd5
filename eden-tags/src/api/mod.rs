//! HTTP API handlers for eden-tags

pub mod health;
pub mod tags;

pub use health::health_routes;
pub use tags::{method_not_allowed, tag_routes, unknown_endpoint};
