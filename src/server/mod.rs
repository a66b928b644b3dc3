//! Server module for building the HTTP server
//!
//! The `ServerBuilder` registers the CRUD routes of every resource,
//! health routes, a JSON 404 fallback and request tracing.

pub mod builder;

pub use builder::ServerBuilder;
