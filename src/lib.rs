//! vidshelf - self-hosted video library
//!
//! This library crate exposes the catalog builder, lookup service and HTTP
//! server for the binary and for integration testing.

pub mod config;
pub mod library;
pub mod metadata;
pub mod scanner;
pub mod server;
pub mod streaming;
