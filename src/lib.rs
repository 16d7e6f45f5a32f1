//! Loom4 development server
//!
//! Serves the working directory over HTTP/1.1 with permissive CORS headers
//! and no caching, for local front-end development.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
