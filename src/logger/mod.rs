//! Logger module
//!
//! Console logging for the dev server:
//! - Startup banner and shutdown notice
//! - One access log line per request
//! - Error and warning logging

mod format;

pub use format::{version_str, AccessLogEntry};

use std::path::Path;

/// Write to info/access log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(document_root: &Path, port: u16) {
    write_info("Starting Loom4 Development Server...");
    write_info(&format!("Document Root: {}", document_root.display()));
    write_info(&format!("Server URL: http://localhost:{port}"));
    write_info(&format!(
        "Main Application: http://localhost:{port}/index.html"
    ));
    write_info("Press Ctrl+C to stop the server\n");
}

pub fn log_server_started(port: u16) {
    write_info(&format!("Server started successfully on port {port}"));
}

pub fn log_shutdown() {
    write_info("\nShutting down server...");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log a file that existed but could not be read
pub fn log_serve_failed(path: &str, err: &impl std::fmt::Display) {
    log_error(&format!("Error serving {path}: {err}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format());
}

/// Tell the operator the port is taken and which one to try next
pub fn log_port_in_use(port: u16) {
    write_error(&format!(
        "Error: Port {port} is already in use. Try a different port:"
    ));
    if let Some(next) = port.checked_add(1) {
        write_error(&format!("loom-devserver {next}"));
    }
}

pub fn log_startup_error(err: &impl std::fmt::Display) {
    write_error(&format!("Error starting server: {err}"));
}
