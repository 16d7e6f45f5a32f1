//! Error types
//!
//! `ServeError` covers everything that can go wrong while answering a single
//! request; it never escapes the handler. `StartupError` covers the process
//! level failures reported by `main` before any request is served.

use std::fmt;
use std::net::SocketAddr;

use hyper::StatusCode;

/// Per-request failure
#[derive(Debug)]
pub enum ServeError {
    /// Request path tried to leave the document root
    TraversalRejected,
    /// Path is missing or names a directory
    NotFound,
    /// File passed the existence check but could not be read
    Io(std::io::Error),
}

impl ServeError {
    /// HTTP status the error is answered with
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::TraversalRejected => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TraversalRejected => write!(f, "Forbidden: Directory traversal not allowed"),
            Self::NotFound => write!(f, "Not Found"),
            Self::Io(e) => write!(f, "Internal Server Error: {e}"),
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ServeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Failure before the accept loop starts
#[derive(Debug)]
pub enum StartupError {
    /// Requested port is held by another socket
    AddrInUse { port: u16 },
    /// Any other bind failure
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    /// Configuration could not be assembled
    Config(config::ConfigError),
    /// Configured host and port do not form a socket address
    Addr(String),
    /// Runtime or working directory setup failed
    Runtime(std::io::Error),
}

impl StartupError {
    /// Classify a bind error, singling out "address already in use"
    pub fn from_bind(addr: SocketAddr, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::AddrInUse {
            Self::AddrInUse { port: addr.port() }
        } else {
            Self::Bind { addr, source }
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddrInUse { port } => write!(f, "Port {port} is already in use"),
            Self::Bind { addr, source } => write!(f, "Failed to bind {addr}: {source}"),
            Self::Config(e) => write!(f, "Invalid configuration: {e}"),
            Self::Addr(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AddrInUse { .. } | Self::Addr(_) => None,
            Self::Bind { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for StartupError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for StartupError {
    fn from(e: std::io::Error) -> Self {
        Self::Runtime(e)
    }
}
