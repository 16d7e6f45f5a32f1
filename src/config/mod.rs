// Configuration module entry point
// Assembles the server configuration and the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, ServerConfig};

/// Port used when none is given on the command line
pub const DEFAULT_PORT: u16 = 8080;

impl Config {
    /// Build configuration from defaults, overriding the port when one was given
    ///
    /// The document root is not part of the configuration: it is always the
    /// working directory at startup.
    pub fn load(port: Option<u16>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_override_option("server.port", port.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
