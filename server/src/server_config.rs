use std::io::ErrorKind;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub games_file: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            games_file: None,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.listen_addr
            .parse::<SocketAddr>()
            .map(|_| ())
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_addr, e))
    }

    pub fn override_port(&mut self, port: u16) -> Result<(), String> {
        let mut addr: SocketAddr = self
            .listen_addr
            .parse()
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_addr, e))?;
        addr.set_port(port);
        self.listen_addr = addr.to_string();
        Ok(())
    }
}

/// Missing config file means defaults; a present but malformed file is a
/// startup error.
pub fn load_server_config(file_path: &str) -> Result<ServerConfig, String> {
    let content = match std::fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(err) => {
            return match err.kind() {
                ErrorKind::NotFound => Ok(ServerConfig::default()),
                _ => Err(format!("Failed to read config file: {}", err)),
            };
        }
    };

    let config: ServerConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("Failed to parse config file: {}", e))?;

    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;

    Ok(config)
}
