use std::{net::SocketAddr, path::PathBuf};

use serde::Deserialize;

use crate::health::HealthConfig;

/// Upload ceiling for `/api` bodies (32 MiB)
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 32 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Directory holding `index.html` and the page's assets
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Maximum accepted request body, uploads included
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            static_dir: default_static_dir(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            health: HealthConfig::default(),
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

#[allow(clippy::missing_const_for_fn)]
fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT_BYTES
}
