//! Server configuration types for chatline.
//!
//! `ServerConfig` is the shape of the optional `config.toml`. Every field has a
//! default, so an empty file (or no file at all) yields a runnable server.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Which stub the reply generator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// Keyword-matched canned answers.
    #[default]
    Canned,
    /// "Echo: {content}".
    Echo,
}

impl fmt::Display for ReplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyMode::Canned => write!(f, "canned"),
            ReplyMode::Echo => write!(f, "echo"),
        }
    }
}

impl FromStr for ReplyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "canned" => Ok(ReplyMode::Canned),
            "echo" => Ok(ReplyMode::Echo),
            other => Err(format!("invalid reply mode: '{other}'")),
        }
    }
}

/// Top-level configuration for the chatline server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// sqlx connection string for the SQLite database.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Origins allowed to make cross-origin requests. `"*"` allows any.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default)]
    pub reply_mode: ReplyMode,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "sqlite://chatline.db?mode=rwc".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            cors_origins: default_cors_origins(),
            reply_mode: ReplyMode::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when the allow-list contains the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o.trim() == "*")
    }
}
