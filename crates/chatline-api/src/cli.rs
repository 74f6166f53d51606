//! CLI definitions for the `chatline` binary.
//!
//! Uses clap derive macros for argument parsing. Every `serve` flag can also
//! come from the environment, and anything left unset falls back to the
//! config file and then to built-in defaults.

use std::path::PathBuf;

use chatline_infra::config::parse_origin_list;
use chatline_types::config::{ReplyMode, ServerConfig};
use clap::{Args, Parser, Subcommand};

/// Chat backend with REST history and a WebSocket reply channel.
#[derive(Parser)]
#[command(name = "chatline", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP and WebSocket server.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to a TOML config file.
    #[arg(long, env = "CHATLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind.
    #[arg(long, env = "CHATLINE_HOST")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "CHATLINE_PORT")]
    pub port: Option<u16>,

    /// sqlx SQLite connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Comma-separated allowed CORS origins ("*" for any).
    #[arg(long, env = "CHATLINE_CORS_ORIGINS")]
    pub cors_origins: Option<String>,

    /// Reply stub used by the WebSocket gateway (canned or echo).
    #[arg(long, env = "CHATLINE_REPLY_MODE")]
    pub reply_mode: Option<ReplyMode>,
}

impl ServeArgs {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database_url) = self.database_url {
            config.database_url = database_url;
        }
        if let Some(origins) = self.cors_origins {
            config.cors_origins = parse_origin_list(&origins);
        }
        if let Some(mode) = self.reply_mode {
            config.reply_mode = mode;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_serve_flags() {
        let cli = Cli::try_parse_from([
            "chatline",
            "-v",
            "serve",
            "--port",
            "9000",
            "--reply-mode",
            "echo",
            "--cors-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);

        let Commands::Serve(args) = cli.command;
        let config = args.apply(ServerConfig::default());
        assert_eq!(config.port, 9000);
        assert_eq!(config.reply_mode, ReplyMode::Echo);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_apply_without_flags_keeps_config() {
        let base = ServerConfig {
            port: 7000,
            ..ServerConfig::default()
        };
        let config = ServeArgs::default().apply(base);
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn test_rejects_unknown_reply_mode() {
        assert!(Cli::try_parse_from(["chatline", "serve", "--reply-mode", "gpt"]).is_err());
    }
}
