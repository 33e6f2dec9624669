//! Command-line and environment configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

/// Largest request body accepted by default (10 MiB)
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// LDES server simulator
///
/// Serves fragments of a paginated event stream under its own origin, with
/// aliases, request statistics and cache-control policies.
#[derive(Parser, Debug, Clone)]
#[command(name = "ldesim")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Host to bind to
    #[arg(long, env = "LDESIM_HOST", default_value = "localhost")]
    pub host: String,

    /// Port to bind to
    #[arg(long, env = "LDESIM_PORT", default_value_t = 80)]
    pub port: u16,

    /// Origin stored fragments are moved onto (defaults to http://<host>:<port>)
    #[arg(long, env = "LDESIM_BASE_URL")]
    pub base_url: Option<Url>,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "LDESIM_MAX_BODY_SIZE", default_value_t = DEFAULT_MAX_BODY_SIZE)]
    pub max_body_size: usize,

    /// Directory of fragment files to load at startup
    #[arg(long, env = "LDESIM_SEED")]
    pub seed: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, env = "LDESIM_SILENT")]
    pub silent: bool,

    /// Timeout for fetching remote JSON-LD contexts, in seconds
    #[arg(long, env = "LDESIM_CONTEXT_TIMEOUT_SECS", default_value_t = 5)]
    pub context_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "LDESIM_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    /// The origin fragments are rewritten onto
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(&format!("http://{}:{}", self.host, self.port)),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.silent {
            "warn"
        } else {
            "ldesim=info,tower_http=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("ldesim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!(config.bind_address(), "localhost:80");
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost/");
        assert_eq!(config.max_body_size, DEFAULT_MAX_BODY_SIZE);
        assert_eq!(config.context_timeout_secs, 5);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.log_filter(), "ldesim=info,tower_http=info");
    }

    #[test]
    fn test_base_url_follows_host_and_port() {
        let config = parse(&["--host", "0.0.0.0", "--port", "9000"]);

        assert_eq!(config.base_url().unwrap().as_str(), "http://0.0.0.0:9000/");
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = parse(&["--port", "9000", "--base-url", "https://ldes.example.org"]);

        assert_eq!(config.base_url().unwrap().as_str(), "https://ldes.example.org/");
        assert_eq!(config.bind_address(), "localhost:9000");
    }

    #[test]
    fn test_silent_and_json_logging() {
        let config = parse(&["--silent", "--log-format", "json", "--seed", "./data"]);

        assert!(config.silent);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_filter(), "warn");
        assert_eq!(config.seed, Some(PathBuf::from("./data")));
    }
}
