use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Service settings, from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "logscope", version, about = "Browse and parse nginx access logs over HTTP")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Extra line format as JSON: {"pattern": "...", "fields": [...]}
    #[arg(long = "log-format", env = "NGINX_LOG_FORMAT")]
    pub log_format: Option<String>,

    #[arg(long, env = "ACCESS_LOG_PATH", default_value = "/var/log/nginx/access.log")]
    pub access_log: PathBuf,

    #[arg(long, env = "ERROR_LOG_PATH", default_value = "/var/log/nginx/error.log")]
    pub error_log: PathBuf,

    /// Directory served for everything outside /api
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Largest log file accepted, in bytes
    #[arg(long, env = "MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Log files offered by the listing endpoint.
    pub fn known_logs(&self) -> Vec<PathBuf> {
        vec![self.access_log.clone(), self.error_log.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override() {
        let config = Config::try_parse_from([
            "logscope",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--access-log",
            "/tmp/a.log",
            "--error-log",
            "/tmp/e.log",
            "--log-format",
            r#"{"pattern": "(\\S+)", "fields": ["ip"]}"#,
            "--max-file-size",
            "1024",
        ])
        .unwrap();

        assert_eq!(config.addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(config.known_logs(), [PathBuf::from("/tmp/a.log"), PathBuf::from("/tmp/e.log")]);
        assert!(config.log_format.unwrap().contains("pattern"));
        assert_eq!(config.max_file_size, 1024);
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Config::try_parse_from(["logscope", "--port", "http"]).is_err());
    }
}
