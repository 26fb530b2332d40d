use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::db::config::DbConfig;

const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:8080", "http://localhost:5173"];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub seed_on_startup: bool,
    pub db: DbConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = std::env::var("CORS_ORIGINS")
            .ok()
            .map(|raw| parse_origins(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect());

        let seed_on_startup = std::env::var("SEED_ON_STARTUP")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            host,
            port,
            log_level,
            cors_origins,
            seed_on_startup,
            db: DbConfig::from_env(),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_trims_and_skips_empty_entries() {
        let origins = parse_origins(" http://a.test/ ,,http://b.test:5173 ");
        assert_eq!(origins, vec!["http://a.test", "http://b.test:5173"]);
    }

    #[test]
    fn parse_origins_of_blank_string_is_empty() {
        assert!(parse_origins("  ").is_empty());
    }
}
