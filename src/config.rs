use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ROOMS: [&str; 5] = ["Mathematics", "Physics", "Chemistry", "Biology", "Computer Science"];
pub const DEFAULT_KEEPALIVE_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub rooms: Vec<String>,
    pub keepalive_interval: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `WAITBOARD_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("WAITBOARD_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .with_context(|| format!("Invalid WAITBOARD_ADDR: {addr}"))?;

        let rooms = match lookup("WAITBOARD_ROOMS") {
            Some(raw) => parse_rooms(&raw),
            None => DEFAULT_ROOMS.iter().map(|r| r.to_string()).collect(),
        };
        if rooms.is_empty() {
            bail!("WAITBOARD_ROOMS must name at least one room");
        }

        let keepalive_secs = match lookup("WAITBOARD_KEEPALIVE_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid WAITBOARD_KEEPALIVE_SECS: {raw}"))?,
            None => DEFAULT_KEEPALIVE_SECS,
        };
        if keepalive_secs == 0 {
            bail!("WAITBOARD_KEEPALIVE_SECS must be greater than zero");
        }

        let log_format = match lookup("WAITBOARD_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("Unknown WAITBOARD_LOG_FORMAT: {other}"),
        };

        Ok(Self {
            addr,
            rooms,
            keepalive_interval: Duration::from_secs(keepalive_secs),
            log_format,
        })
    }
}

fn parse_rooms(raw: &str) -> Vec<String> {
    let mut rooms: Vec<String> = Vec::new();
    for room in raw.split(',').map(str::trim).filter(|r| !r.is_empty()) {
        if !rooms.iter().any(|r| r == room) {
            rooms.push(room.to_string());
        }
    }
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.rooms, DEFAULT_ROOMS);
        assert_eq!(config.keepalive_interval, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_rooms_are_trimmed_and_deduplicated() {
        let config = load(&[("WAITBOARD_ROOMS", " Physics, ,Biology,Physics ")]).unwrap();
        assert_eq!(config.rooms, vec!["Physics", "Biology"]);
    }

    #[test]
    fn test_blank_room_list_rejected() {
        assert!(load(&[("WAITBOARD_ROOMS", " , ")]).is_err());
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(load(&[("WAITBOARD_ADDR", "not-an-addr")]).is_err());
        assert!(load(&[("WAITBOARD_KEEPALIVE_SECS", "0")]).is_err());
        assert!(load(&[("WAITBOARD_KEEPALIVE_SECS", "soon")]).is_err());
        assert!(load(&[("WAITBOARD_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("WAITBOARD_ADDR", "127.0.0.1:8080"),
            ("WAITBOARD_KEEPALIVE_SECS", "5"),
            ("WAITBOARD_LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.keepalive_interval, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
