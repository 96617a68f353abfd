use std::collections::HashSet;
use std::path::Path;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(DEFAULT_WORKER_THREADS),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Records placed in the store at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_seed")]
    pub seed: Vec<SeedRecord>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed: default_seed() }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SeedRecord {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    /// `compact` or `json`
    #[serde(default)]
    pub format: String,
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_max_body_bytes() -> usize { 1024 * 1024 }

fn default_seed() -> Vec<SeedRecord> {
    vec![
        SeedRecord { name: "test".into(), amount: 1000 },
        SeedRecord { name: "test2".into(), amount: 2000 },
    ]
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if it exists, environment otherwise.
    /// A file that exists but is broken is an error, not a silent fallback.
    pub fn resolve() -> Result<Self> {
        if Path::new(&config_path()).exists() {
            Self::load_and_validate()
        } else {
            Self::from_env()
        }
    }

    /// Build from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `LOG_FORMAT`.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            cfg.server.port = port
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT {port:?} is not a valid port: {e}"))?;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            cfg.log.format = format;
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("server.max_body_bytes must be >= 1"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rec in &self.seed {
            if rec.name.trim().is_empty() {
                return Err(anyhow!("store.seed entries need a non-empty name"));
            }
            if !seen.insert(rec.name.as_str()) {
                return Err(anyhow!("store.seed has duplicate name {:?}", rec.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gets_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.store.seed.len(), 2);
        assert_eq!(cfg.store.seed[0], SeedRecord { name: "test".into(), amount: 1000 });
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn full_file_parses() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            worker_threads = 0
            max_body_bytes = 64

            [store]
            seed = [{ name = "merit", amount = 500 }]

            [log]
            format = "json"
        "#;
        let mut cfg = parse(toml).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.max_body_bytes, 64);
        assert_eq!(cfg.store.seed, vec![SeedRecord { name: "merit".into(), amount: 500 }]);
        assert_eq!(cfg.log.format, "json");
    }

    #[test]
    fn empty_seed_is_allowed() {
        let mut cfg = parse("[store]\nseed = []\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert!(cfg.store.seed.is_empty());
    }

    #[test]
    fn rejects_zero_port() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_bad_seed() {
        let mut dup = parse(
            "[store]\nseed = [{ name = \"a\", amount = 1 }, { name = \"a\", amount = 2 }]\n",
        )
        .unwrap();
        assert!(dup.normalize_and_validate().is_err());

        let mut blank = parse("[store]\nseed = [{ name = \" \", amount = 1 }]\n").unwrap();
        assert!(blank.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_host_normalizes() {
        let mut cfg = parse("[server]\nhost = \"\"\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
    }
}
