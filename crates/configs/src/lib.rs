use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Load the starter products at startup.
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self { Self { seed: default_seed() } }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_seed() -> bool { true }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
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

    /// Config file first; when it cannot be read, fall back to environment variables.
    pub fn load_or_env() -> Result<Self> {
        match Self::load_and_validate() {
            Ok(cfg) => Ok(cfg),
            Err(e) if is_missing_file(&e) => {
                let mut cfg = Self::from_env();
                cfg.normalize_and_validate()?;
                Ok(cfg)
            }
            Err(e) => Err(e),
        }
    }

    /// Build from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS` and `CATALOG_SEED`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let server = ServerConfig {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.server.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(defaults.server.port),
            worker_threads: std::env::var("TOKIO_WORKER_THREADS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .or(defaults.server.worker_threads),
        };
        let catalog = CatalogConfig {
            seed: std::env::var("CATALOG_SEED")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.catalog.seed),
        };
        Self { server, catalog }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        // 0 或未配置时使用默认线程数
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
