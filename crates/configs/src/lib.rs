use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
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
        Self { host: default_host(), port: DEFAULT_PORT, worker_threads: None }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }

/// Load the configuration file named by `CONFIG_PATH`, or `config.toml`.
///
/// The file is required: a missing or unreadable file is an error.
pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path(std::env::var("CONFIG_PATH").ok()))
}

/// `CONFIG_PATH` when set and non-blank, `config.toml` otherwise.
pub fn config_path(explicit: Option<String>) -> String {
    explicit
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("cannot read config file {path}"))?;
    parse(&content).with_context(|| format!("invalid config file {path}"))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File config, then `HOST` / `PORT` / `TOKIO_WORKER_THREADS` overrides, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.server.apply_overrides(
            std::env::var("HOST").ok(),
            std::env::var("PORT").ok(),
            std::env::var("TOKIO_WORKER_THREADS").ok(),
        )?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()
    }
}

impl ServerConfig {
    /// Apply raw environment values. Empty values count as unset.
    pub fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<String>,
        worker_threads: Option<String>,
    ) -> Result<()> {
        if let Some(h) = host.filter(|h| !h.trim().is_empty()) {
            self.host = h;
        }
        if let Some(p) = port.filter(|p| !p.trim().is_empty()) {
            self.port = p
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("PORT must be a number in 1..=65535, got {p:?}: {e}"))?;
        }
        if let Some(w) = worker_threads.filter(|w| !w.trim().is_empty()) {
            let w = w
                .trim()
                .parse::<usize>()
                .map_err(|e| anyhow!("TOKIO_WORKER_THREADS must be a positive number, got {w:?}: {e}"))?;
            self.worker_threads = Some(w);
        }
        Ok(())
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
