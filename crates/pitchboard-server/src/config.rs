use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server settings, read from `PITCHBOARD_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Insert sample ideas into an empty database on startup.
    pub seed_sample: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("PITCHBOARD_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("PITCHBOARD_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("PITCHBOARD_PORT must be a port number")?;
        let db_path: PathBuf = lookup("PITCHBOARD_DB_PATH")
            .unwrap_or_else(|| "pitchboard.db".into())
            .into();
        let seed_sample = match lookup("PITCHBOARD_SEED_SAMPLE") {
            Some(v) => parse_flag(&v)
                .with_context(|| format!("PITCHBOARD_SEED_SAMPLE: unrecognised value '{}'", v))?,
            None => true,
        };

        Ok(Self {
            host,
            port,
            db_path,
            seed_sample,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
