//! Server configuration from the environment.
//!
//! Data file paths are validated up front so a misconfigured deployment
//! fails before the first request, with every missing path in one error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more configured data files do not exist.
    #[error("missing data files: {0}")]
    MissingFiles(String),
}

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Path to the sentiment lexicon CSV.
    pub lexicon_path: PathBuf,
    /// Path to the region geometry JSON.
    pub regions_path: PathBuf,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// `BIND_ADDR` defaults to `127.0.0.1`, `PORT` to `8080`,
    /// `LEXICON_PATH` to `data/sentiments.csv`, and `REGIONS_PATH` to
    /// `data/states.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFiles`] listing every configured
    /// data file that does not exist.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let lexicon_path = PathBuf::from(
            std::env::var("LEXICON_PATH").unwrap_or_else(|_| "data/sentiments.csv".to_string()),
        );
        let regions_path = PathBuf::from(
            std::env::var("REGIONS_PATH").unwrap_or_else(|_| "data/states.json".to_string()),
        );

        let missing: Vec<String> = [&lexicon_path, &regions_path]
            .into_iter()
            .filter(|path| !path.exists())
            .map(|path| path.display().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingFiles(missing.join(", ")));
        }

        Ok(Self {
            bind_addr,
            port,
            lexicon_path,
            regions_path,
        })
    }
}
