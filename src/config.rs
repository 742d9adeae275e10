//! CLI configuration profiles.
//!
//! `~/.barrierctl/config.toml` (or `config.<profile>.toml`) supplies defaults
//! for anything not passed on the command line or via environment.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub tenant_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, Error> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
        } else {
            Ok(Self::default())
        }
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, Error> {
        let home =
            dirs::home_dir().ok_or_else(|| Error::Config("cannot find home directory".into()))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".barrierctl").join(filename))
    }
}
