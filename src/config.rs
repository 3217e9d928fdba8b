//! Startup configuration, loaded once from a JSON file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_SITE_COMMAND, TITLE_PLACEHOLDER};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Telegram bot token. An absent key yields an empty string; the
    /// startup auth check rejects it with a clearer error than we could
    /// produce here.
    pub bot_api_key: String,
    /// Directory article artifacts are written to.
    pub output_dir: String,
    /// Shell command run per posted article, with `{title}` substituted.
    pub site_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_api_key: String::new(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            site_command: DEFAULT_SITE_COMMAND.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(Error::ConfigParse)
    }

    /// Validates the injectable settings. Run once at startup.
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.trim().is_empty() {
            return Err(Error::ConfigInvalid("outputDir must not be empty".into()));
        }
        if !self.site_command.contains(TITLE_PLACEHOLDER) {
            return Err(Error::ConfigInvalid(format!(
                "siteCommand must contain the {TITLE_PLACEHOLDER} placeholder"
            )));
        }
        Ok(())
    }
}
