//! Parser configuration
//! Loaded from JSON by the WASM bridge, defaults match the plain page script.

use serde::{Deserialize, Serialize};

use crate::errors::{ParamsError, ParamsResult};

pub const DEFAULT_GLOBAL_NAME: &str = "parameters";

/// What to do when a key or value contains a malformed escape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecodeErrorPolicy {
    /// Stop at the failing pair; earlier pairs stay in the store
    #[default]
    Abort,
    /// Log the failing pair and keep going
    SkipPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfig {
    /// Global property the store is published under
    pub global_name: String,
    pub decode_errors: DecodeErrorPolicy,
    pub log_level: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            global_name: DEFAULT_GLOBAL_NAME.to_string(),
            decode_errors: DecodeErrorPolicy::Abort,
            log_level: "info".to_string(),
        }
    }
}

impl ParserConfig {
    /// Parse and validate a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ParamsResult<Self> {
        let config: ParserConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> ParamsResult<()> {
        if self.global_name.trim().is_empty() {
            return Err(ParamsError::InvalidConfig {
                message: "globalName must not be empty".to_string(),
            });
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> ParamsResult<log::LevelFilter> {
        self.log_level
            .parse::<log::LevelFilter>()
            .map_err(|_| ParamsError::InvalidConfig {
                message: format!("Unknown log level: {}", self.log_level),
            })
    }
}
