use crate::{HarnessError, Result, locator::Locator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub wait: WaitSettings,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Flat string-keyed lookup for target URLs, read once at scenario setup.
    #[serde(default)]
    pub targets: HashMap<String, String>,
    /// Symbolic name -> "strategy:value" locator catalog. Data, not behavior.
    #[serde(default)]
    pub locators: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    #[serde(default = "default_browser_kind")]
    pub kind: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    pub binary_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            kind: default_browser_kind(),
            headless: default_headless(),
            binary_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WaitSettings {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_browser_kind() -> String {
    "chrome".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    crate::timeouts::secs::WAIT_TIMEOUT
}

fn default_poll_interval_ms() -> u64 {
    crate::timeouts::ms::POLL_INTERVAL
}

fn default_max_attempts() -> u32 {
    20
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.wait.timeout_seconds == 0 {
            return Err(HarnessError::ConfigError(
                "[wait].timeout_seconds must be greater than zero".into(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(HarnessError::ConfigError(
                "[retry].max_attempts must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Flat key lookup over the target URL table.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.targets.get(key).map(String::as_str)
    }

    pub fn target(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| HarnessError::ConfigError(format!("Missing [targets].{}", key)))
    }

    pub fn locator(&self, name: &str) -> Result<Locator> {
        self.locators
            .get(name)
            .ok_or_else(|| HarnessError::ConfigError(format!("Missing [locators].{}", name)))?
            .parse()
    }

    pub fn wait_config(&self) -> crate::wait::WaitConfig {
        crate::wait::WaitConfig::from_secs(self.wait.timeout_seconds).with_poll_interval(
            std::time::Duration::from_millis(self.wait.poll_interval_ms),
        )
    }
}
