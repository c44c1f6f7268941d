use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Browser connection lost")]
    ConnectionLost,

    #[error("Browser \"{0}\" not supported")]
    UnsupportedBrowser(String),

    #[error("Condition '{condition}' not met within {}s", .timeout.as_secs())]
    Timeout {
        condition: String,
        timeout: Duration,
    },

    #[error("Element not found: {locator}")]
    NotFound { locator: String },

    #[error("Navigation timeout after {0}s")]
    NavigationTimeout(u64),

    #[error("Recovery action failed: {0}")]
    RecoveryFailed(String),

    #[error("Verification '{condition}' exhausted after {attempts} recovery attempts")]
    VerificationFailed { condition: String, attempts: u32 },

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeError(#[from] toml::de::Error),
}

impl HarnessError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::LaunchFailed(_) => vec![
                "Ensure the requested browser is installed".into(),
                "Check if another instance is holding the debugging port".into(),
                "Try specifying the binary with [browser].binary_path".into(),
            ],
            Self::UnsupportedBrowser(kind) => vec![
                format!("'{}' is not a recognized browser kind", kind),
                "Supported kinds: chrome, firefox, edge".into(),
            ],
            Self::Timeout { timeout, .. } => vec![
                format!(
                    "Increase [wait].timeout_seconds beyond {}",
                    timeout.as_secs()
                ),
                "Check whether the page ever renders the element".into(),
            ],
            Self::NotFound { locator } => vec![
                "Verify the locator syntax is correct".into(),
                format!("Check if '{}' exists on the page", locator),
            ],
            Self::VerificationFailed { attempts, .. } => vec![
                format!("Condition stayed false across {} refresh cycles", attempts),
                "Increase [retry].max_attempts or inspect the page manually".into(),
            ],
            Self::ConfigError(_) | Self::TomlDeError(_) => vec![
                "Check the configuration file syntax".into(),
                "Run with --verbose to see the detailed error".into(),
            ],
            Self::InvalidUrl(_) => {
                vec!["Ensure the URL includes a protocol (http:// or https://)".into()]
            }
            Self::UnknownScenario(_) => vec![format!(
                "Valid scenarios: {}",
                crate::scenario::SCENARIOS.join(", ")
            )],
            _ => vec!["Run with --verbose for more details".into()],
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LaunchFailed(_) | Self::ConnectionLost => 3,
            Self::NavigationTimeout(_) | Self::Timeout { .. } => 4,
            Self::NotFound { .. } => 5,
            Self::VerificationFailed { .. } | Self::RecoveryFailed(_) => 6,
            Self::ConfigError(_) | Self::TomlDeError(_) | Self::UnsupportedBrowser(_) => 7,
            Self::InvalidUrl(_) | Self::UnknownScenario(_) => 2,
            _ => 1,
        }
    }
}
