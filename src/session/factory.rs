//! Session provisioning: launch a browser, navigate to the start URL, and
//! hand back a ready [`Session`].
//!
//! Sessions start maximized on a throwaway profile, so no cookies or cached
//! state from earlier runs leak into a verification.

use super::Session;
use crate::{HarnessError, Result, config, timeouts::secs, utils};
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Edge,
}

impl std::str::FromStr for BrowserKind {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chrome" | "chromium" => Ok(Self::Chrome),
            "firefox" => Ok(Self::Firefox),
            "edge" | "msedge" => Ok(Self::Edge),
            other => Err(HarnessError::UnsupportedBrowser(other.to_string())),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Edge => "edge",
        };
        write!(f, "{}", name)
    }
}

pub struct SessionFactory;

impl SessionFactory {
    /// Launches `kind`, navigates to `start_url`, and waits for the document
    /// to be ready before returning.
    pub async fn create(
        kind: BrowserKind,
        start_url: &str,
        options: &config::BrowserConfig,
    ) -> Result<Session> {
        url::Url::parse(start_url).map_err(|_| HarnessError::InvalidUrl(start_url.to_string()))?;

        let binary = match options.binary_path {
            Some(ref path) => path.clone(),
            None => utils::find_browser_executable(kind)?,
        };

        tracing::info!(
            "Launching {} ({}) for {}",
            kind,
            binary.display(),
            start_url
        );

        let profile_dir = TempDir::new()?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(&binary)
            .user_data_dir(profile_dir.path())
            .request_timeout(Duration::from_secs(secs::REQUEST))
            .args(vec![
                "--start-maximized",
                "--window-size=1920,1080",
                "--no-first-run",
                "--no-default-browser-check",
            ]);

        if !options.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(HarnessError::LaunchFailed)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| HarnessError::LaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let page = browser
            .new_page(start_url)
            .await
            .map_err(|e| HarnessError::LaunchFailed(format!("Failed to open page: {}", e)))?;

        let session = Session::new(browser, Arc::new(page), handler_task, profile_dir);

        session
            .wait_for_ready(Duration::from_secs(secs::NAVIGATION))
            .await?;

        Ok(session)
    }

    pub async fn destroy(session: Session) -> Result<()> {
        session.destroy().await
    }
}
