//! Session: a live handle to one browser page bound to one base URL.
//!
//! The session is the interaction layer's only dependency. It exposes script
//! evaluation, element counting, navigation, and page-state queries, and is
//! exclusively owned by one orchestrator for the lifetime of a scenario run.

mod factory;

pub use factory::{BrowserKind, SessionFactory};

use crate::{
    HarnessError, Result,
    js_templates,
    locator::Locator,
    timeouts::{ms, secs},
};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, MouseButton,
};
use chromiumoxide::cdp::browser_protocol::page::ReloadParams;
use chromiumoxide::{Browser, Page};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub struct Session {
    browser: Browser,
    page: Arc<Page>,
    handler_task: JoinHandle<()>,
    // Held until destroy so the throwaway profile outlives the browser process.
    _profile_dir: TempDir,
}

impl Session {
    pub(crate) fn new(
        browser: Browser,
        page: Arc<Page>,
        handler_task: JoinHandle<()>,
        profile_dir: TempDir,
    ) -> Self {
        Self {
            browser,
            page,
            handler_task,
            _profile_dir: profile_dir,
        }
    }

    /// Evaluates a script in the page, mapping an undefined result to null.
    pub async fn evaluate(&self, script: impl Into<String>) -> Result<Value> {
        let result = self
            .page
            .evaluate(script.into())
            .await
            .map_err(|e| HarnessError::EvaluationError(e.to_string()))?;

        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    /// Number of elements currently matching the locator. Recomputed on
    /// every call; the DOM may change between queries.
    pub async fn count(&self, locator: &Locator) -> Result<u64> {
        let value = self.evaluate(locator.count_expression()).await?;
        value.as_u64().ok_or_else(|| {
            HarnessError::EvaluationError(format!("Non-numeric count for {}", locator))
        })
    }

    pub async fn ready_state(&self) -> Result<String> {
        let value = self.evaluate(js_templates::READY_STATE).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub async fn title(&self) -> Result<String> {
        let value = self.evaluate(js_templates::PAGE_TITLE).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Reloads the current page and blocks until the document is ready again.
    pub async fn refresh(&self) -> Result<()> {
        tracing::debug!("Refreshing page");

        self.page
            .execute(ReloadParams::builder().build())
            .await
            .map_err(|e| HarnessError::EvaluationError(format!("Reload failed: {}", e)))?;

        self.wait_for_ready(Duration::from_secs(secs::NAVIGATION))
            .await
    }

    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.evaluate(js_templates::SCROLL_TO_BOTTOM).await?;
        tokio::time::sleep(Duration::from_millis(ms::VIEWPORT_SETTLE)).await;
        Ok(())
    }

    /// Dispatches a raw double-click gesture at viewport coordinates.
    pub async fn double_click_at(&self, x: f64, y: f64) -> Result<()> {
        for click_count in 1..=2i64 {
            for event_type in [
                DispatchMouseEventType::MousePressed,
                DispatchMouseEventType::MouseReleased,
            ] {
                let params = DispatchMouseEventParams::builder()
                    .r#type(event_type)
                    .x(x)
                    .y(y)
                    .button(MouseButton::Left)
                    .click_count(click_count)
                    .build()
                    .map_err(|e| {
                        HarnessError::EvaluationError(format!(
                            "Failed to build mouse event: {}",
                            e
                        ))
                    })?;

                self.page
                    .execute(params)
                    .await
                    .map_err(|e| HarnessError::EvaluationError(format!("Mouse dispatch failed: {}", e)))?;
            }

            tokio::time::sleep(Duration::from_millis(ms::DOUBLE_CLICK_GAP)).await;
        }

        Ok(())
    }

    /// Polls document.readyState until it reports "complete".
    pub async fn wait_for_ready(&self, timeout: Duration) -> Result<()> {
        let session = self;
        let satisfied = crate::wait::await_condition(
            move || async move {
                matches!(session.ready_state().await.as_deref(), Ok("complete"))
            },
            timeout,
            Duration::from_millis(ms::POLL_INTERVAL),
        )
        .await;

        if satisfied {
            // Let late layout shifts settle before the caller queries geometry.
            tokio::time::sleep(Duration::from_millis(ms::PAGE_LOAD_SETTLE)).await;
            Ok(())
        } else {
            Err(HarnessError::NavigationTimeout(timeout.as_secs()))
        }
    }

    /// Releases the browser process. Must be called on every exit path.
    pub async fn destroy(mut self) -> Result<()> {
        tracing::info!("Destroying browser session");

        if let Err(e) = self.browser.close().await {
            tracing::warn!("Browser close reported an error: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();

        Ok(())
    }
}
