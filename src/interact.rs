//! The interaction layer: every verb establishes its precondition through an
//! explicit wait before touching the element.
//!
//! Action verbs (click, type, double-click, text read) fail loudly with
//! [`HarnessError::Timeout`] or [`HarnessError::NotFound`] so callers know the
//! action did not happen. The probes `element_exists` and `is_displayed` are
//! non-throwing by contract: any failure underneath maps to `false`, which is
//! what lets the orchestrator use them as retry predicates.

use crate::{
    HarnessError, Result,
    js_templates,
    locator::Locator,
    session::Session,
    wait::{self, WaitConfig},
};

pub struct Interactor<'a> {
    session: &'a Session,
    wait: WaitConfig,
}

impl<'a> Interactor<'a> {
    pub fn new(session: &'a Session, wait: WaitConfig) -> Self {
        tracing::debug!(
            "Interaction layer ready, wait timeout {}s",
            wait.timeout.as_secs()
        );
        Self { session, wait }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    /// Waits for the element to be clickable, then clicks it once.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        tracing::info!("Clicking element: {}", locator);
        self.wait_for_clickable(locator).await?;

        let result = self
            .session
            .evaluate(js_templates::click_element(locator))
            .await?;

        self.require_found(&result, locator)?;
        tracing::info!("Clicked element: {}", locator);
        Ok(())
    }

    /// Waits for the element to be clickable, clears it, and inputs `text`
    /// verbatim. No trimming or escaping is applied to the text.
    pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
        tracing::info!("Entering text '{}' into element: {}", text, locator);
        self.wait_for_clickable(locator).await?;

        let result = self
            .session
            .evaluate(js_templates::clear_and_fill(locator, text))
            .await?;

        self.require_found(&result, locator)?;
        tracing::info!("Text entered into element: {}", locator);
        Ok(())
    }

    /// Waits for the element to be clickable, then dispatches a double-click
    /// gesture at its center via raw input events.
    pub async fn double_click(&self, locator: &Locator) -> Result<()> {
        tracing::info!("Double-clicking element: {}", locator);
        self.wait_for_clickable(locator).await?;

        let center = self
            .session
            .evaluate(js_templates::element_center(locator))
            .await?;

        self.require_found(&center, locator)?;

        let x = center.get("x").and_then(|v| v.as_f64()).unwrap_or_default();
        let y = center.get("y").and_then(|v| v.as_f64()).unwrap_or_default();

        self.session.double_click_at(x, y).await?;
        tracing::info!("Double-clicked element: {}", locator);
        Ok(())
    }

    /// Best-effort scroll: no wait precondition, not retried. Fails with
    /// `NotFound` if the element does not exist at call time.
    pub async fn scroll_into_view(&self, locator: &Locator) -> Result<()> {
        tracing::info!("Scrolling to element: {}", locator);

        let result = self
            .session
            .evaluate(js_templates::scroll_into_view(locator))
            .await?;

        self.require_found(&result, locator)
    }

    /// Waits for the document ready-state to report "complete", then reports
    /// whether at least one element matches. Never throws; any failure along
    /// the way reads as "does not exist".
    pub async fn element_exists(&self, locator: &Locator) -> bool {
        let session = self.session;
        let ready = wait::await_condition(
            move || async move {
                matches!(session.ready_state().await.as_deref(), Ok("complete"))
            },
            self.wait.timeout,
            self.wait.poll_interval,
        )
        .await;

        if !ready {
            tracing::debug!("Document never reached readyState complete");
            return false;
        }

        let exists = matches!(self.session.count(locator).await, Ok(n) if n > 0);
        tracing::info!("Existence of element {}: {}", locator, exists);
        exists
    }

    /// Waits for the element to be visible; returns whether it became visible
    /// within the timeout. Non-throwing by contract so it can drive retry
    /// decisions.
    pub async fn is_displayed(&self, locator: &Locator) -> bool {
        let visible = self.await_probe(js_templates::visibility_check(locator)).await;
        tracing::info!(
            "Element {} is {}",
            locator,
            if visible { "displayed" } else { "NOT displayed" }
        );
        visible
    }

    /// Waits for the element to be visible inside the current viewport, not
    /// merely rendered somewhere on the page. Non-throwing by contract, like
    /// [`Self::is_displayed`].
    pub async fn is_in_view(&self, locator: &Locator) -> bool {
        let in_view = self.await_probe(js_templates::in_view_check(locator)).await;
        tracing::info!(
            "Element {} is {}",
            locator,
            if in_view { "in view" } else { "NOT in view" }
        );
        in_view
    }

    /// Waits for visibility, then returns the element's trimmed text content.
    pub async fn text(&self, locator: &Locator) -> Result<String> {
        tracing::info!("Retrieving text from element: {}", locator);

        let visible = self.await_probe(js_templates::visibility_check(locator)).await;
        if !visible {
            return Err(self.unmet("element visible", locator).await);
        }

        let value = self
            .session
            .evaluate(js_templates::read_text(locator))
            .await?;

        match value.as_str() {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(HarnessError::NotFound {
                locator: locator.to_string(),
            }),
        }
    }

    /// Reads an attribute without any wait; the element must already be
    /// known-present. Returns `None` when the attribute is absent.
    pub async fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        tracing::info!("Getting attribute '{}' from element: {}", name, locator);

        let result = self
            .session
            .evaluate(js_templates::read_attribute(locator, name))
            .await?;

        self.require_found(&result, locator)?;

        Ok(result
            .get("value")
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }

    /// Exact, case-sensitive tab-title comparison. No wait, no trimming.
    pub async fn matches_tab_title(&self, expected: &str) -> Result<bool> {
        let title = self.session.title().await?;
        let matches = title == expected;
        tracing::info!("Tab title match for '{}': {}", expected, matches);
        Ok(matches)
    }

    async fn wait_for_clickable(&self, locator: &Locator) -> Result<()> {
        let clickable = self.await_probe(js_templates::clickable_check(locator)).await;
        if clickable {
            Ok(())
        } else {
            Err(self.unmet("element clickable", locator).await)
        }
    }

    /// Polls a boolean page predicate; evaluation errors count as false.
    async fn await_probe(&self, script: String) -> bool {
        let session = self.session;
        wait::await_condition(
            move || {
                let script = script.clone();
                async move {
                    session
                        .evaluate(script)
                        .await
                        .ok()
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false)
                }
            },
            self.wait.timeout,
            self.wait.poll_interval,
        )
        .await
    }

    /// Distinguishes "never appeared at all" from "present but never ready"
    /// at the moment the wait gave up.
    async fn unmet(&self, condition: &str, locator: &Locator) -> HarnessError {
        match self.session.count(locator).await {
            Ok(0) | Err(_) => HarnessError::NotFound {
                locator: locator.to_string(),
            },
            Ok(_) => HarnessError::Timeout {
                condition: format!("{}: {}", condition, locator),
                timeout: self.wait.timeout,
            },
        }
    }

    fn require_found(&self, result: &serde_json::Value, locator: &Locator) -> Result<()> {
        let found = result
            .get("found")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if found {
            Ok(())
        } else {
            Err(HarnessError::NotFound {
                locator: locator.to_string(),
            })
        }
    }
}
