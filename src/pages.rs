//! Page abstractions: named groupings of catalog locators with the composite
//! operations one logical page supports. Thin wrappers over the interaction
//! layer; all waiting and error policy lives below them.

use crate::{Result, config::Config, interact::Interactor, locator::Locator};

/// The target site's home page: identity marker, subscription section at the
/// bottom, and the scroll-to-top arrow that advertisements like to cover.
pub struct HomePage<'a> {
    ui: Interactor<'a>,
    identity: Locator,
    subscription_text: Locator,
    scroll_up_arrow: Locator,
    header_text: Locator,
}

impl<'a> HomePage<'a> {
    pub fn new(ui: Interactor<'a>, config: &Config) -> Result<Self> {
        Ok(Self {
            identity: config.locator("home-identity")?,
            subscription_text: config.locator("subscription-text")?,
            scroll_up_arrow: config.locator("scroll-up-arrow")?,
            header_text: config.locator("header-text")?,
            ui,
        })
    }

    pub async fn is_open(&self) -> bool {
        self.ui.is_displayed(&self.identity).await
    }

    /// Scrolls to the page bottom and reports whether the subscription text
    /// is visible there.
    pub async fn subscription_text_visible(&self) -> Result<bool> {
        self.ui.session().scroll_to_bottom().await?;
        Ok(self.ui.is_displayed(&self.subscription_text).await)
    }

    /// Drives the whole scroll-to-top gesture and reports whether it landed:
    /// scroll to the bottom, confirm the page by its subscription text, click
    /// the arrow, then wait for the header to enter the viewport. Non-throwing
    /// so the retry loop re-runs the full gesture on every attempt.
    pub async fn scroll_to_top_restores_header(&self) -> bool {
        if self.ui.session().scroll_to_bottom().await.is_err() {
            return false;
        }
        if !self.ui.is_displayed(&self.subscription_text).await {
            return false;
        }
        if self.ui.click(&self.scroll_up_arrow).await.is_err() {
            return false;
        }
        self.ui.is_in_view(&self.header_text).await
    }

    pub fn subscription_text(&self) -> &Locator {
        &self.subscription_text
    }
}

/// The footer subscription form: email field, submit arrow, success banner.
pub struct SubscribeForm<'a> {
    ui: Interactor<'a>,
    email_field: Locator,
    submit_button: Locator,
    success_banner: Locator,
}

impl<'a> SubscribeForm<'a> {
    pub fn new(ui: Interactor<'a>, config: &Config) -> Result<Self> {
        Ok(Self {
            email_field: config.locator("subscribe-email")?,
            submit_button: config.locator("subscribe-button")?,
            success_banner: config.locator("subscribe-success")?,
            ui,
        })
    }

    /// Fills the email field and submits the form.
    pub async fn submit(&self, email: &str) -> Result<()> {
        self.ui.session().scroll_to_bottom().await?;
        self.ui.type_text(&self.email_field, email).await?;
        self.ui.click(&self.submit_button).await
    }

    pub async fn confirmed(&self) -> bool {
        self.ui.is_displayed(&self.success_banner).await
    }
}
