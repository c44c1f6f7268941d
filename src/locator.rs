//! Locator: an immutable descriptor of how to find a page element.
//!
//! A locator is pure data (strategy + selector string) with value equality,
//! so page catalogs can hold them in plain config tables. The only behavior
//! is emitting the JavaScript query expressions the interaction layer
//! evaluates in the page.

use crate::{HarnessError, js_templates::js_string};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Id,
    Css,
    XPath,
    Text,
}

impl Strategy {
    fn prefix(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new(Strategy::Id, value)
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::Css, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Strategy::Text, value)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// JavaScript expression evaluating to the first matching element or null.
    pub fn find_expression(&self) -> String {
        let v = js_string(&self.value);
        match self.strategy {
            Strategy::Id => format!("document.getElementById({v})"),
            Strategy::Css => format!("document.querySelector({v})"),
            Strategy::XPath => format!(
                "document.evaluate({v},document,null,XPathResult.FIRST_ORDERED_NODE_TYPE,null).singleNodeValue"
            ),
            Strategy::Text => format!(
                "Array.from(document.querySelectorAll('*')).find(el=>el.textContent.trim()==={v})||null"
            ),
        }
    }

    /// JavaScript expression evaluating to the number of matching elements.
    pub fn count_expression(&self) -> String {
        let v = js_string(&self.value);
        match self.strategy {
            Strategy::Id => format!("(document.getElementById({v})?1:0)"),
            Strategy::Css => format!("document.querySelectorAll({v}).length"),
            Strategy::XPath => format!(
                "document.evaluate({v},document,null,XPathResult.ORDERED_NODE_SNAPSHOT_TYPE,null).snapshotLength"
            ),
            Strategy::Text => format!(
                "Array.from(document.querySelectorAll('*')).filter(el=>el.textContent.trim()==={v}).length"
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy.prefix(), self.value)
    }
}

impl std::str::FromStr for Locator {
    type Err = HarnessError;

    /// Parses the `"strategy:value"` form used by locator catalogs,
    /// e.g. `"css:.single-widget h2"` or `"id:subscribe_email"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (strategy, value) = s.split_once(':').ok_or_else(|| {
            HarnessError::ConfigError(format!(
                "Locator '{}' must be of the form strategy:value",
                s
            ))
        })?;

        let strategy = match strategy.to_lowercase().as_str() {
            "id" => Strategy::Id,
            "css" => Strategy::Css,
            "xpath" => Strategy::XPath,
            "text" => Strategy::Text,
            other => {
                return Err(HarnessError::ConfigError(format!(
                    "Unknown locator strategy: {}",
                    other
                )));
            }
        };

        if value.is_empty() {
            return Err(HarnessError::ConfigError(format!(
                "Locator '{}' has an empty selector",
                s
            )));
        }

        Ok(Self::new(strategy, value))
    }
}
