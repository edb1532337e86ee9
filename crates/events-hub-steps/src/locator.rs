//! Locators and the per-page locator table.
//!
//! Steps never build selectors themselves. They name a logical element
//! ([`ElementName`]) and read its [`Locator`] from the active page's
//! [`LocatorTable`]; how a locator is resolved against the DOM is up to the
//! page object.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::result::{PageError, PageResult};

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// A CSS locator for one element, with the wait budget the page object
/// should honour when resolving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    css: String,
    timeout: Duration,
}

impl Locator {
    /// Create a locator from a CSS selector
    #[must_use]
    pub fn new(css: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Set the wait budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the CSS selector
    #[must_use]
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Get the wait budget
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "css={}", self.css)
    }
}

/// Logical element names the steps look up in a page's locator table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementName {
    /// Events hub marquee banner
    Marquee,
    /// Pagination control strip
    #[serde(rename = "paginationControlsSelector")]
    PaginationControls,
    /// "Next" pagination button
    #[serde(rename = "nextButtonSelector")]
    NextButton,
    /// "Previous" pagination button
    #[serde(rename = "previousButtonSelector")]
    PreviousButton,
    /// Event detail title heading
    EventTitle,
    /// Event detail agenda section
    EventAgenda,
    /// Event detail venue section
    EventVenue,
    /// RSVP form
    EventForm,
}

impl ElementName {
    /// Key used for this element in page locator tables
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Marquee => "marquee",
            Self::PaginationControls => "paginationControlsSelector",
            Self::NextButton => "nextButtonSelector",
            Self::PreviousButton => "previousButtonSelector",
            Self::EventTitle => "eventTitle",
            Self::EventAgenda => "eventAgenda",
            Self::EventVenue => "eventVenue",
            Self::EventForm => "eventForm",
        }
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Locators of one page, keyed by logical element name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorTable {
    locators: HashMap<ElementName, Locator>,
}

impl LocatorTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a locator with the default wait budget
    #[must_use]
    pub fn with(mut self, element: ElementName, css: impl Into<String>) -> Self {
        self.insert(element, Locator::new(css));
        self
    }

    /// Insert or replace a locator
    pub fn insert(&mut self, element: ElementName, locator: Locator) {
        let _ = self.locators.insert(element, locator);
    }

    /// Get a locator by name
    #[must_use]
    pub fn get(&self, element: ElementName) -> Option<&Locator> {
        self.locators.get(&element)
    }

    /// Get a locator by name, failing when the page does not define it
    pub fn require(&self, element: ElementName) -> PageResult<&Locator> {
        self.get(element)
            .ok_or(PageError::MissingLocator { element })
    }

    /// Number of locators in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}
