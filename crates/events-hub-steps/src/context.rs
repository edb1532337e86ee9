//! Per-scenario state shared by the step handlers.
//!
//! The runner creates one [`ScenarioContext`] per scenario and threads it
//! through every step of that scenario by `&mut`. Nothing in it is shared with
//! other scenarios except the read-only [`TestData`] and the page factory.

use std::sync::Arc;

use crate::fixture::{Credentials, TestData};
use crate::page_object::{ActivePage, PageFactory, PageKind};
use crate::result::{PageError, PageResult};
use crate::soft::SoftFailures;

/// Mutable state of one running scenario
#[derive(Debug)]
pub struct ScenarioContext {
    pages: Arc<dyn PageFactory>,
    page: Option<ActivePage>,
    event_title: Option<String>,
    credentials: Credentials,
    test_data: Arc<TestData>,
    soft_failures: SoftFailures,
}

impl ScenarioContext {
    /// Create the context for a new scenario
    #[must_use]
    pub fn new(
        pages: Arc<dyn PageFactory>,
        test_data: Arc<TestData>,
        credentials: Credentials,
    ) -> Self {
        Self {
            pages,
            page: None,
            event_title: None,
            credentials,
            test_data,
            soft_failures: SoftFailures::new(),
        }
    }

    /// Replace the current page with a fresh page object of `kind`
    pub fn open(&mut self, kind: PageKind) -> &ActivePage {
        tracing::debug!(page = %kind, "switching page context");
        self.page.insert(ActivePage::create(kind, self.pages.as_ref()))
    }

    /// The current page object
    pub fn page(&self) -> PageResult<&ActivePage> {
        self.page.as_ref().ok_or(PageError::NoActivePage)
    }

    /// Kind of the current page, if any
    #[must_use]
    pub fn page_kind(&self) -> Option<PageKind> {
        self.page.as_ref().map(ActivePage::kind)
    }

    /// Record the selected event card
    pub fn select_event(&mut self, title: impl Into<String>) {
        self.event_title = Some(title.into());
    }

    /// Title of the last selected event card
    #[must_use]
    pub fn event_title(&self) -> Option<&str> {
        self.event_title.as_deref()
    }

    /// Title of the last selected event card, failing if none was selected
    pub fn require_event_title(&self) -> PageResult<&str> {
        self.event_title().ok_or(PageError::NoEventSelected)
    }

    /// Sign-in credentials
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fixture values
    #[must_use]
    pub fn test_data(&self) -> &TestData {
        &self.test_data
    }

    /// Failures swallowed by soft steps so far
    #[must_use]
    pub const fn soft_failures(&self) -> &SoftFailures {
        &self.soft_failures
    }

    pub(crate) fn soft_failures_mut(&mut self) -> &mut SoftFailures {
        &mut self.soft_failures
    }
}
