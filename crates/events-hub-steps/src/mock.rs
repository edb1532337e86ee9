//! Recording page objects.
//!
//! [`MockPages`] is a [`PageFactory`] whose pages keep an in-memory list of
//! event cards, record every action call into a shared [`CallLog`] and can be
//! scripted to fail a given method. Used by the test suites and for running
//! the feature files without a browser.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::locator::{ElementName, Locator, LocatorTable};
use crate::page_object::{
    EventDetailPage, EventsHubPage, PageFactory, PageKind, PageObject, SignInPage,
};
use crate::result::{PageError, PageResult};

/// Event titles listed by a fresh [`MockPages`]
pub const DEFAULT_EVENTS: [&str; 3] = [
    "Adobe Express Creative Jam",
    "Firefly Community Meetup",
    "Photoshop Day Workshop",
];

/// One recorded page-object call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Page the call was made on
    pub page: PageKind,
    /// Method name
    pub method: &'static str,
    /// Arguments, rendered as strings
    pub args: Vec<String>,
}

/// Snapshot of recorded calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallLog {
    calls: Vec<Call>,
}

impl CallLog {
    /// All recorded calls in order
    #[must_use]
    pub fn entries(&self) -> &[Call] {
        &self.calls
    }

    /// Method names in call order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.iter().map(|c| c.method).collect()
    }

    /// Number of calls
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether no call was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Last recorded call
    #[must_use]
    pub fn last(&self) -> Option<&Call> {
        self.calls.last()
    }
}

#[derive(Debug, Default)]
struct MockState {
    events: Vec<String>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, PageError>>,
    created: Mutex<Vec<PageKind>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Page factory producing recording page objects
#[derive(Debug, Clone)]
pub struct MockPages {
    state: Arc<MockState>,
}

impl Default for MockPages {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPages {
    /// Create a factory listing [`DEFAULT_EVENTS`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_events(DEFAULT_EVENTS)
    }

    /// Create a factory listing the given event titles in order
    #[must_use]
    pub fn with_events<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Arc::new(MockState {
                events: events.into_iter().map(Into::into).collect(),
                ..MockState::default()
            }),
        }
    }

    /// Make every call of `method` fail with `error`
    #[must_use]
    pub fn failing(self, method: &'static str, error: PageError) -> Self {
        self.fail_on(method, error);
        self
    }

    /// Make every later call of `method` fail with `error`
    pub fn fail_on(&self, method: &'static str, error: PageError) {
        let _ = lock(&self.state.failures).insert(method, error);
    }

    /// Snapshot of the calls recorded so far
    #[must_use]
    pub fn calls(&self) -> CallLog {
        CallLog {
            calls: lock(&self.state.calls).clone(),
        }
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        lock(&self.state.calls).clear();
    }

    /// Page kinds constructed so far, in order
    #[must_use]
    pub fn created(&self) -> Vec<PageKind> {
        lock(&self.state.created).clone()
    }

    /// Event titles listed on the hub
    #[must_use]
    pub fn events(&self) -> &[String] {
        &self.state.events
    }

    fn page(&self, kind: PageKind) -> MockPage {
        lock(&self.state.created).push(kind);
        let locators = match kind {
            PageKind::EventsHub => LocatorTable::new()
                .with(ElementName::Marquee, ".marquee")
                .with(ElementName::PaginationControls, ".pagination-wrapper")
                .with(ElementName::NextButton, "button[aria-label='Next']")
                .with(ElementName::PreviousButton, "button[aria-label='Previous']"),
            PageKind::EventDetail => LocatorTable::new()
                .with(ElementName::EventTitle, "#event-title")
                .with(ElementName::EventAgenda, ".agenda")
                .with(ElementName::EventVenue, ".venue")
                .with(ElementName::EventForm, "#rsvp-form"),
            PageKind::SignIn => LocatorTable::new(),
        };
        MockPage {
            kind,
            locators,
            state: Arc::clone(&self.state),
        }
    }
}

impl PageFactory for MockPages {
    fn events_hub(&self) -> Box<dyn EventsHubPage> {
        Box::new(self.page(PageKind::EventsHub))
    }

    fn event_detail(&self) -> Box<dyn EventDetailPage> {
        Box::new(self.page(PageKind::EventDetail))
    }

    fn sign_in(&self) -> Box<dyn SignInPage> {
        Box::new(self.page(PageKind::SignIn))
    }
}

/// A recording page object of any kind
#[derive(Debug)]
pub struct MockPage {
    kind: PageKind,
    locators: LocatorTable,
    state: Arc<MockState>,
}

impl MockPage {
    fn record(&self, method: &'static str, args: &[&str]) -> PageResult<()> {
        lock(&self.state.calls).push(Call {
            page: self.kind,
            method,
            args: args.iter().map(|a| (*a).to_string()).collect(),
        });
        match lock(&self.state.failures).get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn find(&self, title: &str) -> PageResult<()> {
        if self.state.events.iter().any(|e| e == title) {
            Ok(())
        } else {
            Err(PageError::EventNotFound {
                title: title.to_string(),
            })
        }
    }
}

#[async_trait]
impl PageObject for MockPage {
    fn kind(&self) -> PageKind {
        self.kind
    }

    fn locators(&self) -> &LocatorTable {
        &self.locators
    }

    async fn is_element_visible(&self, locator: &Locator) -> PageResult<()> {
        self.record("is_element_visible", &[&locator.to_string()])
    }
}

#[async_trait]
impl EventsHubPage for MockPage {
    async fn open(&self) -> PageResult<()> {
        self.record("open", &[])
    }

    async fn verify_events_displayed(&self) -> PageResult<()> {
        self.record("verify_events_displayed", &[])?;
        if self.state.events.is_empty() {
            return Err(PageError::not_visible("event cards"));
        }
        Ok(())
    }

    async fn view_event_by_title(&self, title: &str) -> PageResult<()> {
        self.record("view_event_by_title", &[title])?;
        self.find(title)
    }

    async fn event_title_by_sequence(&self, position: u32) -> PageResult<String> {
        self.record("event_title_by_sequence", &[&position.to_string()])?;
        position
            .checked_sub(1)
            .and_then(|i| self.state.events.get(i as usize))
            .cloned()
            .ok_or(PageError::PositionOutOfRange {
                position,
                available: self.state.events.len(),
            })
    }

    async fn verify_banners_on_card(&self, title: &str) -> PageResult<()> {
        self.record("verify_banners_on_card", &[title])?;
        self.find(title)
    }

    async fn verify_date_and_time_on_card(&self, title: &str) -> PageResult<()> {
        self.record("verify_date_and_time_on_card", &[title])?;
        self.find(title)
    }

    async fn verify_view_event_button(&self, title: &str) -> PageResult<()> {
        self.record("verify_view_event_button", &[title])?;
        self.find(title)
    }

    async fn verify_button_is_clickable(&self, locator: &Locator) -> PageResult<()> {
        self.record("verify_button_is_clickable", &[&locator.to_string()])
    }

    async fn verify_page_numbers_clickable(&self) -> PageResult<()> {
        self.record("verify_page_numbers_clickable", &[])
    }

    async fn verify_total_pages_and_results(&self) -> PageResult<()> {
        self.record("verify_total_pages_and_results", &[])
    }

    async fn click_view_event_button(&self, title: &str) -> PageResult<()> {
        self.record("click_view_event_button", &[title])?;
        self.find(title)
    }
}

#[async_trait]
impl EventDetailPage for MockPage {
    async fn verify_on_event_detail_page(&self, title: &str) -> PageResult<()> {
        self.record("verify_on_event_detail_page", &[title])?;
        self.find(title)
    }

    async fn click_rsvp(&self) -> PageResult<()> {
        self.record("click_rsvp", &[])
    }

    async fn is_event_title_correct(&self, title: &str) -> PageResult<()> {
        self.record("is_event_title_correct", &[title])?;
        self.find(title)
    }

    async fn is_email_correct(&self, username: &str) -> PageResult<()> {
        self.record("is_email_correct", &[username])
    }

    async fn fill_rsvp_form(&self) -> PageResult<()> {
        self.record("fill_rsvp_form", &[])
    }
}

#[async_trait]
impl SignInPage for MockPage {
    async fn sign_in(&self, username: &str, _password: &str) -> PageResult<()> {
        self.record("sign_in", &[username, "<redacted>"])
    }
}
