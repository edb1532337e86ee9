//! Page object contracts consumed by the steps.
//!
//! One trait per logical screen of the events hub application. Implementations
//! own element lookup, visibility waits and click/type primitives; the steps
//! only call the high-level methods below and interpret the [`PageResult`].
//!
//! # Example
//!
//! ```ignore
//! #[derive(Debug)]
//! struct CdpSignInPage {
//!     locators: LocatorTable,
//!     driver: CdpDriver,
//! }
//!
//! #[async_trait]
//! impl PageObject for CdpSignInPage {
//!     fn kind(&self) -> PageKind {
//!         PageKind::SignIn
//!     }
//!
//!     fn locators(&self) -> &LocatorTable {
//!         &self.locators
//!     }
//!
//!     async fn is_element_visible(&self, locator: &Locator) -> PageResult<()> {
//!         self.driver.wait_visible(locator).await
//!     }
//! }
//!
//! #[async_trait]
//! impl SignInPage for CdpSignInPage {
//!     async fn sign_in(&self, username: &str, password: &str) -> PageResult<()> {
//!         self.driver.fill("#EmailPage-EmailField", username).await?;
//!         self.driver.fill("#PasswordPage-PasswordField", password).await
//!     }
//! }
//! ```

use async_trait::async_trait;
use std::fmt;

use crate::locator::{Locator, LocatorTable};
use crate::result::{PageError, PageResult};

/// Logical application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Events hub listing
    EventsHub,
    /// Single event detail page
    EventDetail,
    /// Identity provider sign-in page
    SignIn,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EventsHub => "events hub",
            Self::EventDetail => "event detail",
            Self::SignIn => "sign-in",
        })
    }
}

/// Behaviour shared by every page object
#[async_trait]
pub trait PageObject: fmt::Debug + Send + Sync {
    /// Which screen this page object models
    fn kind(&self) -> PageKind;

    /// Locators keyed by logical element name
    fn locators(&self) -> &LocatorTable;

    /// Wait for the element to become visible, failing if it does not
    async fn is_element_visible(&self, locator: &Locator) -> PageResult<()>;
}

/// Events hub listing page
#[async_trait]
pub trait EventsHubPage: PageObject {
    /// Navigate to the events hub
    async fn open(&self) -> PageResult<()>;

    /// Verify that event cards are listed
    async fn verify_events_displayed(&self) -> PageResult<()>;

    /// Open the event card with the given title
    async fn view_event_by_title(&self, title: &str) -> PageResult<()>;

    /// Title of the event card at a 1-based position
    async fn event_title_by_sequence(&self, position: u32) -> PageResult<String>;

    /// Verify the banners on the card
    async fn verify_banners_on_card(&self, title: &str) -> PageResult<()>;

    /// Verify the date and time on the card
    async fn verify_date_and_time_on_card(&self, title: &str) -> PageResult<()>;

    /// Verify the card's "View event" button
    async fn verify_view_event_button(&self, title: &str) -> PageResult<()>;

    /// Verify that the located button can be clicked
    async fn verify_button_is_clickable(&self, locator: &Locator) -> PageResult<()>;

    /// Verify that page number links can be clicked
    async fn verify_page_numbers_clickable(&self) -> PageResult<()>;

    /// Verify the total pages and results summary
    async fn verify_total_pages_and_results(&self) -> PageResult<()>;

    /// Click the card's "View event" button
    async fn click_view_event_button(&self, title: &str) -> PageResult<()>;
}

/// Event detail page
#[async_trait]
pub trait EventDetailPage: PageObject {
    /// Verify the browser landed on the detail page of the event
    async fn verify_on_event_detail_page(&self, title: &str) -> PageResult<()>;

    /// Click the RSVP button
    async fn click_rsvp(&self) -> PageResult<()>;

    /// Verify the displayed event title
    async fn is_event_title_correct(&self, title: &str) -> PageResult<()>;

    /// Verify the prefilled email in the RSVP form
    async fn is_email_correct(&self, username: &str) -> PageResult<()>;

    /// Fill every required RSVP field
    async fn fill_rsvp_form(&self) -> PageResult<()>;
}

/// Identity provider sign-in page
#[async_trait]
pub trait SignInPage: PageObject {
    /// Sign in with the given credentials
    async fn sign_in(&self, username: &str, password: &str) -> PageResult<()>;
}

/// Builds fresh page objects when a scenario navigates between screens
pub trait PageFactory: fmt::Debug + Send + Sync {
    /// Create an events hub page object
    fn events_hub(&self) -> Box<dyn EventsHubPage>;

    /// Create an event detail page object
    fn event_detail(&self) -> Box<dyn EventDetailPage>;

    /// Create a sign-in page object
    fn sign_in(&self) -> Box<dyn SignInPage>;
}

/// The page object a scenario is currently driving
#[derive(Debug)]
pub enum ActivePage {
    /// Events hub listing
    EventsHub(Box<dyn EventsHubPage>),
    /// Event detail page
    EventDetail(Box<dyn EventDetailPage>),
    /// Sign-in page
    SignIn(Box<dyn SignInPage>),
}

impl ActivePage {
    /// Build a fresh page object of the given kind
    #[must_use]
    pub fn create(kind: PageKind, factory: &dyn PageFactory) -> Self {
        match kind {
            PageKind::EventsHub => Self::EventsHub(factory.events_hub()),
            PageKind::EventDetail => Self::EventDetail(factory.event_detail()),
            PageKind::SignIn => Self::SignIn(factory.sign_in()),
        }
    }

    /// Which screen is active
    #[must_use]
    pub fn kind(&self) -> PageKind {
        match self {
            Self::EventsHub(_) => PageKind::EventsHub,
            Self::EventDetail(_) => PageKind::EventDetail,
            Self::SignIn(_) => PageKind::SignIn,
        }
    }

    /// Locators of the active page
    #[must_use]
    pub fn locators(&self) -> &LocatorTable {
        match self {
            Self::EventsHub(page) => page.locators(),
            Self::EventDetail(page) => page.locators(),
            Self::SignIn(page) => page.locators(),
        }
    }

    /// Wait for an element of the active page to become visible
    pub async fn is_element_visible(&self, locator: &Locator) -> PageResult<()> {
        match self {
            Self::EventsHub(page) => page.is_element_visible(locator).await,
            Self::EventDetail(page) => page.is_element_visible(locator).await,
            Self::SignIn(page) => page.is_element_visible(locator).await,
        }
    }

    /// The active page as the events hub
    pub fn events_hub(&self) -> PageResult<&dyn EventsHubPage> {
        match self {
            Self::EventsHub(page) => Ok(page.as_ref()),
            other => Err(other.wrong_page(PageKind::EventsHub)),
        }
    }

    /// The active page as an event detail page
    pub fn event_detail(&self) -> PageResult<&dyn EventDetailPage> {
        match self {
            Self::EventDetail(page) => Ok(page.as_ref()),
            other => Err(other.wrong_page(PageKind::EventDetail)),
        }
    }

    /// The active page as the sign-in page
    pub fn sign_in(&self) -> PageResult<&dyn SignInPage> {
        match self {
            Self::SignIn(page) => Ok(page.as_ref()),
            other => Err(other.wrong_page(PageKind::SignIn)),
        }
    }

    fn wrong_page(&self, expected: PageKind) -> PageError {
        PageError::WrongPage {
            expected,
            actual: self.kind(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::locator::ElementName;
    use crate::mock::MockPages;

    mod active_page_tests {
        use super::*;

        #[test]
        fn test_create_each_kind() {
            let pages = MockPages::new();
            for kind in [PageKind::EventsHub, PageKind::EventDetail, PageKind::SignIn] {
                assert_eq!(ActivePage::create(kind, &pages).kind(), kind);
            }
        }

        #[test]
        fn test_typed_accessors() {
            let pages = MockPages::new();
            let hub = ActivePage::create(PageKind::EventsHub, &pages);
            assert!(hub.events_hub().is_ok());
            assert_eq!(
                hub.event_detail().err(),
                Some(PageError::WrongPage {
                    expected: PageKind::EventDetail,
                    actual: PageKind::EventsHub,
                })
            );
            assert_eq!(
                hub.sign_in().err(),
                Some(PageError::WrongPage {
                    expected: PageKind::SignIn,
                    actual: PageKind::EventsHub,
                })
            );
        }

        #[test]
        fn test_locators_follow_active_page() {
            let pages = MockPages::new();
            let hub = ActivePage::create(PageKind::EventsHub, &pages);
            let detail = ActivePage::create(PageKind::EventDetail, &pages);
            assert!(hub.locators().get(ElementName::Marquee).is_some());
            assert!(hub.locators().get(ElementName::EventForm).is_none());
            assert!(detail.locators().get(ElementName::EventForm).is_some());
        }

        #[tokio::test]
        async fn test_is_element_visible_dispatches() {
            let pages = MockPages::new();
            let detail = ActivePage::create(PageKind::EventDetail, &pages);
            let locator = Locator::new(".agenda");
            detail.is_element_visible(&locator).await.unwrap();
            assert_eq!(pages.calls().names(), vec!["is_element_visible"]);
        }
    }

    #[test]
    fn test_page_kind_display() {
        assert_eq!(PageKind::EventsHub.to_string(), "events hub");
        assert_eq!(PageKind::EventDetail.to_string(), "event detail");
        assert_eq!(PageKind::SignIn.to_string(), "sign-in");
    }
}
