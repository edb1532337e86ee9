//! Step definitions for the events hub end-to-end scenarios.
//!
//! Feature files describe event registration in Given/When/Then phrases.
//! This crate resolves each phrase to a [`Step`], runs it against the
//! [`ScenarioContext`] of the scenario, and reports failures per step: some
//! steps abort the scenario with a descriptive message, others only log.
//!
//! ```text
//! phrase ──► StepRegistry::resolve ──► Step::run ──► ActivePage (page object)
//!                                         │
//!                                         └─► tracing + SoftFailures
//! ```
//!
//! Page objects are external collaborators reached through the traits in
//! [`page_object`]; [`mock::MockPages`] stands in for them in tests.

#![warn(missing_docs)]

mod button;
mod context;
mod fixture;
mod locator;
mod result;
mod soft;

pub mod logging;
pub mod mock;
pub mod page_object;
pub mod step;

pub use button::PaginationButton;
pub use context::ScenarioContext;
pub use fixture::{
    Credentials, TestData, DEFAULT_EVENT_TITLE, PASSWORD_ENV, TEST_DATA_ENV, USERNAME_ENV,
};
pub use locator::{ElementName, Locator, LocatorTable, DEFAULT_TIMEOUT_MS};
pub use page_object::{
    ActivePage, EventDetailPage, EventsHubPage, PageFactory, PageKind, PageObject, SignInPage,
};
pub use result::{PageError, PageResult, StepError, StepResult};
pub use soft::{SoftFailure, SoftFailures};
pub use step::{FailurePolicy, Keyword, Step, StepRegistry};

/// Common imports for step harnesses
pub mod prelude {
    pub use super::mock::MockPages;
    pub use super::page_object::{
        ActivePage, EventDetailPage, EventsHubPage, PageFactory, PageKind, PageObject, SignInPage,
    };
    pub use super::{
        Credentials, ElementName, FailurePolicy, Locator, LocatorTable, PageError, PageResult,
        PaginationButton, ScenarioContext, Step, StepError, StepRegistry, StepResult,
        TestData,
    };
}
