//! Result and error types for step execution.
//!
//! Two layers of failure exist. [`PageError`] is what a delegated page-object
//! call (or a precondition of that call) raises. [`StepError`] is what a step
//! hands back to the runner, and any [`StepError`] aborts the scenario.

use thiserror::Error;

use crate::locator::ElementName;
use crate::page_object::PageKind;

/// Result type for page-object operations
pub type PageResult<T> = Result<T, PageError>;

/// Result type for step dispatch and execution
pub type StepResult<T> = Result<T, StepError>;

/// Failures raised while delegating a step to the active page object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// Element never became visible within the page's wait budget
    #[error("Element {element} is not visible")]
    ElementNotVisible {
        /// Element description
        element: String,
    },

    /// Element is visible but cannot be interacted with
    #[error("Element {element} is not clickable")]
    NotClickable {
        /// Element description
        element: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Displayed value differs from the expected one
    #[error("Expected {expected:?}, found {actual:?}")]
    Mismatch {
        /// Expected value
        expected: String,
        /// Value found on the page
        actual: String,
    },

    /// No event card carries the given title
    #[error("No event card with title {title:?}")]
    EventNotFound {
        /// Requested title
        title: String,
    },

    /// Requested card position is past the end of the list
    #[error("No event card at position {position} ({available} cards loaded)")]
    PositionOutOfRange {
        /// Requested 1-based position
        position: u32,
        /// Number of cards on the page
        available: usize,
    },

    /// Page locator table has no entry for the element
    #[error("No locator defined for {element}")]
    MissingLocator {
        /// Logical element name
        element: ElementName,
    },

    /// The step needs a different page object than the current one
    #[error("Expected the {expected} page to be active, but the {actual} page is")]
    WrongPage {
        /// Page the step operates on
        expected: PageKind,
        /// Page currently active
        actual: PageKind,
    },

    /// No page object has been opened in this scenario yet
    #[error("No page is active in this scenario")]
    NoActivePage,

    /// No event card has been selected in this scenario yet
    #[error("No event card has been selected in this scenario")]
    NoEventSelected,

    /// Card positions are 1-based and non-negative
    #[error("Invalid event card position {position}")]
    InvalidPosition {
        /// Position as written in the step
        position: i64,
    },

    /// Underlying browser driver failure
    #[error("Browser driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },
}

impl PageError {
    /// Create a browser driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create an element visibility error
    #[must_use]
    pub fn not_visible(element: impl Into<String>) -> Self {
        Self::ElementNotVisible {
            element: element.into(),
        }
    }
}

/// Errors returned to the scenario runner
#[derive(Debug, Error)]
pub enum StepError {
    /// Step-specific failure wrapping the delegated cause
    #[error("{message}")]
    Fatal {
        /// Message describing the attempted action
        message: String,
        /// Original failure, already logged
        #[source]
        cause: PageError,
    },

    /// Delegated failure from a step with no handler of its own
    #[error(transparent)]
    Page(#[from] PageError),

    /// Button name outside the pagination lookup
    #[error("No selector defined for button type \"{name}\".")]
    UnknownButton {
        /// Name as written in the step
        name: String,
    },

    /// Phrase matches no registered pattern
    #[error("Undefined step: {phrase}")]
    Undefined {
        /// Phrase text
        phrase: String,
    },

    /// Phrase matches more than one registered pattern
    #[error("Ambiguous step {phrase:?} matches: {}", patterns.join(", "))]
    Ambiguous {
        /// Phrase text
        phrase: String,
        /// Every pattern that matched
        patterns: Vec<String>,
    },

    /// Pattern registered twice
    #[error("Step pattern registered twice: {pattern}")]
    DuplicatePattern {
        /// Pattern text
        pattern: String,
    },

    /// Pattern could not be compiled
    #[error("Invalid step pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// Pattern text
        pattern: String,
        /// Error message
        message: String,
    },

    /// Extracted parameter has the wrong type for its step
    #[error("Invalid parameter for {pattern:?}: {message}")]
    InvalidParameter {
        /// Pattern text
        pattern: String,
        /// Error message
        message: String,
    },

    /// Fixture or credentials configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StepError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The page-object failure behind this error, if any
    #[must_use]
    pub const fn page_cause(&self) -> Option<&PageError> {
        match self {
            Self::Fatal { cause, .. } => Some(cause),
            Self::Page(cause) => Some(cause),
            _ => None,
        }
    }

    /// Whether the error was produced by the step itself before any page call
    #[must_use]
    pub const fn is_step_local(&self) -> bool {
        matches!(
            self,
            Self::UnknownButton { .. }
                | Self::Undefined { .. }
                | Self::Ambiguous { .. }
                | Self::InvalidParameter { .. }
        )
    }
}
