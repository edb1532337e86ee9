//! Named pagination buttons.

use std::fmt;
use std::str::FromStr;

use crate::locator::ElementName;
use crate::result::StepError;

/// Buttons that `the {string} button should be clickable` may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaginationButton {
    /// "Next"
    Next,
    /// "Previous"
    Previous,
}

impl PaginationButton {
    /// Every button, in display order
    pub const ALL: [Self; 2] = [Self::Next, Self::Previous];

    /// Name as written in scenarios
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Previous => "Previous",
        }
    }

    /// Element whose locator identifies the button
    #[must_use]
    pub const fn element(self) -> ElementName {
        match self {
            Self::Next => ElementName::NextButton,
            Self::Previous => ElementName::PreviousButton,
        }
    }
}

impl FromStr for PaginationButton {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| StepError::UnknownButton {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for PaginationButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
