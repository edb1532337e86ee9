//! Phrase registry.
//!
//! The registry is built once, before any scenario runs, and is read-only
//! afterwards. Matching ignores the Gherkin keyword, the way cucumber does:
//! the keyword a step is declared with is kept for documentation only.

use std::fmt;
use std::str::FromStr;

use super::pattern::{Args, StepPattern};
use super::Step;
use crate::button::PaginationButton;
use crate::context::ScenarioContext;
use crate::result::{StepError, StepResult};

/// Gherkin keyword a step is declared under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Precondition
    Given,
    /// Action
    When,
    /// Outcome
    Then,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
        })
    }
}

/// Builds a [`Step`] from the parameters of a matched phrase
pub type StepBuilder = fn(&Args<'_>) -> StepResult<Step>;

/// The phrases of the event registration feature
const EVENTS_HUB_STEPS: &[(Keyword, &str, StepBuilder)] = &[
    (Keyword::Given, "I am on the events hub page", |_| {
        Ok(Step::OpenEventsHub)
    }),
    (
        Keyword::Then,
        "I should see the Marquee displayed on the page",
        |_| Ok(Step::MarqueeDisplayed),
    ),
    (
        Keyword::Then,
        "I should see events displayed on the page",
        |_| Ok(Step::EventsDisplayed),
    ),
    (
        Keyword::When,
        "I select the event card with title {string}",
        |args| Ok(Step::SelectEventByTitle(args.string(0)?)),
    ),
    (
        Keyword::When,
        "I select the event card at position {int}",
        |args| Ok(Step::SelectEventAtPosition(args.int(0)?)),
    ),
    (
        Keyword::Then,
        "the banners on the event card should be displayed correctly",
        |_| Ok(Step::BannersOnCard),
    ),
    (
        Keyword::Then,
        "I should see the date and time displayed correctly on the event card",
        |_| Ok(Step::DateAndTimeOnCard),
    ),
    (
        Keyword::Then,
        "the \"View event\" button on the event card should be clickable",
        |_| Ok(Step::ViewEventButtonClickable),
    ),
    (Keyword::Then, "I should see pagination controls", |_| {
        Ok(Step::PaginationControls)
    }),
    (
        Keyword::Then,
        "the {string} button should be clickable",
        |args| {
            let button = PaginationButton::from_str(&args.string(0)?)?;
            Ok(Step::ButtonClickable(button))
        },
    ),
    (
        Keyword::Then,
        "I should be able to click on specific page numbers",
        |_| Ok(Step::PageNumbersClickable),
    ),
    (
        Keyword::Then,
        "I should see the total number of pages and results displayed",
        |_| Ok(Step::TotalPagesAndResults),
    ),
    (
        Keyword::When,
        "the View event button on the event card should be clickable",
        |_| Ok(Step::ClickViewEventButton),
    ),
    (
        Keyword::When,
        "I click the \"View event\" button on the event card at position {int}",
        |args| Ok(Step::ClickViewEventButtonAtPosition(args.int(0)?)),
    ),
    (
        Keyword::Then,
        "I should navigate to the event detail page",
        |_| Ok(Step::NavigateToEventDetail),
    ),
    (
        Keyword::Then,
        "I should see the event details on the page",
        |_| Ok(Step::EventDetailsDisplayed),
    ),
    (
        Keyword::Then,
        "I should see the Agenda on the event details page",
        |_| Ok(Step::AgendaDisplayed),
    ),
    (
        Keyword::Then,
        "I should see the Venue on the event details page",
        |_| Ok(Step::VenueDisplayed),
    ),
    (Keyword::Then, "I click the RSVP Button", |_| Ok(Step::ClickRsvp)),
    (Keyword::Then, "I sign in with AdobeID", |_| Ok(Step::SignIn)),
    (Keyword::Then, "I again click the RSVP Button", |_| {
        Ok(Step::ClickRsvpAgain)
    }),
    (Keyword::Then, "I see the RSVP Form", |_| Ok(Step::RsvpFormDisplayed)),
    (
        Keyword::Then,
        "I should see the event title I clicked on",
        |_| Ok(Step::EventTitleMatches),
    ),
    (Keyword::Then, "I should see my email prefilled", |_| {
        Ok(Step::EmailPrefilled)
    }),
    (Keyword::Then, "I fill all required information", |_| {
        Ok(Step::FillRsvpForm)
    }),
];

/// One registered phrase
#[derive(Clone)]
pub struct StepDefinition {
    keyword: Keyword,
    pattern: StepPattern,
    build: StepBuilder,
}

impl StepDefinition {
    /// Keyword the phrase is declared under
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Compiled pattern
    #[must_use]
    pub const fn pattern(&self) -> &StepPattern {
        &self.pattern
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("keyword", &self.keyword)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Table of phrase patterns and the steps they resolve to
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    definitions: Vec<StepDefinition>,
}

impl StepRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every events hub phrase
    pub fn events_hub() -> StepResult<Self> {
        let mut registry = Self::new();
        for &(keyword, pattern, build) in EVENTS_HUB_STEPS {
            registry.register(keyword, pattern, build)?;
        }
        Ok(registry)
    }

    /// Register a phrase pattern.
    ///
    /// Each pattern maps to exactly one builder; registering the same pattern
    /// text twice fails.
    pub fn register(
        &mut self,
        keyword: Keyword,
        pattern: &str,
        build: StepBuilder,
    ) -> StepResult<()> {
        if self.definitions.iter().any(|d| d.pattern.as_str() == pattern) {
            return Err(StepError::DuplicatePattern {
                pattern: pattern.to_string(),
            });
        }
        self.definitions.push(StepDefinition {
            keyword,
            pattern: StepPattern::parse(pattern)?,
            build,
        });
        Ok(())
    }

    /// Registered definitions in registration order
    #[must_use]
    pub fn definitions(&self) -> &[StepDefinition] {
        &self.definitions
    }

    /// Number of registered phrases
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Resolve a phrase (without its Gherkin keyword) to a step.
    ///
    /// Step-local validation, such as an unknown button name, fails here,
    /// before anything touches a page object.
    pub fn resolve(&self, phrase: &str) -> StepResult<Step> {
        let phrase = phrase.trim();
        let mut matched = self
            .definitions
            .iter()
            .filter(|d| d.pattern.is_match(phrase));
        let Some(definition) = matched.next() else {
            return Err(StepError::Undefined {
                phrase: phrase.to_string(),
            });
        };
        let others: Vec<String> = matched.map(|d| d.pattern.to_string()).collect();
        if !others.is_empty() {
            let mut patterns = vec![definition.pattern.to_string()];
            patterns.extend(others);
            return Err(StepError::Ambiguous {
                phrase: phrase.to_string(),
                patterns,
            });
        }

        let args = definition
            .pattern
            .captures(phrase)
            .ok_or_else(|| StepError::Undefined {
                phrase: phrase.to_string(),
            })??;
        (definition.build)(&args)
    }

    /// Resolve a phrase and run the step against the scenario
    pub async fn dispatch(&self, phrase: &str, ctx: &mut ScenarioContext) -> StepResult<()> {
        let step = self.resolve(phrase).map_err(|err| {
            tracing::error!(phrase, %err, "step could not be resolved");
            err
        })?;
        step.run(ctx).await
    }
}
