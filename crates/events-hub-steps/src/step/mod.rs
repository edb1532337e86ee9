//! Step dispatcher.
//!
//! Every phrase of the events hub feature files resolves to one [`Step`].
//! A step performs one logical page-object action against the
//! [`ScenarioContext`] and normalises the outcome according to its own
//! [`FailurePolicy`]. The policy is chosen per step and is deliberately not
//! uniform: several verifications only log their failure.

mod pattern;
mod registry;

pub use pattern::{Args, Param, ParamType, StepPattern};
pub use registry::{Keyword, StepBuilder, StepDefinition, StepRegistry};

use std::fmt;

use pattern::quote;

use crate::button::PaginationButton;
use crate::context::ScenarioContext;
use crate::locator::ElementName;
use crate::page_object::PageKind;
use crate::result::{PageError, PageResult, StepError, StepResult};

/// What happens when a step's delegated action fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the cause and abort the scenario with a step-specific message
    Fatal,
    /// Log the cause, record it as a soft failure and carry on
    Soft,
    /// Abort the scenario with the raw cause, without logging
    Propagate,
}

/// One resolved step phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `I am on the events hub page`
    OpenEventsHub,
    /// `I should see the Marquee displayed on the page`
    MarqueeDisplayed,
    /// `I should see events displayed on the page`
    EventsDisplayed,
    /// `I select the event card with title {string}`
    SelectEventByTitle(String),
    /// `I select the event card at position {int}`
    SelectEventAtPosition(i64),
    /// `the banners on the event card should be displayed correctly`
    BannersOnCard,
    /// `I should see the date and time displayed correctly on the event card`
    DateAndTimeOnCard,
    /// `the "View event" button on the event card should be clickable`
    ViewEventButtonClickable,
    /// `I should see pagination controls`
    PaginationControls,
    /// `the {string} button should be clickable`
    ButtonClickable(PaginationButton),
    /// `I should be able to click on specific page numbers`
    PageNumbersClickable,
    /// `I should see the total number of pages and results displayed`
    TotalPagesAndResults,
    /// `the View event button on the event card should be clickable`
    ClickViewEventButton,
    /// `I click the "View event" button on the event card at position {int}`
    ClickViewEventButtonAtPosition(i64),
    /// `I should navigate to the event detail page`
    NavigateToEventDetail,
    /// `I should see the event details on the page`
    EventDetailsDisplayed,
    /// `I should see the Agenda on the event details page`
    AgendaDisplayed,
    /// `I should see the Venue on the event details page`
    VenueDisplayed,
    /// `I click the RSVP Button`
    ClickRsvp,
    /// `I sign in with AdobeID`
    SignIn,
    /// `I again click the RSVP Button`
    ClickRsvpAgain,
    /// `I see the RSVP Form`
    RsvpFormDisplayed,
    /// `I should see the event title I clicked on`
    EventTitleMatches,
    /// `I should see my email prefilled`
    EmailPrefilled,
    /// `I fill all required information`
    FillRsvpForm,
}

impl Step {
    /// How this step treats a failed action
    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        match self {
            Self::OpenEventsHub
            | Self::EventsDisplayed
            | Self::SelectEventAtPosition(_)
            | Self::ClickViewEventButton
            | Self::ClickViewEventButtonAtPosition(_)
            | Self::NavigateToEventDetail
            | Self::EventDetailsDisplayed
            | Self::RsvpFormDisplayed => FailurePolicy::Fatal,

            // TODO: confirm with the scenario owners which of these were
            // meant to fail the scenario before promoting any to Fatal
            Self::MarqueeDisplayed
            | Self::SelectEventByTitle(_)
            | Self::BannersOnCard
            | Self::DateAndTimeOnCard
            | Self::ViewEventButtonClickable
            | Self::PaginationControls
            | Self::ButtonClickable(_)
            | Self::PageNumbersClickable
            | Self::TotalPagesAndResults
            | Self::AgendaDisplayed
            | Self::VenueDisplayed
            | Self::ClickRsvp
            | Self::SignIn
            | Self::ClickRsvpAgain
            | Self::EventTitleMatches => FailurePolicy::Soft,

            Self::EmailPrefilled | Self::FillRsvpForm => FailurePolicy::Propagate,
        }
    }

    /// Run the step against the scenario.
    ///
    /// Soft steps never return an error. Fatal and propagating steps abort
    /// the scenario through the returned [`StepError`].
    pub async fn run(&self, ctx: &mut ScenarioContext) -> StepResult<()> {
        tracing::debug!(step = %self, "running step");
        match self.perform(ctx).await {
            Ok(()) => Ok(()),
            Err(cause) => self.fail(ctx, cause),
        }
    }

    async fn perform(&self, ctx: &mut ScenarioContext) -> PageResult<()> {
        match self {
            Self::OpenEventsHub => ctx.open(PageKind::EventsHub).events_hub()?.open().await,
            Self::MarqueeDisplayed => element_visible(ctx, ElementName::Marquee).await,
            Self::EventsDisplayed => ctx.page()?.events_hub()?.verify_events_displayed().await,
            Self::SelectEventByTitle(title) => select_event(ctx, title.clone()).await,
            Self::SelectEventAtPosition(position) => {
                let title = title_at(ctx, *position).await?;
                select_event(ctx, title).await
            }
            Self::BannersOnCard => {
                let hub = ctx.page()?.events_hub()?;
                hub.verify_banners_on_card(ctx.require_event_title()?).await
            }
            Self::DateAndTimeOnCard => {
                let hub = ctx.page()?.events_hub()?;
                hub.verify_date_and_time_on_card(ctx.require_event_title()?)
                    .await
            }
            Self::ViewEventButtonClickable => {
                let hub = ctx.page()?.events_hub()?;
                hub.verify_view_event_button(ctx.require_event_title()?).await
            }
            Self::PaginationControls => {
                element_visible(ctx, ElementName::PaginationControls).await
            }
            Self::ButtonClickable(button) => {
                let page = ctx.page()?;
                let locator = page.locators().require(button.element())?;
                page.events_hub()?.verify_button_is_clickable(locator).await
            }
            Self::PageNumbersClickable => {
                ctx.page()?
                    .events_hub()?
                    .verify_page_numbers_clickable()
                    .await
            }
            Self::TotalPagesAndResults => {
                ctx.page()?
                    .events_hub()?
                    .verify_total_pages_and_results()
                    .await
            }
            Self::ClickViewEventButton => click_view_event(ctx).await,
            Self::ClickViewEventButtonAtPosition(position) => {
                let title = title_at(ctx, *position).await?;
                ctx.select_event(title);
                click_view_event(ctx).await
            }
            Self::NavigateToEventDetail => {
                ctx.open(PageKind::EventDetail);
                let detail = ctx.page()?.event_detail()?;
                detail
                    .verify_on_event_detail_page(ctx.require_event_title()?)
                    .await
            }
            Self::EventDetailsDisplayed => {
                element_visible(ctx, ElementName::EventTitle).await?;
                tracing::info!(
                    "Event details for \"{}\" are displayed as expected.",
                    title_for_log(ctx)
                );
                Ok(())
            }
            Self::AgendaDisplayed => element_visible(ctx, ElementName::EventAgenda).await,
            Self::VenueDisplayed => element_visible(ctx, ElementName::EventVenue).await,
            Self::ClickRsvp => ctx.page()?.event_detail()?.click_rsvp().await,
            Self::SignIn => {
                ctx.open(PageKind::SignIn);
                let credentials = ctx.credentials();
                ctx.page()?
                    .sign_in()?
                    .sign_in(credentials.username(), credentials.password())
                    .await?;
                tracing::info!("Sign in done");
                Ok(())
            }
            Self::ClickRsvpAgain => {
                ctx.open(PageKind::EventDetail).event_detail()?.click_rsvp().await
            }
            Self::RsvpFormDisplayed => element_visible(ctx, ElementName::EventForm).await,
            Self::EventTitleMatches => {
                let detail = ctx.page()?.event_detail()?;
                detail.is_event_title_correct(ctx.require_event_title()?).await
            }
            Self::EmailPrefilled => {
                let detail = ctx.page()?.event_detail()?;
                detail.is_email_correct(ctx.credentials().username()).await
            }
            Self::FillRsvpForm => ctx.page()?.event_detail()?.fill_rsvp_form().await,
        }
    }

    fn fail(&self, ctx: &mut ScenarioContext, cause: PageError) -> StepResult<()> {
        let policy = self.policy();
        if policy == FailurePolicy::Propagate {
            return Err(StepError::Page(cause));
        }

        let log = self.log_message(ctx);
        tracing::error!(step = %self, %cause, "{log}");
        if policy == FailurePolicy::Soft {
            ctx.soft_failures_mut()
                .record(self.to_string(), format!("{log}: {cause}"));
            return Ok(());
        }

        let message = self.fatal_message(ctx, &cause);
        Err(StepError::Fatal { message, cause })
    }

    /// Diagnostic line logged with the original cause
    fn log_message(&self, ctx: &ScenarioContext) -> String {
        match self {
            Self::OpenEventsHub => "Failed to open the Events Hub page".to_string(),
            Self::MarqueeDisplayed => "Marquee verification failed".to_string(),
            Self::EventsDisplayed => "Events verification failed".to_string(),
            Self::SelectEventByTitle(title) => {
                format!("Failed to select the event card with title \"{title}\"")
            }
            Self::SelectEventAtPosition(position) => {
                format!("Failed to select the event card at position {position}")
            }
            Self::BannersOnCard => "Banner verification failed".to_string(),
            Self::DateAndTimeOnCard => "Date and time verification failed".to_string(),
            Self::ViewEventButtonClickable => "Read more button verification failed".to_string(),
            Self::PaginationControls => "Pagination controls verification failed".to_string(),
            Self::ButtonClickable(button) => {
                format!("Failed to verify if the \"{button}\" button is clickable")
            }
            Self::PageNumbersClickable => "Failed to verify page numbers".to_string(),
            Self::TotalPagesAndResults => {
                "Failed to verify total pages and results".to_string()
            }
            // Names the fixture's default title, not the selected card
            Self::ClickViewEventButton => format!(
                "Failed to click the \"View event\" button for the event with title \"{}\"",
                ctx.test_data().event_title
            ),
            Self::ClickViewEventButtonAtPosition(_) => format!(
                "Failed to click the \"View event\" button for the event with title \"{}\"",
                title_for_log(ctx)
            ),
            Self::NavigateToEventDetail => format!(
                "Failed to verify navigation to the event detail page for the event with title \"{}\"",
                title_for_log(ctx)
            ),
            Self::EventDetailsDisplayed => format!(
                "Error verifying event details for \"{}\"",
                title_for_log(ctx)
            ),
            Self::AgendaDisplayed => "Event agenda verification failed".to_string(),
            Self::VenueDisplayed => "Event venue verification failed".to_string(),
            Self::ClickRsvp | Self::ClickRsvpAgain => {
                "Failed to click on RSVP Button".to_string()
            }
            Self::SignIn => "Failed to sign in".to_string(),
            Self::RsvpFormDisplayed => "RSVP form verification failed".to_string(),
            Self::EventTitleMatches => "Event title verification failed".to_string(),
            Self::EmailPrefilled | Self::FillRsvpForm => format!("Step failed: {self}"),
        }
    }

    /// Scenario failure message for fatal steps
    fn fatal_message(&self, ctx: &ScenarioContext, cause: &PageError) -> String {
        match self {
            Self::OpenEventsHub => {
                "Could not navigate to the Events Hub page. Please check the URL or connectivity."
                    .to_string()
            }
            Self::EventsDisplayed => {
                "Events are not displayed as expected on the Events Hub page.".to_string()
            }
            Self::SelectEventAtPosition(position) => format!(
                "Could not select the event card at position {position}. Please ensure the event cards are loaded correctly."
            ),
            Self::ClickViewEventButton | Self::ClickViewEventButtonAtPosition(_) => {
                "Could not click the \"View event\" button as expected.".to_string()
            }
            Self::NavigateToEventDetail => {
                "Navigation to the event detail page did not happen as expected.".to_string()
            }
            Self::EventDetailsDisplayed => format!(
                "Failed to verify event details for \"{}\". {cause}",
                title_for_log(ctx)
            ),
            Self::RsvpFormDisplayed => {
                "RSVP form not displayed as expected on the Event Details page.".to_string()
            }
            other => format!("{}: {cause}", other.log_message(ctx)),
        }
    }
}

/// Renders the step as the phrase a feature file uses for it
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenEventsHub => f.write_str("I am on the events hub page"),
            Self::MarqueeDisplayed => f.write_str("I should see the Marquee displayed on the page"),
            Self::EventsDisplayed => f.write_str("I should see events displayed on the page"),
            Self::SelectEventByTitle(title) => {
                write!(f, "I select the event card with title {}", quote(title))
            }
            Self::SelectEventAtPosition(position) => {
                write!(f, "I select the event card at position {position}")
            }
            Self::BannersOnCard => {
                f.write_str("the banners on the event card should be displayed correctly")
            }
            Self::DateAndTimeOnCard => f.write_str(
                "I should see the date and time displayed correctly on the event card",
            ),
            Self::ViewEventButtonClickable => {
                f.write_str("the \"View event\" button on the event card should be clickable")
            }
            Self::PaginationControls => f.write_str("I should see pagination controls"),
            Self::ButtonClickable(button) => {
                write!(f, "the \"{button}\" button should be clickable")
            }
            Self::PageNumbersClickable => {
                f.write_str("I should be able to click on specific page numbers")
            }
            Self::TotalPagesAndResults => {
                f.write_str("I should see the total number of pages and results displayed")
            }
            Self::ClickViewEventButton => {
                f.write_str("the View event button on the event card should be clickable")
            }
            Self::ClickViewEventButtonAtPosition(position) => write!(
                f,
                "I click the \"View event\" button on the event card at position {position}"
            ),
            Self::NavigateToEventDetail => f.write_str("I should navigate to the event detail page"),
            Self::EventDetailsDisplayed => f.write_str("I should see the event details on the page"),
            Self::AgendaDisplayed => f.write_str("I should see the Agenda on the event details page"),
            Self::VenueDisplayed => f.write_str("I should see the Venue on the event details page"),
            Self::ClickRsvp => f.write_str("I click the RSVP Button"),
            Self::SignIn => f.write_str("I sign in with AdobeID"),
            Self::ClickRsvpAgain => f.write_str("I again click the RSVP Button"),
            Self::RsvpFormDisplayed => f.write_str("I see the RSVP Form"),
            Self::EventTitleMatches => f.write_str("I should see the event title I clicked on"),
            Self::EmailPrefilled => f.write_str("I should see my email prefilled"),
            Self::FillRsvpForm => f.write_str("I fill all required information"),
        }
    }
}

/// Record `title` as the selected card, then open it.
///
/// Both selection steps go through here so they leave the same post-condition.
async fn select_event(ctx: &mut ScenarioContext, title: String) -> PageResult<()> {
    ctx.select_event(title);
    let hub = ctx.page()?.events_hub()?;
    hub.view_event_by_title(ctx.require_event_title()?).await
}

async fn click_view_event(ctx: &ScenarioContext) -> PageResult<()> {
    let hub = ctx.page()?.events_hub()?;
    hub.click_view_event_button(ctx.require_event_title()?).await
}

async fn title_at(ctx: &ScenarioContext, position: i64) -> PageResult<String> {
    let position = u32::try_from(position).map_err(|_| PageError::InvalidPosition { position })?;
    ctx.page()?
        .events_hub()?
        .event_title_by_sequence(position)
        .await
}

async fn element_visible(ctx: &ScenarioContext, element: ElementName) -> PageResult<()> {
    let page = ctx.page()?;
    let locator = page.locators().require(element)?;
    page.is_element_visible(locator).await
}

fn title_for_log(ctx: &ScenarioContext) -> &str {
    ctx.event_title().unwrap_or("<none>")
}
