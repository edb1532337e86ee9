//! Dispatch behaviour of the events hub phrases against recording pages.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use events_hub_steps::mock::{Call, MockPages, DEFAULT_EVENTS};
use events_hub_steps::prelude::*;

fn registry() -> StepRegistry {
    StepRegistry::events_hub().expect("events hub phrases register")
}

fn context(pages: &MockPages) -> ScenarioContext {
    ScenarioContext::new(
        Arc::new(pages.clone()),
        Arc::new(TestData::default()),
        Credentials::new("attendee@example.com", "s3cret"),
    )
}

/// Context on `page` with the first listed event selected and no calls logged
fn prepared(pages: &MockPages, page: PageKind) -> ScenarioContext {
    let mut ctx = context(pages);
    ctx.open(page);
    ctx.select_event(pages.events()[0].clone());
    pages.clear_calls();
    ctx
}

mod one_call_per_step {
    use super::*;

    #[tokio::test]
    async fn test_each_phrase_delegates_once() {
        let registry = registry();
        let first = DEFAULT_EVENTS[0];
        let cases: &[(PageKind, &str, &str, &[&str])] = &[
            (PageKind::EventsHub, "I should see the Marquee displayed on the page", "is_element_visible", &["css=.marquee"]),
            (PageKind::EventsHub, "I should see events displayed on the page", "verify_events_displayed", &[]),
            (PageKind::EventsHub, "the banners on the event card should be displayed correctly", "verify_banners_on_card", &[first]),
            (PageKind::EventsHub, "I should see the date and time displayed correctly on the event card", "verify_date_and_time_on_card", &[first]),
            (PageKind::EventsHub, "the \"View event\" button on the event card should be clickable", "verify_view_event_button", &[first]),
            (PageKind::EventsHub, "I should see pagination controls", "is_element_visible", &["css=.pagination-wrapper"]),
            (PageKind::EventsHub, "the \"Next\" button should be clickable", "verify_button_is_clickable", &["css=button[aria-label='Next']"]),
            (PageKind::EventsHub, "the \"Previous\" button should be clickable", "verify_button_is_clickable", &["css=button[aria-label='Previous']"]),
            (PageKind::EventsHub, "I should be able to click on specific page numbers", "verify_page_numbers_clickable", &[]),
            (PageKind::EventsHub, "I should see the total number of pages and results displayed", "verify_total_pages_and_results", &[]),
            (PageKind::EventsHub, "the View event button on the event card should be clickable", "click_view_event_button", &[first]),
            (PageKind::EventsHub, "I should navigate to the event detail page", "verify_on_event_detail_page", &[first]),
            (PageKind::EventDetail, "I should see the event details on the page", "is_element_visible", &["css=#event-title"]),
            (PageKind::EventDetail, "I should see the Agenda on the event details page", "is_element_visible", &["css=.agenda"]),
            (PageKind::EventDetail, "I should see the Venue on the event details page", "is_element_visible", &["css=.venue"]),
            (PageKind::EventDetail, "I click the RSVP Button", "click_rsvp", &[]),
            (PageKind::EventDetail, "I sign in with AdobeID", "sign_in", &["attendee@example.com", "<redacted>"]),
            (PageKind::SignIn, "I again click the RSVP Button", "click_rsvp", &[]),
            (PageKind::EventDetail, "I see the RSVP Form", "is_element_visible", &["css=#rsvp-form"]),
            (PageKind::EventDetail, "I should see the event title I clicked on", "is_event_title_correct", &[first]),
            (PageKind::EventDetail, "I should see my email prefilled", "is_email_correct", &["attendee@example.com"]),
            (PageKind::EventDetail, "I fill all required information", "fill_rsvp_form", &[]),
        ];

        for (page, phrase, method, args) in cases {
            let pages = MockPages::new();
            let mut ctx = prepared(&pages, *page);
            registry.dispatch(phrase, &mut ctx).await.unwrap();
            let calls = pages.calls();
            assert_eq!(calls.names(), vec![*method], "{phrase}");
            assert_eq!(calls.entries()[0].args, args.to_vec(), "{phrase}");
            assert!(ctx.soft_failures().is_empty(), "{phrase}");
        }
    }

    #[tokio::test]
    async fn test_open_events_hub() {
        let pages = MockPages::new();
        let mut ctx = context(&pages);
        registry()
            .dispatch("I am on the events hub page", &mut ctx)
            .await
            .unwrap();
        assert_eq!(pages.calls().names(), vec!["open"]);
        assert_eq!(ctx.page_kind(), Some(PageKind::EventsHub));
    }

    #[tokio::test]
    async fn test_select_by_title_records_title() {
        let pages = MockPages::new();
        let mut ctx = prepared(&pages, PageKind::EventsHub);
        let title = pages.events()[2].clone();
        registry()
            .dispatch(&format!("I select the event card with title \"{title}\""), &mut ctx)
            .await
            .unwrap();
        assert_eq!(pages.calls().names(), vec!["view_event_by_title"]);
        assert_eq!(ctx.event_title(), Some(title.as_str()));
    }

    #[tokio::test]
    async fn test_position_steps_resolve_then_delegate() {
        let pages = MockPages::new();
        let mut ctx = prepared(&pages, PageKind::EventsHub);
        registry()
            .dispatch("I select the event card at position 2", &mut ctx)
            .await
            .unwrap();
        assert_eq!(
            pages.calls().names(),
            vec!["event_title_by_sequence", "view_event_by_title"]
        );
        assert_eq!(ctx.event_title(), Some(pages.events()[1].as_str()));
    }

    #[tokio::test]
    async fn test_navigation_swaps_page_objects() {
        let pages = MockPages::new();
        let mut ctx = prepared(&pages, PageKind::EventsHub);
        let registry = registry();
        registry
            .dispatch("I should navigate to the event detail page", &mut ctx)
            .await
            .unwrap();
        assert_eq!(ctx.page_kind(), Some(PageKind::EventDetail));
        registry.dispatch("I sign in with AdobeID", &mut ctx).await.unwrap();
        assert_eq!(ctx.page_kind(), Some(PageKind::SignIn));
        registry
            .dispatch("I again click the RSVP Button", &mut ctx)
            .await
            .unwrap();
        assert_eq!(ctx.page_kind(), Some(PageKind::EventDetail));

        let pages_of_calls: Vec<PageKind> = pages.calls().entries().iter().map(|c| c.page).collect();
        assert_eq!(
            pages_of_calls,
            vec![PageKind::EventDetail, PageKind::SignIn, PageKind::EventDetail]
        );
    }
}

mod position_agreement {
    use super::*;

    #[tokio::test]
    async fn test_select_and_click_at_same_position_use_same_title() {
        let pages = MockPages::new();
        let mut ctx = prepared(&pages, PageKind::EventsHub);
        let registry = registry();
        registry
            .dispatch("I select the event card at position 3", &mut ctx)
            .await
            .unwrap();
        let selected = ctx.event_title().map(str::to_string);
        registry
            .dispatch(
                "I click the \"View event\" button on the event card at position 3",
                &mut ctx,
            )
            .await
            .unwrap();

        let calls = pages.calls();
        let viewed = &calls.entries()[1];
        let clicked = &calls.entries()[3];
        assert_eq!(viewed.method, "view_event_by_title");
        assert_eq!(clicked.method, "click_view_event_button");
        assert_eq!(viewed.args, clicked.args);
        assert_eq!(selected.as_deref(), ctx.event_title());
    }
}

mod failure_policy {
    use super::*;
    use std::collections::HashSet;
    use std::mem;

    enum Outcome {
        Fatal(&'static str),
        Soft,
        Raw,
    }

    #[tokio::test]
    async fn test_every_phrase_applies_its_own_policy() {
        use Outcome::{Fatal, Raw, Soft};

        let registry = registry();
        let navigation = "Could not navigate to the Events Hub page. Please check the URL or connectivity.";
        let view_click = "Could not click the \"View event\" button as expected.";
        let cases: &[(PageKind, &str, &'static str, Outcome)] = &[
            (PageKind::EventsHub, "I am on the events hub page", "open", Fatal(navigation)),
            (PageKind::EventsHub, "I should see the Marquee displayed on the page", "is_element_visible", Soft),
            (PageKind::EventsHub, "I should see events displayed on the page", "verify_events_displayed", Fatal("Events are not displayed as expected on the Events Hub page.")),
            (PageKind::EventsHub, "I select the event card with title \"Firefly Community Meetup\"", "view_event_by_title", Soft),
            (PageKind::EventsHub, "I select the event card at position 2", "event_title_by_sequence", Fatal("Could not select the event card at position 2. Please ensure the event cards are loaded correctly.")),
            (PageKind::EventsHub, "the banners on the event card should be displayed correctly", "verify_banners_on_card", Soft),
            (PageKind::EventsHub, "I should see the date and time displayed correctly on the event card", "verify_date_and_time_on_card", Soft),
            (PageKind::EventsHub, "the \"View event\" button on the event card should be clickable", "verify_view_event_button", Soft),
            (PageKind::EventsHub, "I should see pagination controls", "is_element_visible", Soft),
            (PageKind::EventsHub, "the \"Next\" button should be clickable", "verify_button_is_clickable", Soft),
            (PageKind::EventsHub, "the \"Previous\" button should be clickable", "verify_button_is_clickable", Soft),
            (PageKind::EventsHub, "I should be able to click on specific page numbers", "verify_page_numbers_clickable", Soft),
            (PageKind::EventsHub, "I should see the total number of pages and results displayed", "verify_total_pages_and_results", Soft),
            (PageKind::EventsHub, "the View event button on the event card should be clickable", "click_view_event_button", Fatal(view_click)),
            (PageKind::EventsHub, "I click the \"View event\" button on the event card at position 2", "click_view_event_button", Fatal(view_click)),
            (PageKind::EventsHub, "I should navigate to the event detail page", "verify_on_event_detail_page", Fatal("Navigation to the event detail page did not happen as expected.")),
            (PageKind::EventDetail, "I should see the event details on the page", "is_element_visible", Fatal("Failed to verify event details for \"Adobe Express Creative Jam\". Browser driver error: offline")),
            (PageKind::EventDetail, "I should see the Agenda on the event details page", "is_element_visible", Soft),
            (PageKind::EventDetail, "I should see the Venue on the event details page", "is_element_visible", Soft),
            (PageKind::EventDetail, "I click the RSVP Button", "click_rsvp", Soft),
            (PageKind::EventDetail, "I sign in with AdobeID", "sign_in", Soft),
            (PageKind::SignIn, "I again click the RSVP Button", "click_rsvp", Soft),
            (PageKind::EventDetail, "I see the RSVP Form", "is_element_visible", Fatal("RSVP form not displayed as expected on the Event Details page.")),
            (PageKind::EventDetail, "I should see the event title I clicked on", "is_event_title_correct", Soft),
            (PageKind::EventDetail, "I should see my email prefilled", "is_email_correct", Raw),
            (PageKind::EventDetail, "I fill all required information", "fill_rsvp_form", Raw),
        ];

        let variants: HashSet<_> = cases
            .iter()
            .map(|(_, phrase, _, _)| mem::discriminant(&registry.resolve(phrase).unwrap()))
            .collect();
        assert_eq!(variants.len(), 25);

        let cause = PageError::driver("offline");
        for (page, phrase, method, outcome) in cases {
            let pages = MockPages::new().failing(*method, cause.clone());
            let mut ctx = prepared(&pages, *page);
            let result = registry.dispatch(phrase, &mut ctx).await;
            assert!(pages.calls().names().contains(method), "{phrase}");

            match outcome {
                Fatal(message) => {
                    let err = result.expect_err(phrase);
                    assert!(matches!(err, StepError::Fatal { .. }), "{phrase}: {err:?}");
                    assert_eq!(err.to_string(), *message, "{phrase}");
                    assert_eq!(err.page_cause(), Some(&cause), "{phrase}");
                    assert!(ctx.soft_failures().is_empty(), "{phrase}");
                }
                Soft => {
                    assert!(result.is_ok(), "{phrase}: {result:?}");
                    assert_eq!(ctx.soft_failures().len(), 1, "{phrase}");
                    assert_eq!(ctx.soft_failures().failures()[0].step, *phrase);
                }
                Raw => {
                    let err = result.expect_err(phrase);
                    assert!(
                        matches!(err, StepError::Page(ref raw) if *raw == cause),
                        "{phrase}: {err:?}"
                    );
                    assert!(ctx.soft_failures().is_empty(), "{phrase}");
                }
            }
        }
    }
}

mod fatal_and_soft {
    use super::*;

    #[tokio::test]
    async fn test_fatal_step_aborts_with_step_message() {
        let pages = MockPages::new().failing("verify_events_displayed", PageError::Timeout { ms: 5000 });
        let mut ctx = prepared(&pages, PageKind::EventsHub);
        let err = registry()
            .dispatch("I should see events displayed on the page", &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, StepError::Fatal { .. }));
        assert_eq!(
            err.to_string(),
            "Events are not displayed as expected on the Events Hub page."
        );
    }

    #[tokio::test]
    async fn test_soft_step_never_aborts() {
        let registry = registry();
        let soft = [
            ("verify_banners_on_card", "the banners on the event card should be displayed correctly"),
            ("verify_page_numbers_clickable", "I should be able to click on specific page numbers"),
            ("verify_button_is_clickable", "the \"Next\" button should be clickable"),
        ];
        for (method, phrase) in soft {
            let pages = MockPages::new().failing(method, PageError::driver("gone"));
            let mut ctx = prepared(&pages, PageKind::EventsHub);
            registry.dispatch(phrase, &mut ctx).await.unwrap();
            assert_eq!(ctx.soft_failures().len(), 1, "{phrase}");
            assert_eq!(ctx.soft_failures().failures()[0].step, phrase);
        }
    }

    #[tokio::test]
    async fn test_soft_failures_accumulate_across_scenario() {
        let pages = MockPages::new().failing("click_rsvp", PageError::not_visible("RSVP"));
        let mut ctx = prepared(&pages, PageKind::EventDetail);
        let registry = registry();
        registry.dispatch("I click the RSVP Button", &mut ctx).await.unwrap();
        registry.dispatch("I again click the RSVP Button", &mut ctx).await.unwrap();
        let summary = ctx.soft_failures().summary().unwrap();
        assert!(summary.starts_with("2 soft failure(s)"));
        assert!(summary.contains("Failed to click on RSVP Button"));
    }

    #[tokio::test]
    async fn test_fatal_and_soft_messages_differ_for_same_cause() {
        let cause = PageError::EventNotFound {
            title: "Gone".to_string(),
        };
        let pages = MockPages::with_events(["Gone"])
            .failing("view_event_by_title", cause.clone());
        let registry = registry();

        let mut soft_ctx = prepared(&pages, PageKind::EventsHub);
        registry
            .dispatch("I select the event card with title \"Gone\"", &mut soft_ctx)
            .await
            .unwrap();

        let mut fatal_ctx = prepared(&pages, PageKind::EventsHub);
        let err = registry
            .dispatch("I select the event card at position 1", &mut fatal_ctx)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not select the event card at position 1. Please ensure the event cards are loaded correctly."
        );
        assert_eq!(err.page_cause(), Some(&cause));
        assert!(fatal_ctx.soft_failures().is_empty());
        assert_eq!(soft_ctx.soft_failures().len(), 1);
    }
}

mod button_lookup {
    use super::*;

    #[tokio::test]
    async fn test_unknown_button_fails_before_page_call() {
        let pages = MockPages::new();
        let mut ctx = prepared(&pages, PageKind::EventsHub);
        let err = registry()
            .dispatch("the \"Unknown\" button should be clickable", &mut ctx)
            .await
            .unwrap_err();
        assert!(err.is_step_local());
        assert!(err.to_string().contains("\"Unknown\""));
        assert!(pages.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_locator_is_soft() {
        let pages = MockPages::new();
        let mut ctx = prepared(&pages, PageKind::EventDetail);
        registry()
            .dispatch("the \"Next\" button should be clickable", &mut ctx)
            .await
            .unwrap();
        assert!(pages.calls().is_empty());
        assert!(ctx.soft_failures().failures()[0]
            .message
            .contains("No locator defined for nextButtonSelector"));
    }
}

mod isolation {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_scenarios_do_not_share_titles() {
        let pages = MockPages::new();
        let registry = Arc::new(registry());

        let run = |position: usize| {
            let pages = pages.clone();
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let mut ctx = context(&pages);
                registry
                    .dispatch("I am on the events hub page", &mut ctx)
                    .await
                    .unwrap();
                for _ in 0..20 {
                    registry
                        .dispatch(&format!("I select the event card at position {position}"), &mut ctx)
                        .await
                        .unwrap();
                    tokio::task::yield_now().await;
                    assert_eq!(ctx.event_title(), Some(pages.events()[position - 1].as_str()));
                }
                ctx.event_title().map(str::to_string)
            })
        };

        let (first, second) = futures::join!(run(1), run(2));
        let first = first.unwrap();
        let second = second.unwrap();
        assert_eq!(first.as_deref(), Some(pages.events()[0].as_str()));
        assert_eq!(second.as_deref(), Some(pages.events()[1].as_str()));
    }
}

mod end_to_end {
    use super::*;

    #[tokio::test]
    async fn test_view_event_check_uses_title_from_position() {
        let pages = MockPages::new();
        let mut ctx = context(&pages);
        let registry = registry();
        for phrase in [
            "I am on the events hub page",
            "I select the event card at position 1",
            "the \"View event\" button on the event card should be clickable",
        ] {
            registry.dispatch(phrase, &mut ctx).await.unwrap();
        }

        let title = pages.events()[0].clone();
        assert_eq!(
            pages.calls().last(),
            Some(&Call {
                page: PageKind::EventsHub,
                method: "verify_view_event_button",
                args: vec![title],
            })
        );
        assert!(ctx.soft_failures().is_empty());
    }

    #[tokio::test]
    async fn test_event_registration_journey() {
        let pages = MockPages::new();
        let mut ctx = context(&pages);
        let registry = registry();
        for phrase in [
            "I am on the events hub page",
            "I should see events displayed on the page",
            "I click the \"View event\" button on the event card at position 2",
            "I should navigate to the event detail page",
            "I should see the event details on the page",
            "I click the RSVP Button",
            "I sign in with AdobeID",
            "I again click the RSVP Button",
            "I see the RSVP Form",
            "I should see the event title I clicked on",
            "I should see my email prefilled",
            "I fill all required information",
        ] {
            registry.dispatch(phrase, &mut ctx).await.unwrap();
        }
        assert!(ctx.soft_failures().is_empty());
        assert_eq!(pages.calls().names().last(), Some(&"fill_rsvp_form"));
        assert_eq!(
            pages.created(),
            vec![
                PageKind::EventsHub,
                PageKind::EventDetail,
                PageKind::SignIn,
                PageKind::EventDetail,
            ]
        );
    }
}
