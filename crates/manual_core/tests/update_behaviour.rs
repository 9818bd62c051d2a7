use std::sync::Once;
use std::time::Duration;

use manual_core::{
    update, AppState, Chapter, Effect, ManualStructure, Msg, PageEntry, ProcessStatus, ResultView,
    Timer, GENERIC_ERROR_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(manual_logging::initialize_for_tests);
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn sample_structure() -> ManualStructure {
    ManualStructure {
        site_title: "Docs".to_string(),
        total_estimated_pages: 2,
        scraping_strategy: vec!["Sitemap".to_string()],
        chapters: vec![Chapter {
            id: "c1".to_string(),
            title: "Intro".to_string(),
            summary: "s".to_string(),
            pages: vec![PageEntry {
                title: "P1".to_string(),
                url: "https://x/1".to_string(),
                relevance: Some(0.5),
                description: None,
            }],
        }],
    }
}

fn request_ids(effects: &[Effect]) -> Vec<u64> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::RequestStructure { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .collect()
}

#[test]
fn submit_enters_discovering_and_schedules_two_advances() {
    init_logging();
    let (mut state, effects) = submit_url(AppState::new(), "  https://docs.example.com  ");

    assert_eq!(state.status(), ProcessStatus::Discovering);
    assert_eq!(state.input(), "https://docs.example.com");
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![
            Effect::RequestStructure {
                request_id: 1,
                url: "https://docs.example.com".to_string(),
            },
            Effect::ScheduleTimer {
                delay: Duration::from_millis(1500),
                timer: Timer::PhaseAdvance {
                    request_id: 1,
                    to: ProcessStatus::Analyzing,
                },
            },
            Effect::ScheduleTimer {
                delay: Duration::from_millis(3500),
                timer: Timer::PhaseAdvance {
                    request_id: 1,
                    to: ProcessStatus::Structuring,
                },
            },
        ]
    );
}

#[test]
fn empty_input_is_ignored() {
    init_logging();
    let (mut state, effects) = submit_url(AppState::new(), "   ");

    assert_eq!(state.status(), ProcessStatus::Idle);
    assert!(effects.is_empty());
    // The input edit itself still marks the view dirty.
    assert!(state.consume_dirty());
}

#[test]
fn submission_rejected_while_in_flight() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "https://a.example.com");
    assert_eq!(request_ids(&effects), vec![1]);

    let (state, effects) = submit_url(state, "https://b.example.com");
    assert!(effects.is_empty());
    assert_eq!(state.status(), ProcessStatus::Discovering);
    assert!(!state.view().submit_enabled);

    let (state, _) = update(
        state,
        Msg::TimerElapsed(Timer::PhaseAdvance {
            request_id: 1,
            to: ProcessStatus::Structuring,
        }),
    );
    let (_, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
}

#[test]
fn successful_response_completes_and_stores_structure() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://docs.example.com");
    let (state, effects) = update(
        state,
        Msg::StructureResolved {
            request_id: 1,
            result: Ok(sample_structure()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.status(), ProcessStatus::Completed);
    assert_eq!(state.structure(), Some(&sample_structure()));
    assert_eq!(state.error(), None);
    let view = state.view();
    assert!(view.submit_enabled);
    assert!(view.download.enabled);
    assert!(matches!(view.result, ResultView::Manual(_)));
    assert_eq!(view.progress.strategy, vec!["Sitemap".to_string()]);
}

#[test]
fn failed_response_moves_to_error_with_message() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://docs.example.com");
    let (state, _) = update(
        state,
        Msg::StructureResolved {
            request_id: 1,
            result: Err("No se pudo estructurar el manual correctamente.".to_string()),
        },
    );

    assert_eq!(state.status(), ProcessStatus::Error);
    assert_eq!(
        state.view().error_banner.as_deref(),
        Some("No se pudo estructurar el manual correctamente.")
    );
    assert_eq!(state.view().result, ResultView::Empty);
    assert!(!state.view().download.enabled);
}

#[test]
fn blank_error_message_falls_back_to_generic_text() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://docs.example.com");
    let (state, _) = update(
        state,
        Msg::StructureResolved {
            request_id: 1,
            result: Err("  ".to_string()),
        },
    );

    assert_eq!(state.error(), Some(GENERIC_ERROR_MESSAGE));
}

#[test]
fn resubmit_after_error_clears_error_before_discovering() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://docs.example.com");
    let (state, _) = update(
        state,
        Msg::StructureResolved {
            request_id: 1,
            result: Err("boom".to_string()),
        },
    );
    assert!(state.error().is_some());

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(request_ids(&effects), vec![2]);
    assert_eq!(state.status(), ProcessStatus::Discovering);
    assert_eq!(state.error(), None);
    assert_eq!(state.view().error_banner, None);
    assert_eq!(state.view().result, ResultView::Loading);
}

#[test]
fn resubmit_after_completion_discards_previous_structure() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://docs.example.com");
    let (state, _) = update(
        state,
        Msg::StructureResolved {
            request_id: 1,
            result: Ok(sample_structure()),
        },
    );

    let (state, effects) = submit_url(state, "https://other.example.com");
    assert_eq!(request_ids(&effects), vec![2]);
    assert_eq!(state.structure(), None);
    assert!(state.view().progress.strategy.is_empty());
    assert!(!state.view().download.enabled);
}

#[test]
fn exactly_one_request_per_accepted_submission() {
    init_logging();
    let mut state = AppState::new();
    let mut issued = Vec::new();
    for round in 1..=3u64 {
        let (next, effects) = submit_url(state, "https://docs.example.com");
        issued.extend(request_ids(&effects));
        let (next, effects) = update(next, Msg::SubmitClicked);
        assert!(request_ids(&effects).is_empty());
        let (next, _) = update(
            next,
            Msg::StructureResolved {
                request_id: round,
                result: Ok(sample_structure()),
            },
        );
        state = next;
    }
    assert_eq!(issued, vec![1, 2, 3]);
}
