use crate::{AppState, Effect, Msg, ProcessStatus, Timer};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // The submit control is disabled while a request is outstanding.
            if !state.status().accepts_submission() {
                return (state, Vec::new());
            }
            let url = state.input().trim().to_string();
            if url.is_empty() {
                return (state, Vec::new());
            }

            let timings = state.timings();
            let request_id = state.begin_request(url.clone());
            vec![
                Effect::RequestStructure { request_id, url },
                Effect::ScheduleTimer {
                    delay: timings.analyzing_after,
                    timer: Timer::PhaseAdvance {
                        request_id,
                        to: ProcessStatus::Analyzing,
                    },
                },
                Effect::ScheduleTimer {
                    delay: timings.structuring_after,
                    timer: Timer::PhaseAdvance {
                        request_id,
                        to: ProcessStatus::Structuring,
                    },
                },
            ]
        }
        Msg::TimerElapsed(timer) => on_timer(&mut state, timer),
        Msg::ResponseReceived { request_id } => {
            state.advance_phase(request_id, ProcessStatus::Structuring);
            Vec::new()
        }
        Msg::StructureResolved { request_id, result } => {
            if state.is_active_request(request_id) {
                match result {
                    Ok(structure) => state.complete(structure),
                    Err(message) => state.fail(message),
                }
            }
            Vec::new()
        }
        Msg::DownloadClicked => {
            if state.structure().is_none() || state.generating_export().is_some() {
                return (state, Vec::new());
            }
            let delay = state.timings().export_delay;
            let export_id = state.begin_export();
            vec![Effect::ScheduleTimer {
                delay,
                timer: Timer::ExportDue { export_id },
            }]
        }
        Msg::ExportFinished { export_id, result } => {
            if state.generating_export() != Some(export_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(path) => {
                    let delay = state.timings().downloaded_flash;
                    state.finish_export(export_id, path);
                    vec![Effect::ScheduleTimer {
                        delay,
                        timer: Timer::DownloadedFlashExpired { export_id },
                    }]
                }
                Err(message) => {
                    state.fail_export(message);
                    Vec::new()
                }
            }
        }
    };

    (state, effects)
}

fn on_timer(state: &mut AppState, timer: Timer) -> Vec<Effect> {
    match timer {
        Timer::PhaseAdvance { request_id, to } => {
            state.advance_phase(request_id, to);
            Vec::new()
        }
        Timer::ExportDue { export_id } => {
            if state.generating_export() != Some(export_id) {
                return Vec::new();
            }
            match state.structure() {
                Some(structure) => vec![Effect::ExportManual {
                    export_id,
                    structure: structure.clone(),
                }],
                None => Vec::new(),
            }
        }
        Timer::DownloadedFlashExpired { export_id } => {
            state.clear_downloaded(export_id);
            Vec::new()
        }
    }
}
