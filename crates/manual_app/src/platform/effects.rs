use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use manual_core::{Effect, Msg};
use manual_engine::{EngineEvent, EngineHandle, EventSink, Milestone, StructuringClient};
use manual_logging::{manual_debug, manual_info};

use super::app::AppEvent;

/// Executes effects returned by `update`: engine commands and timers.
pub struct EffectRunner {
    engine: EngineHandle,
    tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        client: Arc<dyn StructuringClient>,
        output_dir: PathBuf,
        tx: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let sink = Arc::new(MsgSink { tx: tx.clone() });
        let engine = EngineHandle::new(client, output_dir, sink)?;
        Ok(Self { engine, tx })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestStructure { request_id, url } => {
                    manual_info!(
                        "RequestStructure request_id={} url_len={} url={}",
                        request_id,
                        url.len(),
                        url
                    );
                    self.engine.request_structure(request_id, url);
                }
                Effect::ScheduleTimer { delay, timer } => {
                    manual_debug!("ScheduleTimer {:?} in {:?}", timer, delay);
                    let tx = self.tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = tx.send(AppEvent::Ui(Msg::TimerElapsed(timer)));
                    });
                }
                Effect::ExportManual {
                    export_id,
                    structure,
                } => {
                    manual_info!(
                        "ExportManual export_id={} title={}",
                        export_id,
                        structure.site_title
                    );
                    self.engine.export(export_id, structure);
                }
            }
        }
    }
}

/// Turns engine events into messages for the update loop.
struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Ui(map_event(event)));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Milestone {
            request_id,
            milestone: Milestone::ResponseReceived,
        } => Msg::ResponseReceived { request_id },
        EngineEvent::StructureCompleted { request_id, result } => Msg::StructureResolved {
            request_id,
            result: result.map_err(|err| err.user_message()),
        },
        EngineEvent::ExportCompleted { export_id, result } => Msg::ExportFinished {
            export_id,
            result: result
                .map(|path| path.display().to_string())
                .map_err(|err| format!("No se pudo guardar el manual: {err}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manual_engine::parse_structure;

    #[test]
    fn structuring_errors_become_user_messages() {
        let err = parse_structure(Some("nope")).unwrap_err();
        let msg = map_event(EngineEvent::StructureCompleted {
            request_id: 4,
            result: Err(err),
        });
        assert_eq!(
            msg,
            Msg::StructureResolved {
                request_id: 4,
                result: Err("No se pudo estructurar el manual correctamente.".to_string()),
            }
        );
    }

    #[test]
    fn milestone_maps_to_response_received() {
        let msg = map_event(EngineEvent::Milestone {
            request_id: 2,
            milestone: Milestone::ResponseReceived,
        });
        assert_eq!(msg, Msg::ResponseReceived { request_id: 2 });
    }

    #[test]
    fn export_path_is_displayed() {
        let msg = map_event(EngineEvent::ExportCompleted {
            export_id: 1,
            result: Ok(PathBuf::from("out").join("A_Manual.pdf.txt")),
        });
        match msg {
            Msg::ExportFinished { export_id, result } => {
                assert_eq!(export_id, 1);
                assert!(result.unwrap().ends_with("A_Manual.pdf.txt"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
