use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use manual_core::ManualStructure;
use manual_logging::{manual_info, manual_warn};

use crate::client::{ProgressSink, StructuringClient};
use crate::export::write_manual_export;
use crate::{EngineEvent, ExportId, Milestone, RequestId};

/// Receives every event the engine produces.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    RequestStructure {
        request_id: RequestId,
        url: String,
    },
    Export {
        export_id: ExportId,
        structure: ManualStructure,
    },
}

/// Handle to the engine thread. Commands run concurrently on a Tokio runtime
/// owned by that thread; dropping every handle stops it.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        client: Arc<dyn StructuringClient>,
        output_dir: PathBuf,
        events: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let events = events.clone();
                let output_dir = output_dir.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), &output_dir, command, events).await;
                });
            }
        });

        Ok(Self { cmd_tx })
    }

    pub fn request_structure(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::RequestStructure {
            request_id,
            url: url.into(),
        });
    }

    pub fn export(&self, export_id: ExportId, structure: ManualStructure) {
        let _ = self.cmd_tx.send(EngineCommand::Export {
            export_id,
            structure,
        });
    }
}

/// Tags milestones of one call with its request id.
struct RequestProgress {
    request_id: RequestId,
    events: Arc<dyn EventSink>,
}

impl ProgressSink for RequestProgress {
    fn milestone(&self, milestone: Milestone) {
        self.events.emit(EngineEvent::Milestone {
            request_id: self.request_id,
            milestone,
        });
    }
}

async fn handle_command(
    client: &dyn StructuringClient,
    output_dir: &std::path::Path,
    command: EngineCommand,
    events: Arc<dyn EventSink>,
) {
    match command {
        EngineCommand::RequestStructure { request_id, url } => {
            let progress = RequestProgress {
                request_id,
                events: events.clone(),
            };
            let result = client.request_structure(&url, &progress).await;
            match &result {
                Ok(structure) => manual_info!(
                    "Request {} structured: {} chapters, {} pages",
                    request_id,
                    structure.chapter_count(),
                    structure.page_count()
                ),
                Err(err) => manual_warn!("Request {} failed: {}", request_id, err),
            }
            events.emit(EngineEvent::StructureCompleted { request_id, result });
        }
        EngineCommand::Export {
            export_id,
            structure,
        } => {
            let result = write_manual_export(output_dir, &structure).map(|summary| {
                manual_info!(
                    "Export {} written to {:?} ({} bytes)",
                    export_id,
                    summary.output_path,
                    summary.byte_len
                );
                summary.output_path
            });
            if let Err(err) = &result {
                manual_warn!("Export {} failed: {}", export_id, err);
            }
            events.emit(EngineEvent::ExportCompleted { export_id, result });
        }
    }
}
