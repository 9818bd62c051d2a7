use std::time::Duration;

use crate::view_model::AppViewModel;
use crate::ManualStructure;

pub type RequestId = u64;
pub type ExportId = u64;

/// Generic message shown when a failure carries no text of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Error inesperado durante el proceso.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessStatus {
    #[default]
    Idle,
    Discovering,
    Analyzing,
    Structuring,
    Completed,
    Error,
}

impl ProcessStatus {
    /// A structuring call is outstanding.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            ProcessStatus::Discovering | ProcessStatus::Analyzing | ProcessStatus::Structuring
        )
    }

    pub fn accepts_submission(self) -> bool {
        !self.is_in_flight()
    }

    /// Position in the displayed phase order; `None` for Idle and Error.
    pub fn phase_index(self) -> Option<usize> {
        match self {
            ProcessStatus::Discovering => Some(0),
            ProcessStatus::Analyzing => Some(1),
            ProcessStatus::Structuring => Some(2),
            ProcessStatus::Completed => Some(3),
            ProcessStatus::Idle | ProcessStatus::Error => None,
        }
    }
}

/// Fixed delays driving the cosmetic phases and the export action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub analyzing_after: Duration,
    pub structuring_after: Duration,
    pub export_delay: Duration,
    pub downloaded_flash: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            analyzing_after: Duration::from_millis(1500),
            structuring_after: Duration::from_millis(3500),
            export_delay: Duration::from_millis(1500),
            downloaded_flash: Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadState {
    #[default]
    Idle,
    Generating { export_id: ExportId },
    Downloaded { export_id: ExportId, path: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    input: String,
    status: ProcessStatus,
    structure: Option<ManualStructure>,
    error: Option<String>,
    active_request: Option<RequestId>,
    last_request_id: RequestId,
    download: DownloadState,
    last_export_id: ExportId,
    export_error: Option<String>,
    timings: Timings,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timings(timings: Timings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn structure(&self) -> Option<&ManualStructure> {
        self.structure.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn download(&self) -> &DownloadState {
        &self.download
    }

    pub fn export_error(&self) -> Option<&str> {
        self.export_error.as_deref()
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn active_request(&self) -> Option<RequestId> {
        self.active_request
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.dirty = true;
        }
    }

    /// Starts a fresh attempt: previous structure, error and export state are
    /// discarded and every outstanding timer or response becomes stale.
    pub(crate) fn begin_request(&mut self, url: String) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.input = url;
        self.error = None;
        self.structure = None;
        self.export_error = None;
        self.download = DownloadState::Idle;
        self.active_request = Some(request_id);
        self.status = ProcessStatus::Discovering;
        self.dirty = true;
        request_id
    }

    pub(crate) fn is_active_request(&self, request_id: RequestId) -> bool {
        self.active_request == Some(request_id) && self.status.is_in_flight()
    }

    /// Moves forward to `to` only; never backwards and never onto a terminal status.
    pub(crate) fn advance_phase(&mut self, request_id: RequestId, to: ProcessStatus) -> bool {
        if !self.is_active_request(request_id) || !to.is_in_flight() {
            return false;
        }
        match (self.status.phase_index(), to.phase_index()) {
            (Some(current), Some(next)) if next > current => {
                self.status = to;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn complete(&mut self, structure: ManualStructure) {
        self.structure = Some(structure);
        self.error = None;
        self.status = ProcessStatus::Completed;
        self.active_request = None;
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, message: String) {
        let message = if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        self.structure = None;
        self.error = Some(message);
        self.status = ProcessStatus::Error;
        self.active_request = None;
        self.dirty = true;
    }

    pub(crate) fn begin_export(&mut self) -> ExportId {
        self.last_export_id += 1;
        let export_id = self.last_export_id;
        self.download = DownloadState::Generating { export_id };
        self.export_error = None;
        self.dirty = true;
        export_id
    }

    pub(crate) fn generating_export(&self) -> Option<ExportId> {
        match self.download {
            DownloadState::Generating { export_id } => Some(export_id),
            _ => None,
        }
    }

    pub(crate) fn finish_export(&mut self, export_id: ExportId, path: String) {
        self.download = DownloadState::Downloaded { export_id, path };
        self.dirty = true;
    }

    pub(crate) fn fail_export(&mut self, message: String) {
        self.download = DownloadState::Idle;
        self.export_error = Some(message);
        self.dirty = true;
    }

    pub(crate) fn clear_downloaded(&mut self, export_id: ExportId) -> bool {
        match &self.download {
            DownloadState::Downloaded { export_id: shown, .. } if *shown == export_id => {
                self.download = DownloadState::Idle;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }
}
