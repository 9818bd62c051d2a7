use std::time::Duration;

use crate::{ExportId, ManualStructure, ProcessStatus, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue one structuring call for `url`.
    RequestStructure { request_id: RequestId, url: String },
    /// Deliver `Msg::TimerElapsed(timer)` after `delay`.
    ScheduleTimer { delay: Duration, timer: Timer },
    /// Format and save `structure` as the text export.
    ExportManual {
        export_id: ExportId,
        structure: ManualStructure,
    },
}

/// Timers carry the generation they belong to so stale ones can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    PhaseAdvance {
        request_id: RequestId,
        to: ProcessStatus,
    },
    ExportDue { export_id: ExportId },
    DownloadedFlashExpired { export_id: ExportId },
}
