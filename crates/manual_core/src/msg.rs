use crate::{ExportId, ManualStructure, RequestId, Timer};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// User submitted the current URL input.
    SubmitClicked,
    /// A timer scheduled through `Effect::ScheduleTimer` fired.
    TimerElapsed(Timer),
    /// The service answered and the body is being parsed.
    ResponseReceived { request_id: RequestId },
    /// The structuring call finished; errors are already user-facing text.
    StructureResolved {
        request_id: RequestId,
        result: Result<ManualStructure, String>,
    },
    /// User clicked the download action.
    DownloadClicked,
    /// Engine finished writing the export; `Ok` carries the written path.
    ExportFinished {
        export_id: ExportId,
        result: Result<String, String>,
    },
}
