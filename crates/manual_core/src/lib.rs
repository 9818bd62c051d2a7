//! Web2manual core: pure state machine, data model and view-model helpers.
mod effect;
mod msg;
mod progress;
mod state;
mod structure;
mod update;
mod view_model;

pub use effect::{Effect, Timer};
pub use msg::Msg;
pub use progress::{phase_visual, progress_view, Phase, PhaseView, PhaseVisual, ProgressView, PHASES};
pub use state::{
    AppState, DownloadState, ExportId, ProcessStatus, RequestId, Timings, GENERIC_ERROR_MESSAGE,
};
pub use structure::{clamped_relevance, Chapter, ManualStructure, PageEntry};
pub use update::update;
pub use view_model::{
    manual_view, AppViewModel, ChapterView, DownloadPhase, DownloadView, ManualView,
    PageCardView, ResultView,
};
