//! Web2manual engine: structuring client, export and effect execution.
mod client;
mod engine;
mod export;
mod persist;
mod prompt;
mod types;
mod validate;

pub use client::{
    generate_content_endpoint, ClientSettings, GeminiClient, NoProgress, ProgressSink,
    StructuringClient, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use export::{
    manual_filename, manual_text, write_manual_export, ExportError, ExportSummary, EXPORT_SUFFIX,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use prompt::{instruction, request_body, response_schema};
pub use types::{EngineEvent, ExportId, FailureKind, Milestone, RequestId, StructuringError};
pub use validate::{extract_response_text, parse_service_error, parse_structure};
