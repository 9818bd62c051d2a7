use std::fmt;
use std::path::PathBuf;

use manual_core::{ManualStructure, GENERIC_ERROR_MESSAGE};

use crate::export::ExportError;

pub type RequestId = u64;
pub type ExportId = u64;

/// Real lifecycle points reported while a structuring call runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// The service answered; the body is being parsed.
    ResponseReceived,
}

#[derive(Debug)]
pub enum EngineEvent {
    Milestone {
        request_id: RequestId,
        milestone: Milestone,
    },
    StructureCompleted {
        request_id: RequestId,
        result: Result<ManualStructure, StructuringError>,
    },
    ExportCompleted {
        export_id: ExportId,
        result: Result<PathBuf, ExportError>,
    },
}

/// The single error surfaced by the structuring client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct StructuringError {
    pub kind: FailureKind,
    pub message: String,
}

impl StructuringError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text shown in the error banner.
    pub fn user_message(&self) -> String {
        match &self.kind {
            FailureKind::InvalidInput => "Introduce una URL para analizar.".to_string(),
            FailureKind::MissingCredential => {
                "Falta la clave de API (GEMINI_API_KEY o API_KEY).".to_string()
            }
            FailureKind::MalformedResponse | FailureKind::IncompleteStructure => {
                "No se pudo estructurar el manual correctamente.".to_string()
            }
            FailureKind::Network
            | FailureKind::Timeout
            | FailureKind::HttpStatus(_)
            | FailureKind::TooLarge { .. } => {
                if self.message.trim().is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    format!(
                        "El servicio de estructuración falló ({}): {}",
                        self.kind.label_es(),
                        self.message
                    )
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    MissingCredential,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64 },
    /// Response text was not valid JSON.
    MalformedResponse,
    /// JSON parsed but required fields are missing or mistyped.
    IncompleteStructure,
}

impl FailureKind {
    /// Short Spanish name of the failure for user-facing text.
    pub fn label_es(&self) -> String {
        match self {
            FailureKind::InvalidInput => "entrada no válida".to_string(),
            FailureKind::MissingCredential => "falta la credencial".to_string(),
            FailureKind::Network => "error de red".to_string(),
            FailureKind::Timeout => "tiempo de espera agotado".to_string(),
            FailureKind::HttpStatus(code) => format!("HTTP {code}"),
            FailureKind::TooLarge { max_bytes } => {
                format!("respuesta mayor de {max_bytes} bytes")
            }
            FailureKind::MalformedResponse => "respuesta mal formada".to_string(),
            FailureKind::IncompleteStructure => "estructura incompleta".to_string(),
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidInput => write!(f, "invalid input"),
            FailureKind::MissingCredential => write!(f, "missing credential"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::IncompleteStructure => write!(f, "incomplete structure"),
        }
    }
}
