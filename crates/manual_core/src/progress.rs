//! Progress display: the four fixed phases and how each one looks for a
//! given process status.

use crate::ProcessStatus;

/// A displayed phase of an active request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub status: ProcessStatus,
    pub label: &'static str,
}

pub const PHASES: [Phase; 4] = [
    Phase {
        status: ProcessStatus::Discovering,
        label: "Descubrimiento de URLs",
    },
    Phase {
        status: ProcessStatus::Analyzing,
        label: "Análisis del sitio",
    },
    Phase {
        status: ProcessStatus::Structuring,
        label: "Jerarquización por IA",
    },
    Phase {
        status: ProcessStatus::Completed,
        label: "Manual generado",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseVisual {
    Done,
    Active,
    Pending,
    /// Every phase after a failed run.
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseView {
    pub label: &'static str,
    pub visual: PhaseVisual,
    /// Highlighted when the phase is exactly the current status.
    pub current: bool,
    pub detail: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub phases: Vec<PhaseView>,
    /// Strategy lines as returned by the service, verbatim.
    pub strategy: Vec<String>,
}

pub fn phase_visual(phase: ProcessStatus, status: ProcessStatus) -> PhaseVisual {
    match status {
        ProcessStatus::Error => PhaseVisual::Neutral,
        ProcessStatus::Completed => PhaseVisual::Done,
        _ => {
            let Some(index) = phase.phase_index() else {
                return PhaseVisual::Pending;
            };
            match status.phase_index() {
                Some(current) if index < current => PhaseVisual::Done,
                Some(current) if index == current => PhaseVisual::Active,
                _ => PhaseVisual::Pending,
            }
        }
    }
}

fn phase_detail(visual: PhaseVisual, status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Error => "Error en proceso",
        ProcessStatus::Completed => "Finalizado con éxito",
        _ => match visual {
            PhaseVisual::Done => "Completado",
            PhaseVisual::Active => "En curso...",
            PhaseVisual::Pending | PhaseVisual::Neutral => "Esperando...",
        },
    }
}

pub fn progress_view(status: ProcessStatus, strategy: Option<&[String]>) -> ProgressView {
    let phases = PHASES
        .iter()
        .map(|phase| {
            let visual = phase_visual(phase.status, status);
            PhaseView {
                label: phase.label,
                visual,
                current: phase.status == status,
                detail: phase_detail(visual, status),
            }
        })
        .collect();

    ProgressView {
        phases,
        strategy: strategy.map(<[String]>::to_vec).unwrap_or_default(),
    }
}
