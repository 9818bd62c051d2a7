use crate::progress::{progress_view, ProgressView};
use crate::{clamped_relevance, AppState, DownloadState, ManualStructure, ProcessStatus};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub status: ProcessStatus,
    pub submit_enabled: bool,
    pub error_banner: Option<String>,
    pub progress: ProgressView,
    pub result: ResultView,
    pub download: DownloadView,
    pub export_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultView {
    /// Nothing submitted yet.
    #[default]
    Placeholder,
    /// Indeterminate progress indicator only.
    Loading,
    Manual(ManualView),
    /// Failed run: no partial structure is shown.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManualView {
    pub site_title: String,
    pub estimated_pages: u64,
    pub chapters: Vec<ChapterView>,
    pub chapter_count: usize,
    pub source_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterView {
    /// 1-based position in reading order.
    pub number: usize,
    pub id: String,
    pub title: String,
    pub summary: String,
    pub pages: Vec<PageCardView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageCardView {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    /// Bar width in percent, always within `[0, 100]`.
    pub relevance_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadPhase {
    #[default]
    Ready,
    Generating,
    Downloaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadView {
    pub enabled: bool,
    pub phase: DownloadPhase,
    pub label: &'static str,
    pub saved_path: Option<String>,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let status = state.status();
        let structure = state.structure();

        let result = match status {
            ProcessStatus::Idle => ResultView::Placeholder,
            ProcessStatus::Error => ResultView::Empty,
            _ if status.is_in_flight() => ResultView::Loading,
            _ => match structure {
                Some(structure) => ResultView::Manual(manual_view(structure)),
                None => ResultView::Empty,
            },
        };

        Self {
            input: state.input().to_string(),
            status,
            submit_enabled: status.accepts_submission(),
            error_banner: state.error().map(ToOwned::to_owned),
            progress: progress_view(status, structure.map(|s| s.scraping_strategy.as_slice())),
            result,
            download: download_view(state.download(), structure.is_some()),
            export_error: state.export_error().map(ToOwned::to_owned),
        }
    }
}

pub fn manual_view(structure: &ManualStructure) -> ManualView {
    let chapters = structure
        .chapters
        .iter()
        .enumerate()
        .map(|(idx, chapter)| ChapterView {
            number: idx + 1,
            id: chapter.id.clone(),
            title: chapter.title.clone(),
            summary: chapter.summary.clone(),
            pages: chapter
                .pages
                .iter()
                .map(|page| PageCardView {
                    title: page.title.clone(),
                    description: page.description.clone().filter(|d| !d.is_empty()),
                    url: page.url.clone(),
                    relevance_percent: clamped_relevance(page.relevance) * 100.0,
                })
                .collect(),
        })
        .collect();

    ManualView {
        site_title: structure.site_title.clone(),
        estimated_pages: structure.total_estimated_pages,
        chapters,
        chapter_count: structure.chapter_count(),
        source_count: structure.page_count(),
    }
}

fn download_view(download: &DownloadState, has_structure: bool) -> DownloadView {
    match download {
        DownloadState::Idle => DownloadView {
            enabled: has_structure,
            phase: DownloadPhase::Ready,
            label: "Descargar PDF Completo",
            saved_path: None,
        },
        DownloadState::Generating { .. } => DownloadView {
            enabled: false,
            phase: DownloadPhase::Generating,
            label: "Generando...",
            saved_path: None,
        },
        DownloadState::Downloaded { path, .. } => DownloadView {
            enabled: has_structure,
            phase: DownloadPhase::Downloaded,
            label: "¡Descargado!",
            saved_path: Some(path.clone()),
        },
    }
}
