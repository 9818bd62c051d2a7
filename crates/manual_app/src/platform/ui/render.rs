use std::fmt::Write as _;

use manual_core::{
    AppViewModel, DownloadPhase, ManualView, PageCardView, PhaseVisual, ProcessStatus, ResultView,
};

const BAR_CELLS: usize = 10;

/// Rendered text, one block per screen area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub progress: String,
    pub banner: String,
    pub result: String,
    pub footer: String,
}

impl Frame {
    pub fn sections(&self) -> [&str; 4] {
        [&self.progress, &self.banner, &self.result, &self.footer]
    }
}

pub fn render(view: &AppViewModel) -> Frame {
    Frame {
        progress: render_progress(view),
        banner: render_banner(view),
        result: render_result(&view.result),
        footer: render_footer(view),
    }
}

fn render_progress(view: &AppViewModel) -> String {
    let mut out = String::from("Monitor de Proceso\n");
    for phase in &view.progress.phases {
        let marker = if phase.current { " <" } else { "" };
        let _ = writeln!(
            out,
            "  {} {} ({}){}",
            phase_icon(phase.visual),
            phase.label,
            phase.detail,
            marker
        );
    }
    if !view.progress.strategy.is_empty() {
        out.push_str("Estrategia aplicada\n");
        for item in &view.progress.strategy {
            let _ = writeln!(out, "  * {item}");
        }
    }
    out
}

fn phase_icon(visual: PhaseVisual) -> &'static str {
    match visual {
        PhaseVisual::Done => "[x]",
        PhaseVisual::Active => "[~]",
        PhaseVisual::Pending | PhaseVisual::Neutral => "[ ]",
    }
}

fn render_banner(view: &AppViewModel) -> String {
    let mut out = String::new();
    if let Some(error) = &view.error_banner {
        let _ = writeln!(out, "! {error}");
    }
    if let Some(error) = &view.export_error {
        let _ = writeln!(out, "! {error}");
    }
    out
}

fn render_result(result: &ResultView) -> String {
    match result {
        ResultView::Placeholder => {
            "Listo para escanear. Introduce una URL para comenzar el análisis.\n".to_string()
        }
        ResultView::Loading => "Analizando estructura lógica...\n".to_string(),
        ResultView::Manual(manual) => render_manual(manual),
        ResultView::Empty => String::new(),
    }
}

fn render_manual(manual: &ManualView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", manual.site_title);
    let _ = writeln!(
        out,
        "Estructura de manual generada (~{} páginas estimadas)",
        manual.estimated_pages
    );
    for chapter in &manual.chapters {
        let _ = writeln!(out, "\n{}. {}", chapter.number, chapter.title);
        if !chapter.summary.is_empty() {
            let _ = writeln!(out, "   {}", chapter.summary);
        }
        for page in &chapter.pages {
            render_page(&mut out, page);
        }
    }
    let _ = writeln!(
        out,
        "\nCapítulos: {} | Fuentes: {} | Formato: texto",
        manual.chapter_count, manual.source_count
    );
    out
}

fn render_page(out: &mut String, page: &PageCardView) {
    let _ = writeln!(
        out,
        "   - {} {} {:>3.0}%",
        page.title,
        relevance_bar(page.relevance_percent),
        page.relevance_percent
    );
    if let Some(description) = &page.description {
        let _ = writeln!(out, "     {description}");
    }
    let _ = writeln!(out, "     {}", page.url);
}

/// Fixed-width bar; `percent` is expected in `[0, 100]` and clamped anyway.
pub fn relevance_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn render_footer(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.status == ProcessStatus::Completed {
        let hint = if view.download.enabled {
            " (escribe `descargar`)"
        } else {
            ""
        };
        let _ = writeln!(out, "{}{}", view.download.label, hint);
        if let (DownloadPhase::Downloaded, Some(path)) =
            (view.download.phase, &view.download.saved_path)
        {
            let _ = writeln!(out, "Guardado en {path}");
        }
    }
    if !view.submit_enabled {
        out.push_str("Solicitud en curso...\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use manual_core::{update, AppState, Chapter, ManualStructure, Msg, PageEntry};

    fn completed_view() -> AppViewModel {
        let structure = ManualStructure {
            site_title: "Docs".to_string(),
            total_estimated_pages: 4,
            scraping_strategy: vec!["Sitemap".to_string()],
            chapters: vec![Chapter {
                id: "c1".to_string(),
                title: "Intro".to_string(),
                summary: "Primeros pasos".to_string(),
                pages: vec![PageEntry {
                    title: "Inicio".to_string(),
                    url: "https://d/1".to_string(),
                    relevance: Some(1.7),
                    description: Some("Portada".to_string()),
                }],
            }],
        };
        let (state, _) = update(AppState::new(), Msg::InputChanged("https://d".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::StructureResolved {
                request_id: 1,
                result: Ok(structure),
            },
        );
        state.view()
    }

    #[test]
    fn bar_is_clamped_to_its_width() {
        assert_eq!(relevance_bar(-50.0), "[..........]");
        assert_eq!(relevance_bar(50.0), "[#####.....]");
        assert_eq!(relevance_bar(170.0), "[##########]");
    }

    #[test]
    fn completed_frame_lists_chapters_pages_and_strategy() {
        let frame = render(&completed_view());

        assert!(frame.progress.contains("[x] Manual generado (Finalizado con éxito) <"));
        assert!(frame.progress.contains("  * Sitemap"));
        assert!(frame.banner.is_empty());
        assert!(frame.result.contains("~4 páginas estimadas"));
        assert!(frame.result.contains("1. Intro"));
        assert!(frame.result.contains("- Inicio [##########] 100%"));
        assert!(frame.result.contains("https://d/1"));
        assert!(frame.result.contains("Capítulos: 1 | Fuentes: 1"));
        assert!(frame.footer.starts_with("Descargar PDF Completo"));
    }

    #[test]
    fn idle_frame_shows_placeholder() {
        let frame = render(&AppState::new().view());
        assert!(frame.result.starts_with("Listo para escanear"));
        assert!(frame.progress.contains("[ ] Descubrimiento de URLs (Esperando...)"));
        assert!(frame.footer.is_empty());
    }

    #[test]
    fn error_frame_shows_banner_and_no_result() {
        let (state, _) = update(AppState::new(), Msg::InputChanged("https://d".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::StructureResolved {
                request_id: 1,
                result: Err("fallo".to_string()),
            },
        );
        let frame = render(&state.view());
        assert_eq!(frame.banner, "! fallo\n");
        assert!(frame.result.is_empty());
    }
}
