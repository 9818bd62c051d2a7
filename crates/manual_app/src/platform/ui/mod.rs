pub mod render;

use std::io::{self, Write};

use manual_core::AppViewModel;

use render::{render, Frame};

/// Writes frames to a terminal stream, skipping sections that did not change.
pub struct TerminalRenderer<W: Write> {
    out: W,
    last: Option<Frame>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn draw(&mut self, view: &AppViewModel) -> io::Result<()> {
        let frame = render(view);
        let first = self.last.is_none();
        let previous = self.last.take().unwrap_or_default();

        let changed: Vec<&str> = frame
            .sections()
            .into_iter()
            .zip(previous.sections())
            .filter(|(now, before)| !now.is_empty() && (first || now != before))
            .map(|(now, _)| now)
            .collect();

        if !changed.is_empty() {
            if !first {
                writeln!(self.out)?;
            }
            for section in changed {
                write!(self.out, "{section}")?;
            }
            self.out.flush()?;
        }
        self.last = Some(frame);
        Ok(())
    }

    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manual_core::{update, AppState, Msg};

    #[test]
    fn unchanged_view_prints_nothing_the_second_time() {
        let view = AppState::new().view();
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.draw(&view).unwrap();
        let first_len = renderer.out.len();
        assert!(first_len > 0);

        renderer.draw(&view).unwrap();
        assert_eq!(renderer.into_inner().len(), first_len);
    }

    #[test]
    fn only_changed_sections_are_written() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let (state, _) = update(AppState::new(), Msg::InputChanged("https://d".into()));
        renderer.draw(&state.view()).unwrap();
        let before = renderer.out.len();

        let (state, _) = update(state, Msg::SubmitClicked);
        renderer.draw(&state.view()).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let appended = &out[before..];
        assert!(appended.contains("Descubrimiento de URLs (En curso...)"));
        assert!(appended.contains("Analizando estructura lógica..."));
        assert!(!appended.contains("Listo para escanear"));
    }
}
