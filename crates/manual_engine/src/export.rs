//! Plain-text export of a manual structure.
//!
//! The file keeps the `.pdf.txt` suffix users know from the download button,
//! but its content is the flat text layout built by [`manual_text`].

use std::path::{Path, PathBuf};

use manual_core::ManualStructure;

use crate::persist::{AtomicFileWriter, PersistError};

pub const EXPORT_SUFFIX: &str = "_Manual.pdf.txt";
/// Longest title stem kept in a filename, in bytes.
const MAX_STEM_BYTES: usize = 80;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_path: PathBuf,
    pub chapter_count: usize,
    pub page_count: usize,
    pub byte_len: u64,
}

/// Flat text document: title line, strategy line, then one block per chapter.
pub fn manual_text(structure: &ManualStructure) -> String {
    let mut text = format!(
        "MANUAL: {}\nEstrategia de Scraping: {}\n\n",
        structure.site_title,
        structure.scraping_strategy.join(", ")
    );

    let chapters: Vec<String> = structure
        .chapters
        .iter()
        .enumerate()
        .map(|(idx, chapter)| {
            let pages: Vec<String> = chapter
                .pages
                .iter()
                .map(|page| format!("- {} ({})", page.title, page.url))
                .collect();
            format!(
                "CAPÍTULO {}: {}\nResumen: {}\nPáginas:\n{}",
                idx + 1,
                chapter.title,
                chapter.summary,
                pages.join("\n")
            )
        })
        .collect();
    text.push_str(&chapters.join("\n\n"));
    text
}

/// `{site title, whitespace runs as '_'}_Manual.pdf.txt`, with the title part
/// capped at `MAX_STEM_BYTES`.
pub fn manual_filename(site_title: &str) -> String {
    let mut stem = String::with_capacity(site_title.len());
    let mut in_whitespace = false;
    for c in site_title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        stem.push(if is_forbidden(c) { '_' } else { c });
    }
    truncate_on_char_boundary(&mut stem, MAX_STEM_BYTES);
    format!("{stem}{EXPORT_SUFFIX}")
}

fn truncate_on_char_boundary(text: &mut String, max_bytes: usize) {
    if text.len() <= max_bytes {
        return;
    }
    let cut = text
        .char_indices()
        .map(|(idx, _)| idx)
        .take_while(|idx| *idx <= max_bytes)
        .last()
        .unwrap_or(0);
    text.truncate(cut);
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

pub fn write_manual_export(
    output_dir: &Path,
    structure: &ManualStructure,
) -> Result<ExportSummary, ExportError> {
    let content = manual_text(structure);
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let output_path = writer.write(&manual_filename(&structure.site_title), &content)?;

    Ok(ExportSummary {
        output_path,
        chapter_count: structure.chapter_count(),
        page_count: structure.page_count(),
        byte_len: content.len() as u64,
    })
}
