use super::DocumentRenderer;
use crate::error::{FishOpsError, Result};
use crate::models::{Block, DocumentModel, Section, Table};
use std::fmt::Write as _;
use std::path::Path;

/// Plain-text rendering, used for previews on stdout and `.txt` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn to_text(&self, doc: &DocumentModel) -> String {
        let mut out = String::new();
        for (i, section) in doc.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write_section(&mut out, section);
        }
        out
    }
}

impl DocumentRenderer for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, doc: &DocumentModel, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text(doc))
            .map_err(|e| FishOpsError::ReportWriteFailure(format!("{}: {}", path.display(), e)))
    }
}

fn write_section(out: &mut String, section: &Section) {
    if let Some(heading) = &section.heading {
        let _ = writeln!(out, "{}", heading);
        let _ = writeln!(out, "{}", "-".repeat(heading.chars().count()));
    }
    for block in &section.blocks {
        match block {
            Block::Paragraph(text) => {
                let _ = writeln!(out, "{}", text.content);
            }
            Block::List(items) => {
                for item in items {
                    let _ = writeln!(out, "  - {}", item.content);
                }
            }
            Block::Table(table) => write_table(out, table),
        }
    }
}

fn write_table(out: &mut String, table: &Table) {
    let columns = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(table.header.as_ref().map(Vec::len))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for row in table.header.iter().chain(table.rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |row: &[String]| -> String {
        row.iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    if let Some(header) = &table.header {
        let _ = writeln!(out, "{}", line(header.as_slice()));
        let total = widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1);
        let _ = writeln!(out, "{}", "-".repeat(total));
    }
    for row in &table.rows {
        let _ = writeln!(out, "{}", line(row.as_slice()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::report::{ReportComposer, NO_ACTIVITIES};
    use crate::models::{ReportKind, ReportSpec, WeatherSample};
    use chrono::{Local, TimeZone};

    fn doc() -> DocumentModel {
        let spec = ReportSpec::new(ReportKind::Comprehensive, "/tmp").with_username("ravi");
        let at = Local.with_ymd_and_hms(2026, 10, 18, 6, 30, 0).unwrap();
        ReportComposer::compose(&spec, &WeatherSample::default(), &[], at)
    }

    #[test]
    fn preview_contains_headings_and_cells() {
        let text = TextRenderer.to_text(&doc());
        assert!(text.starts_with("Smart Fisheries Management System - Comprehensive Report\n"));
        assert!(text.contains("User Information\n----------------\n"));
        assert!(text.contains("Username:          ravi"));
        assert!(text.contains("SAFE FOR FISHING"));
        assert!(text.contains(NO_ACTIVITIES));
        assert!(text.contains("  - Always wear appropriate safety gear and life jackets"));
    }

    #[test]
    fn table_columns_align() {
        let table = Table::new(vec![1.0, 1.0])
            .with_header(&["Parameter", "Status"])
            .row(["Wave", "Good"])
            .row(["Visibility", "Excellent"]);
        let mut out = String::new();
        write_table(&mut out, &table);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Parameter   Status");
        assert_eq!(lines[1], "---------------------");
        assert_eq!(lines[2], "Wave        Good");
        assert_eq!(lines[3], "Visibility  Excellent");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.txt");
        TextRenderer.render(&doc(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, TextRenderer.to_text(&doc()));
    }
}
