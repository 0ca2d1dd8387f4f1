use super::DocumentRenderer;
use crate::error::{FishOpsError, Result};
use crate::models::{Block, DocumentModel, Rgb, Section, Table, Text, TextStyle};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb as PdfRgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;
const SECTION_GAP_MM: f32 = 6.0;
const BULLET_INDENT_MM: f32 = 6.0;

/// A4 PDF output using the built-in Helvetica family.
#[derive(Debug, Clone, Copy)]
pub struct PdfRenderer {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 20.0,
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, doc: &DocumentModel, path: &Path) -> Result<()> {
        let mut writer = PageWriter::new(*self, &doc.title)?;
        for (i, section) in doc.sections.iter().enumerate() {
            if i > 0 {
                writer.gap(SECTION_GAP_MM);
            }
            writer.section(section);
        }
        tracing::debug!(pages = writer.pages, path = %path.display(), "PDF laid out");
        writer.save(path)
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let load = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| FishOpsError::ReportWriteFailure(format!("font: {}", e)))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            italic: load(BuiltinFont::HelveticaOblique)?,
            bold_italic: load(BuiltinFont::HelveticaBoldOblique)?,
        })
    }

    fn for_style(&self, style: &TextStyle) -> &IndirectFontRef {
        match (style.bold, style.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

struct PageWriter {
    geometry: PdfRenderer,
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    y: f32,
    pages: usize,
}

impl PageWriter {
    fn new(geometry: PdfRenderer, title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            sanitize(title),
            Mm(geometry.page_width_mm),
            Mm(geometry.page_height_mm),
            "Layer 1",
        );
        let fonts = Fonts::load(&doc)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            geometry,
            doc,
            layer,
            fonts,
            y: geometry.page_height_mm - geometry.margin_mm,
            pages: 1,
        })
    }

    fn usable_width(&self) -> f32 {
        self.geometry.page_width_mm - 2.0 * self.geometry.margin_mm
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// Start a new page if `height` does not fit above the bottom margin.
    fn ensure_space(&mut self, height: f32) {
        if self.y - height >= self.geometry.margin_mm {
            return;
        }
        let (page, layer) = self.doc.add_page(
            Mm(self.geometry.page_width_mm),
            Mm(self.geometry.page_height_mm),
            "Layer 1",
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.geometry.page_height_mm - self.geometry.margin_mm;
        self.pages += 1;
    }

    fn draw(&self, content: &str, style: &TextStyle, x: f32) {
        self.layer.set_fill_color(pdf_color(style.color));
        self.layer.use_text(
            sanitize(content),
            style.size,
            Mm(x),
            Mm(self.y),
            self.fonts.for_style(style),
        );
    }

    fn section(&mut self, section: &Section) {
        if let Some(heading) = &section.heading {
            self.paragraph(&Text::new(heading.as_str(), TextStyle::heading()), 0.0);
            self.gap(2.0);
        }
        for block in &section.blocks {
            match block {
                Block::Paragraph(text) => self.paragraph(text, 0.0),
                Block::List(items) => {
                    for item in items {
                        self.bullet(item);
                    }
                }
                Block::Table(table) => self.table(table),
            }
        }
    }

    fn paragraph(&mut self, text: &Text, indent: f32) {
        let height = line_height(text.style.size);
        let width = self.usable_width() - indent;
        for line in wrap(&text.content, chars_per_line(width, text.style.size)) {
            self.ensure_space(height);
            self.y -= height;
            self.draw(&line, &text.style, self.geometry.margin_mm + indent);
        }
    }

    fn bullet(&mut self, item: &Text) {
        let height = line_height(item.style.size);
        self.ensure_space(height);
        let marker_y = self.y - height;
        let marker = TextStyle {
            bold: false,
            italic: false,
            ..item.style
        };
        // The marker shares the baseline of the item's first line.
        let saved = self.y;
        self.y = marker_y;
        self.draw("-", &marker, self.geometry.margin_mm + 1.0);
        self.y = saved;
        self.paragraph(item, BULLET_INDENT_MM);
    }

    fn table(&mut self, table: &Table) {
        let weights = column_weights(table);
        let total: f32 = weights.iter().sum();
        let usable = self.usable_width();
        let widths: Vec<f32> = weights.iter().map(|w| usable * w / total).collect();

        if let Some(header) = &table.header {
            let style = TextStyle::bold().with_color(Rgb::HEADER);
            self.table_row(header, &widths, &style);
            self.gap(1.0);
        }
        let body = TextStyle::normal().with_size(11.0);
        for row in &table.rows {
            self.table_row(row, &widths, &body);
        }
    }

    fn table_row(&mut self, cells: &[String], widths: &[f32], style: &TextStyle) {
        let height = line_height(style.size);
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| wrap(cell, chars_per_line(width - 2.0, style.size)))
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

        self.ensure_space(height * lines as f32);
        for i in 0..lines {
            self.y -= height;
            let mut x = self.geometry.margin_mm;
            for (cell, width) in wrapped.iter().zip(widths) {
                if let Some(line) = cell.get(i) {
                    self.draw(line, style, x);
                }
                x += width;
            }
        }
    }

    fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            FishOpsError::ReportWriteFailure(format!("{}: {}", path.display(), e))
        })?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| FishOpsError::ReportWriteFailure(format!("{}: {}", path.display(), e)))
    }
}

fn pdf_color(color: Rgb) -> Color {
    let Rgb(r, g, b) = color;
    Color::Rgb(PdfRgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn line_height(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_SPACING
}

fn chars_per_line(width_mm: f32, size_pt: f32) -> usize {
    let glyph_mm = size_pt * PT_TO_MM * AVG_GLYPH_EM;
    ((width_mm / glyph_mm).floor() as usize).max(1)
}

fn column_weights(table: &Table) -> Vec<f32> {
    let columns = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(table.header.as_ref().map(Vec::len))
        .max()
        .unwrap_or(0);
    (0..columns)
        .map(|i| {
            table
                .column_weights
                .get(i)
                .copied()
                .filter(|w| *w > 0.0)
                .unwrap_or(1.0)
        })
        .collect()
}

/// The built-in fonts only cover ASCII reliably; everything else is dropped.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Greedy word wrap; words longer than a line are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::report::ReportComposer;
    use crate::models::{ReportKind, ReportSpec, WeatherSample};
    use chrono::{Local, TimeZone};

    #[test]
    fn sanitize_drops_symbols() {
        assert_eq!(sanitize("28.0°C"), "28.0C");
        assert_eq!(sanitize("🌊 Calm sea"), "Calm sea");
    }

    #[test]
    fn wrap_breaks_on_words() {
        let lines = wrap("Always check weather conditions before departure", 20);
        assert_eq!(
            lines,
            vec!["Always check weather", "conditions before", "departure"]
        );
        assert!(lines.iter().all(|l| l.len() <= 20));
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn column_weights_fill_missing_entries() {
        let table = Table::new(vec![2.0]).row(["a", "b", "c"]);
        assert_eq!(column_weights(&table), vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn renders_a_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let spec = ReportSpec::new(ReportKind::SafetyAssessment, dir.path());
        let at = Local.with_ymd_and_hms(2026, 10, 18, 7, 0, 0).unwrap();
        let activities: Vec<String> = (0..80).map(|i| format!("Activity {}", i)).collect();
        let doc = ReportComposer::compose(&spec, &WeatherSample::default(), &activities, at);

        PdfRenderer::default().render(&doc, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn missing_directory_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("report.pdf");
        let doc = DocumentModel {
            title: "t".into(),
            sections: Vec::new(),
        };
        assert!(matches!(
            PdfRenderer::default().render(&doc, &path),
            Err(FishOpsError::ReportWriteFailure(_))
        ));
    }
}
