//! Renderer-agnostic report content.
//!
//! A `DocumentModel` is an ordered list of sections, each holding paragraphs,
//! tables and bullet lists with simple styling. Renderers in `crate::render`
//! turn it into files; nothing here knows about page geometry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const HEADER: Rgb = Rgb(59, 130, 246);
    pub const ACCENT: Rgb = Rgb(16, 185, 129);
    pub const TEXT: Rgb = Rgb(31, 41, 55);
    pub const DANGER: Rgb = Rgb(239, 68, 68);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Rgb,
}

impl TextStyle {
    pub fn normal() -> Self {
        Self {
            size: 12.0,
            bold: false,
            italic: false,
            color: Rgb::TEXT,
        }
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::normal()
        }
    }

    pub fn title() -> Self {
        Self {
            size: 18.0,
            bold: true,
            italic: false,
            color: Rgb::HEADER,
        }
    }

    pub fn heading() -> Self {
        Self {
            size: 16.0,
            bold: true,
            italic: false,
            color: Rgb::HEADER,
        }
    }

    pub fn small() -> Self {
        Self {
            size: 10.0,
            bold: false,
            italic: false,
            color: Rgb::GRAY,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            italic: true,
            color: Rgb::GRAY,
            ..Self::normal()
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::normal()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    pub style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, TextStyle::normal())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
    /// Relative column widths; one entry per column.
    pub column_weights: Vec<f32>,
}

impl Table {
    pub fn new(column_weights: Vec<f32>) -> Self {
        Self {
            header: None,
            rows: Vec::new(),
            column_weights,
        }
    }

    pub fn with_header(mut self, header: &[&str]) -> Self {
        self.header = Some(header.iter().map(|h| h.to_string()).collect());
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Text),
    Table(Table),
    List(Vec<Text>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Header,
    UserInfo,
    Weather,
    MarineAssessment,
    Recommendations,
    Activities,
    SafetyGuidelines,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: Option<String>,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(kind: SectionKind, heading: Option<&str>) -> Self {
        Self {
            kind,
            heading: heading.map(str::to_string),
            blocks: Vec::new(),
        }
    }

    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Text> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(t) => Some(t),
            _ => None,
        })
    }

    pub fn list_items(&self) -> impl Iterator<Item = &Text> {
        self.blocks.iter().flat_map(|b| match b {
            Block::List(items) => items.as_slice(),
            _ => &[],
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }
}

pub const SAFE_VERDICT: &str = "SAFE FOR FISHING";
pub const CAUTION_VERDICT: &str = "USE CAUTION";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub title: String,
    pub sections: Vec<Section>,
}

impl DocumentModel {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.section(kind).is_some()
    }

    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }

    /// Read the safety verdict back from the marine assessment section.
    pub fn marine_verdict(&self) -> Option<bool> {
        self.section(SectionKind::MarineAssessment)?
            .paragraphs()
            .find_map(|p| match p.content.as_str() {
                SAFE_VERDICT => Some(true),
                CAUTION_VERDICT => Some(false),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_builder_collects_rows() {
        let table = Table::new(vec![1.0, 2.0])
            .with_header(&["Field", "Value"])
            .row(["Username:", "ana"])
            .row(["System:", "v1"]);
        assert_eq!(table.column_weights.len(), 2);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.header.as_ref().unwrap()[1], "Value");
    }

    #[test]
    fn marine_verdict_reads_paragraph() {
        let doc = DocumentModel {
            title: "t".into(),
            sections: vec![Section::new(SectionKind::MarineAssessment, Some("Marine"))
                .push(Block::Paragraph(Text::plain(CAUTION_VERDICT)))],
        };
        assert_eq!(doc.marine_verdict(), Some(false));

        let empty = DocumentModel {
            title: "t".into(),
            sections: Vec::new(),
        };
        assert_eq!(empty.marine_verdict(), None);
    }
}
