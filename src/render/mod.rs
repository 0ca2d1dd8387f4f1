pub mod json;
pub mod pdf;
pub mod text;

pub use json::JsonRenderer;
pub use pdf::PdfRenderer;
pub use text::TextRenderer;

use crate::error::Result;
use crate::models::DocumentModel;
use std::path::Path;

/// Turns a composed document into a file.
pub trait DocumentRenderer: Send + Sync {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, doc: &DocumentModel, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Text,
    Json,
}

impl OutputFormat {
    pub fn renderer(&self) -> Box<dyn DocumentRenderer> {
        match self {
            OutputFormat::Pdf => Box::new(PdfRenderer::default()),
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}
