use super::DocumentRenderer;
use crate::error::{FishOpsError, Result};
use crate::models::DocumentModel;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pretty-printed JSON dump of the document model.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, doc: &DocumentModel, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| write_failure(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, doc).map_err(|e| write_failure(path, e))?;
        writer.flush().map_err(|e| write_failure(path, e))
    }
}

fn write_failure(path: &Path, e: impl std::fmt::Display) -> FishOpsError {
    FishOpsError::ReportWriteFailure(format!("{}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, Section, SectionKind, Text};

    #[test]
    fn writes_model_that_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let doc = DocumentModel {
            title: "Daily".into(),
            sections: vec![Section::new(SectionKind::Footer, None)
                .push(Block::Paragraph(Text::plain("bye")))],
        };

        JsonRenderer.render(&doc, &path).unwrap();

        let back: DocumentModel =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn small_document_on_full_device_is_an_error() {
        let doc = DocumentModel {
            title: "Daily".into(),
            sections: vec![Section::new(SectionKind::Footer, None)
                .push(Block::Paragraph(Text::plain("bye")))],
        };

        let err = JsonRenderer
            .render(&doc, Path::new("/dev/full"))
            .unwrap_err();
        assert!(matches!(err, FishOpsError::ReportWriteFailure(_)));
    }
}
