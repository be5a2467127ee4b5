//! Document sink abstraction
//!
//! The report orchestrator never renders anything itself; it replays its
//! actions as typed append commands against a [`DocumentSink`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::nested_list::NestedList;
use crate::numbering::HeadingLevel;

// ============================================================
// Error Types
// ============================================================

/// Error type for sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("File not found: {0} (also looked in the fallback directory)")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SinkError>;

// ============================================================
// List Styles
// ============================================================

/// Marker style of a list level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `–` dash bullets
    Bullet,
    /// Cyrillic letters `а)`, `б)`, ... in code-point order
    Lettered,
    /// `1)`, `2)`, ...
    Numeric,
}

impl ListStyle {
    /// Style used `depth` levels below this one
    ///
    /// Lettered lists rotate lettered → numeric → bullet on nested levels;
    /// numeric and bullet lists keep their style at every depth.
    pub fn at_depth(&self, depth: usize) -> ListStyle {
        const ROTATION: [ListStyle; 3] = [ListStyle::Lettered, ListStyle::Numeric, ListStyle::Bullet];
        match self {
            ListStyle::Lettered => ROTATION[depth % ROTATION.len()],
            ListStyle::Numeric | ListStyle::Bullet => *self,
        }
    }

    /// Marker for the item at zero-based `index`
    pub fn marker(&self, index: usize) -> String {
        match self {
            ListStyle::Bullet => "–".to_string(),
            ListStyle::Lettered => {
                // 'а' (U+0430) through the 32 letters of the basic block
                let letter = char::from_u32(0x0430 + (index % 32) as u32).unwrap_or('а');
                format!("{})", letter)
            }
            ListStyle::Numeric => format!("{})", index + 1),
        }
    }
}

// ============================================================
// Sink Trait
// ============================================================

/// Receiver of rendered report content
pub trait DocumentSink {
    /// Heading; an empty label means an unnumbered title
    fn append_heading(&mut self, level: HeadingLevel, numbered_label: &str, text: &str) -> Result<()>;

    fn append_paragraph(&mut self, text: &str) -> Result<()>;

    fn append_blank_line(&mut self) -> Result<()>;

    fn append_list(&mut self, description: &str, items: &NestedList, style: ListStyle) -> Result<()>;

    /// Fails with [`SinkError::NotFound`] when the image cannot be resolved
    fn append_image(&mut self, path: &Path, caption: &str) -> Result<()>;

    fn append_code_listing(&mut self, source_text: &str, caption: &str) -> Result<()>;

    fn append_table(&mut self, description: &str, rows: &[Vec<String>], numbered_label: &str) -> Result<()>;

    fn append_page_break(&mut self) -> Result<()>;

    fn append_bibliography(&mut self, entries: &BTreeMap<usize, String>) -> Result<()>;

    /// Write the document and return the path written
    fn persist(&mut self, destination: &Path) -> Result<PathBuf>;
}

// ============================================================
// Asset Resolution
// ============================================================

/// Resolve `path`, falling back to `fallback_dir/<file name>`
pub fn resolve_asset(path: &Path, fallback_dir: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    if let Some(name) = path.file_name() {
        let candidate = fallback_dir.join(name);
        if candidate.exists() {
            log::warn!(
                "{} not found, using {}",
                path.display(),
                candidate.display()
            );
            return Ok(candidate);
        }
    }

    Err(SinkError::NotFound(path.to_path_buf()))
}

// ============================================================
// In-memory Sink
// ============================================================

/// A command received by [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCommand {
    Heading {
        level: HeadingLevel,
        label: String,
        text: String,
    },
    Paragraph(String),
    BlankLine,
    List {
        description: String,
        items: NestedList,
        style: ListStyle,
    },
    Image {
        path: PathBuf,
        caption: String,
    },
    CodeListing {
        source: String,
        caption: String,
    },
    Table {
        description: String,
        rows: Vec<Vec<String>>,
        label: String,
    },
    PageBreak,
    Bibliography(BTreeMap<usize, String>),
}

/// Sink that records commands instead of rendering them
#[derive(Debug, Default)]
pub struct MemorySink {
    commands: Vec<SinkCommand>,
    image_dir: PathBuf,
    persisted: Option<PathBuf>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that resolves images against `image_dir` like a real renderer
    pub fn with_image_dir(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[SinkCommand] {
        &self.commands
    }

    /// Destination of the last `persist` call
    pub fn persisted(&self) -> Option<&Path> {
        self.persisted.as_deref()
    }
}

impl DocumentSink for MemorySink {
    fn append_heading(&mut self, level: HeadingLevel, numbered_label: &str, text: &str) -> Result<()> {
        self.commands.push(SinkCommand::Heading {
            level,
            label: numbered_label.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn append_paragraph(&mut self, text: &str) -> Result<()> {
        self.commands.push(SinkCommand::Paragraph(text.to_string()));
        Ok(())
    }

    fn append_blank_line(&mut self) -> Result<()> {
        self.commands.push(SinkCommand::BlankLine);
        Ok(())
    }

    fn append_list(&mut self, description: &str, items: &NestedList, style: ListStyle) -> Result<()> {
        self.commands.push(SinkCommand::List {
            description: description.to_string(),
            items: items.clone(),
            style,
        });
        Ok(())
    }

    fn append_image(&mut self, path: &Path, caption: &str) -> Result<()> {
        let resolved = resolve_asset(path, &self.image_dir)?;
        self.commands.push(SinkCommand::Image {
            path: resolved,
            caption: caption.to_string(),
        });
        Ok(())
    }

    fn append_code_listing(&mut self, source_text: &str, caption: &str) -> Result<()> {
        self.commands.push(SinkCommand::CodeListing {
            source: source_text.to_string(),
            caption: caption.to_string(),
        });
        Ok(())
    }

    fn append_table(&mut self, description: &str, rows: &[Vec<String>], numbered_label: &str) -> Result<()> {
        self.commands.push(SinkCommand::Table {
            description: description.to_string(),
            rows: rows.to_vec(),
            label: numbered_label.to_string(),
        });
        Ok(())
    }

    fn append_page_break(&mut self) -> Result<()> {
        self.commands.push(SinkCommand::PageBreak);
        Ok(())
    }

    fn append_bibliography(&mut self, entries: &BTreeMap<usize, String>) -> Result<()> {
        self.commands.push(SinkCommand::Bibliography(entries.clone()));
        Ok(())
    }

    fn persist(&mut self, destination: &Path) -> Result<PathBuf> {
        self.persisted = Some(destination.to_path_buf());
        Ok(destination.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_style_rotation() {
        assert_eq!(ListStyle::Lettered.at_depth(0), ListStyle::Lettered);
        assert_eq!(ListStyle::Lettered.at_depth(1), ListStyle::Numeric);
        assert_eq!(ListStyle::Lettered.at_depth(2), ListStyle::Bullet);
        assert_eq!(ListStyle::Lettered.at_depth(3), ListStyle::Lettered);
        assert_eq!(ListStyle::Numeric.at_depth(1), ListStyle::Numeric);
        assert_eq!(ListStyle::Numeric.at_depth(2), ListStyle::Numeric);
        assert_eq!(ListStyle::Bullet.at_depth(1), ListStyle::Bullet);
    }

    #[test]
    fn test_markers() {
        assert_eq!(ListStyle::Bullet.marker(4), "–");
        assert_eq!(ListStyle::Lettered.marker(0), "а)");
        assert_eq!(ListStyle::Lettered.marker(1), "б)");
        assert_eq!(ListStyle::Numeric.marker(2), "3)");
        // Code-point order from 'а', not the Ukrainian alphabet
        assert_eq!(ListStyle::Lettered.marker(26), "ъ)");
        assert_eq!(ListStyle::Lettered.marker(32), "а)");
    }

    #[test]
    fn test_resolve_asset_direct() {
        let tmpdir = tempfile::tempdir().unwrap();
        let file = tmpdir.path().join("pic.png");
        std::fs::write(&file, b"png").unwrap();
        assert_eq!(resolve_asset(&file, Path::new("Images")).unwrap(), file);
    }

    #[test]
    fn test_resolve_asset_fallback() {
        let tmpdir = tempfile::tempdir().unwrap();
        let images = tmpdir.path().join("Images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("pic.png"), b"png").unwrap();

        let resolved = resolve_asset(Path::new("/nowhere/pic.png"), &images).unwrap();
        assert_eq!(resolved, images.join("pic.png"));
    }

    #[test]
    fn test_resolve_asset_not_found() {
        let tmpdir = tempfile::tempdir().unwrap();
        let err = resolve_asset(Path::new("/nowhere/pic.png"), tmpdir.path()).unwrap_err();
        assert!(matches!(err, SinkError::NotFound(p) if p == Path::new("/nowhere/pic.png")));
    }

    #[test]
    fn test_memory_sink_records() {
        let mut sink = MemorySink::new();
        sink.append_paragraph("hello").unwrap();
        sink.append_page_break().unwrap();
        let out = sink.persist(Path::new("report.md")).unwrap();

        assert_eq!(out, PathBuf::from("report.md"));
        assert_eq!(sink.persisted(), Some(Path::new("report.md")));
        assert_eq!(
            sink.commands(),
            &[SinkCommand::Paragraph("hello".into()), SinkCommand::PageBreak]
        );
    }

    #[test]
    fn test_error_types() {
        let _err1 = SinkError::NotFound(PathBuf::from("/test/path"));
        let _err2: SinkError = std::io::Error::other("test").into();
    }
}
