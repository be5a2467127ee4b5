//! Markdown generation module
//!
//! A [`DocumentSink`] that renders report content as Markdown and writes
//! it to a single file on persist.

use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use crate::nested_list::{ListNode, NestedList};
use crate::numbering::HeadingLevel;
use crate::sink::{resolve_asset, DocumentSink, ListStyle, Result};

/// Rendered in place of an empty paragraph
const BLANK_LINE: &str = "&nbsp;";

/// Indentation per nested list level
const LIST_INDENT: &str = "  ";

// ============================================================
// Options
// ============================================================

/// Markdown sink options
#[derive(Debug, Clone)]
pub struct MarkdownSinkOptions {
    /// Image paths are written relative to this directory when possible
    pub base_dir: PathBuf,
    /// Fallback directory for images that are missing at their given path
    pub image_dir: PathBuf,
    /// Word placed before a table number in its caption
    pub table_label: String,
}

impl Default for MarkdownSinkOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            image_dir: PathBuf::from("Images"),
            table_label: "Таблиця".to_string(),
        }
    }
}

impl MarkdownSinkOptions {
    /// Create a new options builder
    pub fn builder() -> MarkdownSinkOptionsBuilder {
        MarkdownSinkOptionsBuilder::default()
    }
}

/// Builder for MarkdownSinkOptions
#[derive(Debug, Default)]
pub struct MarkdownSinkOptionsBuilder {
    options: MarkdownSinkOptions,
}

impl MarkdownSinkOptionsBuilder {
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.base_dir = dir.into();
        self
    }

    #[must_use]
    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.image_dir = dir.into();
        self
    }

    #[must_use]
    pub fn table_label(mut self, label: impl Into<String>) -> Self {
        self.options.table_label = label.into();
        self
    }

    #[must_use]
    pub fn build(self) -> MarkdownSinkOptions {
        self.options
    }
}

// ============================================================
// Sink
// ============================================================

/// Markdown renderer
#[derive(Debug, Default)]
pub struct MarkdownSink {
    buffer: String,
    options: MarkdownSinkOptions,
}

impl MarkdownSink {
    pub fn new(options: MarkdownSinkOptions) -> Self {
        Self {
            buffer: String::with_capacity(4096),
            options,
        }
    }

    /// Markdown rendered so far
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_list_level(&mut self, items: &NestedList, style: ListStyle, depth: usize) {
        let level_style = style.at_depth(depth);
        let indent = LIST_INDENT.repeat(depth);
        let mut counter = 0;

        for node in items {
            match node {
                ListNode::Nested(sublist) => self.write_list_level(sublist, style, depth + 1),
                ListNode::Item(text) if text.trim().is_empty() => {}
                ListNode::Item(text) => {
                    // Hard line break keeps each item on its own line
                    writeln!(
                        self.buffer,
                        "{}{} {}  ",
                        indent,
                        level_style.marker(counter),
                        text.trim()
                    )
                    .ok();
                    counter += 1;
                }
            }
        }
    }

    /// Get image path relative to the base directory for markdown references
    fn relative_image_path(&self, path: &Path) -> String {
        if let Ok(rel) = path.strip_prefix(&self.options.base_dir) {
            rel.to_string_lossy().to_string()
        } else {
            path.to_string_lossy().to_string()
        }
    }
}

impl DocumentSink for MarkdownSink {
    fn append_heading(&mut self, level: HeadingLevel, numbered_label: &str, text: &str) -> Result<()> {
        let hashes = "#".repeat(level.depth() as usize);
        if numbered_label.is_empty() {
            writeln!(self.buffer, "{} {}", hashes, text).ok();
        } else {
            writeln!(self.buffer, "{} {} {}", hashes, numbered_label, text).ok();
        }
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn append_paragraph(&mut self, text: &str) -> Result<()> {
        writeln!(self.buffer, "{}", text).ok();
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn append_blank_line(&mut self) -> Result<()> {
        writeln!(self.buffer, "{}", BLANK_LINE).ok();
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn append_list(&mut self, description: &str, items: &NestedList, style: ListStyle) -> Result<()> {
        writeln!(self.buffer, "{}  ", description).ok();
        self.write_list_level(items, style, 0);
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn append_image(&mut self, path: &Path, caption: &str) -> Result<()> {
        let resolved = resolve_asset(path, &self.options.image_dir)?;
        let rel_path = self.relative_image_path(&resolved);
        writeln!(self.buffer, "![{}]({})", caption, rel_path).ok();
        writeln!(self.buffer).ok();
        writeln!(self.buffer, "{}", caption).ok();
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn append_code_listing(&mut self, source_text: &str, caption: &str) -> Result<()> {
        writeln!(self.buffer, "{}", caption).ok();
        writeln!(self.buffer).ok();
        let fence = code_fence(source_text);
        writeln!(self.buffer, "{}", fence).ok();
        writeln!(self.buffer, "{}", source_text.trim_end_matches('\n')).ok();
        writeln!(self.buffer, "{}", fence).ok();
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn append_table(&mut self, description: &str, rows: &[Vec<String>], numbered_label: &str) -> Result<()> {
        writeln!(
            self.buffer,
            "{} {} – {}",
            self.options.table_label, numbered_label, description
        )
        .ok();
        writeln!(self.buffer).ok();

        // Column count follows the first row; short rows are padded
        let Some(columns) = rows.first().map(Vec::len).filter(|&n| n > 0) else {
            return Ok(());
        };

        for (i, row) in rows.iter().enumerate() {
            let cells: Vec<String> = (0..columns)
                .map(|j| row.get(j).map(|c| escape_cell(c)).unwrap_or_default())
                .collect();
            writeln!(self.buffer, "| {} |", cells.join(" | ")).ok();
            if i == 0 {
                writeln!(self.buffer, "|{}", " --- |".repeat(columns)).ok();
            }
        }
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn append_page_break(&mut self) -> Result<()> {
        writeln!(self.buffer, "---").ok();
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn append_bibliography(&mut self, entries: &BTreeMap<usize, String>) -> Result<()> {
        for (number, text) in entries {
            writeln!(self.buffer, "{}. {}", number, text).ok();
        }
        writeln!(self.buffer).ok();
        Ok(())
    }

    fn persist(&mut self, destination: &Path) -> Result<PathBuf> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(destination, &self.buffer)?;
        log::info!("Document saved: {}", destination.display());
        Ok(destination.to_path_buf())
    }
}

/// Backtick fence longer than any backtick run inside `source_text`
fn code_fence(source_text: &str) -> String {
    let longest_run = source_text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest_run + 1).max(3))
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

/// Sanitize a string for use as a filename
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
