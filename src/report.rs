//! Report orchestrator
//!
//! `ReportBuilder` records every `add_*` call as a deferred [`Action`],
//! wrapping most of them in blank lines. `save` runs the layout passes,
//! assigns numbers while replaying the actions into a [`DocumentSink`]
//! and persists the document.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::action::{Action, ActionQueue};
use crate::config::ReportConfig;
use crate::markdown_gen::{MarkdownSink, MarkdownSinkOptions};
use crate::nested_list::{parse_nested, NestedList};
use crate::numbering::{HeadingLevel, NumberingTracker};
use crate::optimizer;
use crate::punctuate::punctuate;
use crate::sink::{resolve_asset, DocumentSink, ListStyle, SinkError};
use crate::sources::SourceRegistry;
use crate::text_clean::TextCleaner;

/// Extensions picked up by [`ReportBuilder::add_images_of_all_files`]
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "svg"];

/// Extensions picked up by [`ReportBuilder::add_listings_of_all_files`]
pub const CODE_EXTENSIONS: &[&str] = &[
    "c", "cpp", "h", "py", "java", "js", "ts", "rb", "go", "php", "html", "css", "sh", "pl",
    "swift", "kt", "scala", "r", "lua", "m", "sql", "bash", "txt", "md",
];

/// Characters stripped from bulleted list items before lowercasing
const BULLET_TRIM_CHARS: &[char] = &[' ', '-', '–'];

// ============================================================
// Error Types
// ============================================================

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{method}() takes 1 or 2 arguments ({count} given)")]
    InvalidArguments { method: &'static str, count: usize },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

// ============================================================
// Builder
// ============================================================

/// Accumulates report content and renders it on [`ReportBuilder::save`]
#[derive(Debug)]
pub struct ReportBuilder {
    output: PathBuf,
    config: ReportConfig,
    queue: ActionQueue,
    cleaner: TextCleaner,
    sources: SourceRegistry,
}

impl ReportBuilder {
    /// Builder writing to `output` with default settings
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self::with_config(output, ReportConfig::default())
    }

    pub fn with_config(output: impl Into<PathBuf>, config: ReportConfig) -> Self {
        Self {
            output: output.into(),
            config,
            queue: ActionQueue::new(),
            cleaner: TextCleaner::default(),
            sources: SourceRegistry::new(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Actions recorded so far, before layout passes
    pub fn actions(&self) -> &[Action] {
        self.queue.actions()
    }

    /// Actions as they would be replayed by `save`
    pub fn finalized_actions(&self) -> Vec<Action> {
        optimizer::finalize(self.queue.actions().to_vec())
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    fn blank(&mut self) {
        self.queue.record(Action::BlankLine);
    }

    /// Record `action` between two blank lines
    fn record_wrapped(&mut self, action: Action) {
        self.blank();
        self.queue.record(action);
        self.blank();
    }

    // ------------------------------------------------------------
    // Headings and text
    // ------------------------------------------------------------

    pub fn add_introduction(&mut self, text: &str) {
        let cleaned = self.cleaner.clean(text);
        self.queue.record(Action::Introduction(cleaned));
    }

    pub fn add_section(&mut self, text: &str) {
        let cleaned = self.cleaner.clean(text);
        self.record_wrapped(Action::Section(cleaned));
    }

    pub fn add_sub_section(&mut self, text: &str) {
        let cleaned = self.cleaner.clean(text);
        self.record_wrapped(Action::SubSection(cleaned));
    }

    pub fn add_sub_sub_section(&mut self, text: &str) {
        let cleaned = self.cleaner.clean(text);
        self.record_wrapped(Action::SubSubSection(cleaned));
    }

    pub fn add_text(&mut self, text: &str) {
        let cleaned = self.cleaner.clean(text);
        self.record_wrapped(Action::Text(cleaned));
    }

    pub fn add_page_break(&mut self) {
        self.queue.record(Action::PageBreak);
    }

    // ------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------

    /// Bulleted list from `[text]` or `[description, items]`
    ///
    /// With a single argument the first non-blank line is the description
    /// and the remaining lines are the items. Items are indentation-nested.
    pub fn add_list(&mut self, args: &[&str]) -> Result<()> {
        let (description, items) = split_list_args("add_list", args)?;
        let items = parse_nested(self.cleaner.clean_items(&items));
        self.add_list_items(&description, &items);
        Ok(())
    }

    /// Bulleted list from an already built tree
    pub fn add_list_items(&mut self, description: &str, items: &NestedList) {
        let description = with_colon(self.cleaner.clean(description));
        let items = punctuate(items).map_items(&|item: &str| {
            item.trim_matches(BULLET_TRIM_CHARS).to_lowercase()
        });
        self.record_wrapped(Action::List { description, items });
    }

    /// Numbered list from `[text]` or `[description, items]`
    ///
    /// Items keep their own punctuation and case.
    pub fn add_numbered_list(&mut self, args: &[&str]) -> Result<()> {
        let (description, items) = split_list_args("add_numbered_list", args)?;
        let description = with_colon(self.cleaner.clean(&description));
        let items = parse_nested(&items);
        self.record_wrapped(Action::NumberedList { description, items });
        Ok(())
    }

    // ------------------------------------------------------------
    // Figures, listings, tables
    // ------------------------------------------------------------

    pub fn add_image(&mut self, path: impl Into<PathBuf>, description: &str) {
        let description = self.cleaner.clean(description);
        self.record_wrapped(Action::Image {
            path: path.into(),
            description,
        });
    }

    /// Add every image file under `dir`, recursively, in path order
    pub fn add_images_of_all_files(&mut self, dir: &Path) -> Result<()> {
        let files = collect_files(dir, IMAGE_EXTENSIONS)?;
        let placeholder = self.config.image_placeholder.clone();

        self.blank();
        for file in files {
            self.add_image(file, &placeholder);
        }
        self.blank();
        Ok(())
    }

    pub fn add_listing(&mut self, path: impl Into<PathBuf>) {
        self.record_wrapped(Action::Listing { path: path.into() });
    }

    /// Add every source file under `dir`, recursively, in path order
    pub fn add_listings_of_all_files(&mut self, dir: &Path) -> Result<()> {
        let files = collect_files(dir, CODE_EXTENSIONS)?;

        self.blank();
        for file in files {
            self.add_listing(file);
        }
        self.blank();
        Ok(())
    }

    pub fn add_table(&mut self, description: &str, rows: Vec<Vec<String>>) {
        let description = self.cleaner.clean(description);
        self.record_wrapped(Action::Table {
            description,
            rows,
            number: None,
        });
    }

    // ------------------------------------------------------------
    // Bibliography
    // ------------------------------------------------------------

    /// Register a citation and return its number
    pub fn add_source(&mut self, text: &str) -> usize {
        self.sources.add(text)
    }

    pub fn add_source_list(&mut self) {
        self.queue.record(Action::SourceList);
    }

    // ------------------------------------------------------------
    // Numbering control
    // ------------------------------------------------------------

    pub fn clear_section_number(&mut self) {
        self.queue.record(Action::ClearNumber(HeadingLevel::Section));
    }

    pub fn clear_sub_section_number(&mut self) {
        self.queue.record(Action::ClearNumber(HeadingLevel::SubSection));
    }

    pub fn clear_sub_sub_section_number(&mut self) {
        self.queue.record(Action::ClearNumber(HeadingLevel::SubSubSection));
    }

    // ------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------

    /// Render to Markdown at the output path
    ///
    /// Returns `None` without writing anything when no content was added.
    pub fn save(&mut self) -> Result<Option<PathBuf>> {
        let base_dir = self
            .output
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let options = MarkdownSinkOptions::builder()
            .base_dir(base_dir)
            .image_dir(self.config.image_dir.clone())
            .table_label(self.config.labels.table.clone())
            .build();

        let mut sink = MarkdownSink::new(options);
        self.save_to(&mut sink)
    }

    /// Run the layout passes, replay into `sink` and persist it
    ///
    /// The queue is drained even when replay fails.
    pub fn save_to<S>(&mut self, sink: &mut S) -> Result<Option<PathBuf>>
    where
        S: DocumentSink + ?Sized,
    {
        if self.queue.is_empty() {
            log::warn!("Nothing to save for {}", self.output.display());
            return Ok(None);
        }

        let recorded = self.queue.take();
        let recorded_len = recorded.len();
        let actions = optimizer::finalize(recorded);
        log::info!(
            "Rendering {} actions ({} recorded)",
            actions.len(),
            recorded_len
        );

        let mut replay = Replay {
            sink,
            numbering: NumberingTracker::starting_at(self.config.first_section),
            sources: &self.sources,
            config: &self.config,
        };
        for action in actions {
            replay.dispatch(action)?;
        }

        let written = replay.sink.persist(&self.output)?;
        Ok(Some(written))
    }
}

// ============================================================
// Replay
// ============================================================

struct Replay<'a, S: DocumentSink + ?Sized> {
    sink: &'a mut S,
    numbering: NumberingTracker,
    sources: &'a SourceRegistry,
    config: &'a ReportConfig,
}

impl<S: DocumentSink + ?Sized> Replay<'_, S> {
    fn dispatch(&mut self, action: Action) -> Result<()> {
        let config = self.config;
        let labels = &config.labels;

        match action {
            Action::Introduction(text) => {
                self.sink.append_page_break()?;
                self.sink
                    .append_heading(HeadingLevel::Section, "", &labels.intro_title)?;
                self.sink.append_blank_line()?;
                self.write_text(&text)?;
            }
            Action::Section(text) => {
                self.numbering.enter_section();
                self.sink.append_page_break()?;
                self.heading(HeadingLevel::Section, &text)?;
            }
            Action::SubSection(text) => {
                self.numbering.enter_subsection();
                self.heading(HeadingLevel::SubSection, &text)?;
            }
            Action::SubSubSection(text) => {
                self.numbering.enter_subsubsection();
                self.heading(HeadingLevel::SubSubSection, &text)?;
            }
            Action::Text(text) => self.write_text(&text)?,
            Action::List { description, items } => {
                log::debug!("list '{}' with depth {}", description, items.depth());
                let style = if items.is_flat() {
                    ListStyle::Bullet
                } else {
                    ListStyle::Lettered
                };
                self.sink.append_list(&description, &items, style)?;
            }
            Action::NumberedList { description, items } => {
                log::debug!("numbered list '{}' with depth {}", description, items.depth());
                self.sink
                    .append_list(&description, &items, ListStyle::Numeric)?;
            }
            Action::Image { path, description } => {
                let number = self.numbering.next_figure();
                let intro = format!("{} {} {}.", description, labels.figure_reference, number);
                let caption = format!("{} {} – {}", labels.figure, number, description);
                self.write_text(&intro)?;
                self.sink.append_blank_line()?;
                self.sink.append_image(&path, &caption)?;
            }
            Action::Listing { path } => {
                let resolved = resolve_asset(&path, &config.listing_dir)?;
                let code = std::fs::read_to_string(&resolved)?;
                let name = resolved
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();

                let number = self.numbering.next_listing();
                let intro = format!(
                    "{} {} {} {}.",
                    labels.listing_reference_prefix, name, labels.listing_reference, number
                );
                let caption = format!(
                    "{} {} – {} {}",
                    labels.listing, number, labels.listing_content, name
                );
                self.write_text(&intro)?;
                self.sink.append_blank_line()?;
                self.sink.append_code_listing(&code, &caption)?;
            }
            Action::Table {
                description,
                rows,
                number: None,
            } => {
                let number = self.numbering.next_table();
                let intro = format!("{} {} {}.", description, labels.table_reference, number);
                let expanded = [
                    Action::Text(intro),
                    Action::BlankLine,
                    Action::Table {
                        description,
                        rows,
                        number: Some(number),
                    },
                ];
                for action in expanded {
                    self.dispatch(action)?;
                }
            }
            Action::Table {
                description,
                rows,
                number: Some(number),
            } => {
                self.sink.append_table(&description, &rows, &number)?;
            }
            Action::SourceList => {
                self.sink.append_page_break()?;
                self.sink
                    .append_heading(HeadingLevel::Section, "", &labels.sources_title)?;
                self.sink.append_blank_line()?;
                self.sink.append_bibliography(self.sources.entries())?;
                self.sink.append_page_break()?;
            }
            Action::PageBreak => self.sink.append_page_break()?,
            Action::BlankLine => self.sink.append_blank_line()?,
            Action::ClearNumber(level) => self.numbering.clear(level),
        }

        Ok(())
    }

    fn heading(&mut self, level: HeadingLevel, text: &str) -> Result<()> {
        let label = self.numbering.heading_label(level);
        self.sink.append_heading(level, &label, text)?;
        Ok(())
    }

    /// One paragraph per non-blank line, each ending with a period
    fn write_text(&mut self, text: &str) -> Result<()> {
        for line in text.trim().lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.ends_with('.') {
                self.sink.append_paragraph(line)?;
            } else {
                self.sink.append_paragraph(&format!("{}.", line))?;
            }
        }
        Ok(())
    }
}

// ============================================================
// Helpers
// ============================================================

/// Split list arguments into (description, items text)
fn split_list_args(method: &'static str, args: &[&str]) -> Result<(String, String)> {
    match args {
        [text] => Ok(split_description_and_items(text)),
        [description, items] => Ok((description.to_string(), items.to_string())),
        _ => Err(ReportError::InvalidArguments {
            method,
            count: args.len(),
        }),
    }
}

/// First non-blank line is the description, the rest are items
fn split_description_and_items(text: &str) -> (String, String) {
    let mut lines = text.trim().lines().filter(|line| !line.trim().is_empty());
    let description = lines.next().unwrap_or_default().trim().to_string();
    let items = lines.collect::<Vec<_>>().join("\n");
    (description, items)
}

fn with_colon(mut description: String) -> String {
    if !description.ends_with(':') {
        description.push(':');
    }
    description
}

/// Files under `dir` (recursively) whose extension is in `extensions`
fn collect_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReportError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if has_extension(&path, extensions) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}
