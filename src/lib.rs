//! lab-report - Academic lab report generator
//!
//! Content is recorded as deferred actions, tidied by a fixed sequence of
//! blank-line layout passes and replayed into a document sink with
//! hierarchical numbering for headings, figures, tables and listings.
//!
//! # Example
//!
//! ```no_run
//! use lab_report::ReportBuilder;
//!
//! let mut report = ReportBuilder::new("lab1.md");
//! report.add_section("Хід роботи");
//! report.add_text("Було виконано налаштування середовища");
//! report.add_list(&["Етапи\n  аналіз\n  реалізація"]).unwrap();
//! report.save().unwrap();
//! ```

pub mod action;
pub mod cli;
pub mod config;
pub mod manifest;
pub mod markdown_gen;
pub mod nested_list;
pub mod numbering;
pub mod optimizer;
pub mod punctuate;
pub mod report;
pub mod sink;
pub mod sources;
pub mod text_clean;

// Re-exports for convenience
pub use action::{Action, ActionKind, ActionQueue};
pub use cli::{Cli, Commands, RenderArgs};
pub use config::{ConfigError, Labels, ReportConfig, ReportConfigBuilder};
pub use manifest::{Block, Manifest, ManifestError};
pub use markdown_gen::{sanitize_filename, MarkdownSink, MarkdownSinkOptions};
pub use nested_list::{parse_nested, ListNode, NestedList};
pub use numbering::{HeadingLevel, NumberingTracker};
pub use punctuate::punctuate;
pub use report::{ReportBuilder, ReportError};
pub use sink::{DocumentSink, ListStyle, MemorySink, SinkCommand, SinkError};
pub use sources::SourceRegistry;
pub use text_clean::{Conjunction, TextCleaner};
