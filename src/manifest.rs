//! Report manifests
//!
//! A manifest describes a whole report as an ordered list of content
//! blocks, in TOML or JSON. Relative asset paths are resolved against the
//! manifest's directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::numbering::HeadingLevel;
use crate::report::{ReportBuilder, ReportError};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported manifest format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

/// One piece of report content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Introduction {
        text: String,
    },
    Section {
        text: String,
    },
    SubSection {
        text: String,
    },
    SubSubSection {
        text: String,
    },
    Text {
        text: String,
    },
    /// Without `description`, the first line of `text` is the description
    List {
        #[serde(default)]
        description: Option<String>,
        text: String,
    },
    NumberedList {
        #[serde(default)]
        description: Option<String>,
        text: String,
    },
    Image {
        path: PathBuf,
        description: String,
    },
    Images {
        dir: PathBuf,
    },
    Listing {
        path: PathBuf,
    },
    Listings {
        dir: PathBuf,
    },
    Table {
        description: String,
        rows: Vec<Vec<String>>,
    },
    SourceList,
    PageBreak,
    ClearNumber {
        level: HeadingLevel,
    },
}

/// A whole report description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Used for the default output file name
    #[serde(default)]
    pub title: Option<String>,
    /// Bibliography entries, numbered in order
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Manifest {
    /// Load a manifest, choosing the parser by file extension
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());
        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(ManifestError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Record every block into `report`
    ///
    /// Relative paths are joined onto `base_dir`.
    pub fn apply(&self, report: &mut ReportBuilder, base_dir: &Path) -> Result<(), ReportError> {
        for source in &self.sources {
            report.add_source(source);
        }

        let resolve = |path: &Path| -> PathBuf {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base_dir.join(path)
            }
        };

        for block in &self.blocks {
            match block {
                Block::Introduction { text } => report.add_introduction(text),
                Block::Section { text } => report.add_section(text),
                Block::SubSection { text } => report.add_sub_section(text),
                Block::SubSubSection { text } => report.add_sub_sub_section(text),
                Block::Text { text } => report.add_text(text),
                Block::List { description, text } => match description {
                    Some(description) => report.add_list(&[description.as_str(), text.as_str()])?,
                    None => report.add_list(&[text.as_str()])?,
                },
                Block::NumberedList { description, text } => match description {
                    Some(description) => {
                        report.add_numbered_list(&[description.as_str(), text.as_str()])?
                    }
                    None => report.add_numbered_list(&[text.as_str()])?,
                },
                Block::Image { path, description } => report.add_image(resolve(path), description),
                Block::Images { dir } => report.add_images_of_all_files(&resolve(dir))?,
                Block::Listing { path } => report.add_listing(resolve(path)),
                Block::Listings { dir } => report.add_listings_of_all_files(&resolve(dir))?,
                Block::Table { description, rows } => report.add_table(description, rows.clone()),
                Block::SourceList => report.add_source_list(),
                Block::PageBreak => report.add_page_break(),
                Block::ClearNumber { level } => match level {
                    HeadingLevel::Section => report.clear_section_number(),
                    HeadingLevel::SubSection => report.clear_sub_section_number(),
                    HeadingLevel::SubSubSection => report.clear_sub_sub_section_number(),
                },
            }
        }

        Ok(())
    }
}
