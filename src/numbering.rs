//! Hierarchical numbering for headings, figures, tables and listings
//!
//! Figure, table and listing numbers are anchored to the deepest active
//! heading scope, e.g. the first figure under heading `2.3` is `2.3.1`.

use serde::{Deserialize, Serialize};

/// Heading depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingLevel {
    Section,
    SubSection,
    SubSubSection,
}

impl HeadingLevel {
    /// 1-based depth
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::Section => 1,
            HeadingLevel::SubSection => 2,
            HeadingLevel::SubSubSection => 3,
        }
    }

    fn index(&self) -> usize {
        self.depth() as usize - 1
    }
}

/// One counter per heading depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopedCounter {
    counts: [u32; 3],
}

impl ScopedCounter {
    /// Zero the counter at `level` and every deeper level
    fn reset_from(&mut self, level: HeadingLevel) {
        for count in &mut self.counts[level.index()..] {
            *count = 0;
        }
    }

    fn bump(&mut self, level: HeadingLevel) -> u32 {
        let count = &mut self.counts[level.index()];
        *count += 1;
        *count
    }

    /// Current value at `level`
    pub fn get(&self, level: HeadingLevel) -> u32 {
        self.counts[level.index()]
    }
}

/// Section counters plus per-scope figure/table/listing counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingTracker {
    section: u32,
    subsection: u32,
    subsubsection: u32,
    figures: ScopedCounter,
    tables: ScopedCounter,
    listings: ScopedCounter,
}

impl Default for NumberingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberingTracker {
    /// Tracker whose first section is numbered 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Tracker whose first section is numbered `first_section`
    pub fn starting_at(first_section: u32) -> Self {
        Self {
            section: first_section.saturating_sub(1),
            subsection: 0,
            subsubsection: 0,
            figures: ScopedCounter::default(),
            tables: ScopedCounter::default(),
            listings: ScopedCounter::default(),
        }
    }

    /// Enter a new heading scope at `level`
    pub fn enter(&mut self, level: HeadingLevel) {
        match level {
            HeadingLevel::Section => {
                self.section += 1;
                self.subsection = 0;
                self.subsubsection = 0;
            }
            HeadingLevel::SubSection => {
                self.subsection += 1;
                self.subsubsection = 0;
            }
            HeadingLevel::SubSubSection => {
                self.subsubsection += 1;
            }
        }
        self.reset_items_from(level);
    }

    pub fn enter_section(&mut self) {
        self.enter(HeadingLevel::Section);
    }

    pub fn enter_subsection(&mut self) {
        self.enter(HeadingLevel::SubSection);
    }

    pub fn enter_subsubsection(&mut self) {
        self.enter(HeadingLevel::SubSubSection);
    }

    /// Zero a heading counter without touching item counters
    pub fn clear(&mut self, level: HeadingLevel) {
        match level {
            HeadingLevel::Section => self.section = 0,
            HeadingLevel::SubSection => self.subsection = 0,
            HeadingLevel::SubSubSection => self.subsubsection = 0,
        }
    }

    /// Dotted label of the heading at `level`, e.g. `"2.3"` for a subsection
    pub fn heading_label(&self, level: HeadingLevel) -> String {
        match level {
            HeadingLevel::Section => format!("{}", self.section),
            HeadingLevel::SubSection => format!("{}.{}", self.section, self.subsection),
            HeadingLevel::SubSubSection => {
                format!("{}.{}.{}", self.section, self.subsection, self.subsubsection)
            }
        }
    }

    pub fn section_label(&self) -> String {
        self.heading_label(HeadingLevel::Section)
    }

    pub fn subsection_label(&self) -> String {
        self.heading_label(HeadingLevel::SubSection)
    }

    pub fn subsubsection_label(&self) -> String {
        self.heading_label(HeadingLevel::SubSubSection)
    }

    /// Deepest heading level currently open
    ///
    /// A subsubsection only counts while its subsection is open.
    pub fn active_level(&self) -> HeadingLevel {
        if self.subsection == 0 {
            HeadingLevel::Section
        } else if self.subsubsection == 0 {
            HeadingLevel::SubSection
        } else {
            HeadingLevel::SubSubSection
        }
    }

    pub fn next_figure(&mut self) -> String {
        let level = self.active_level();
        let n = self.figures.bump(level);
        self.item_label(level, n)
    }

    pub fn next_table(&mut self) -> String {
        let level = self.active_level();
        let n = self.tables.bump(level);
        self.item_label(level, n)
    }

    pub fn next_listing(&mut self) -> String {
        let level = self.active_level();
        let n = self.listings.bump(level);
        self.item_label(level, n)
    }

    fn item_label(&self, level: HeadingLevel, n: u32) -> String {
        format!("{}.{}", self.heading_label(level), n)
    }

    fn reset_items_from(&mut self, level: HeadingLevel) {
        self.figures.reset_from(level);
        self.tables.reset_from(level);
        self.listings.reset_from(level);
    }
}
