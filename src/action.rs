//! Deferred report actions
//!
//! Every content request is recorded as an [`Action`] and only rendered
//! when the report is saved, so layout passes can look at neighbours.

use std::path::PathBuf;

use crate::nested_list::NestedList;
use crate::numbering::HeadingLevel;

/// Discriminant of an [`Action`], used by the layout passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Introduction,
    Section,
    SubSection,
    SubSubSection,
    Text,
    List,
    NumberedList,
    Image,
    Listing,
    Table,
    SourceList,
    PageBreak,
    BlankLine,
    ClearNumber,
}

impl ActionKind {
    /// Either list flavour
    pub fn is_list(&self) -> bool {
        matches!(self, ActionKind::List | ActionKind::NumberedList)
    }

    /// Stable name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Introduction => "add_introduction",
            ActionKind::Section => "add_section",
            ActionKind::SubSection => "add_sub_section",
            ActionKind::SubSubSection => "add_sub_sub_section",
            ActionKind::Text => "add_text",
            ActionKind::List => "add_list",
            ActionKind::NumberedList => "add_numbered_list",
            ActionKind::Image => "add_image",
            ActionKind::Listing => "add_listing",
            ActionKind::Table => "add_table",
            ActionKind::SourceList => "add_source_list",
            ActionKind::PageBreak => "add_page_break",
            ActionKind::BlankLine => "blank_line",
            ActionKind::ClearNumber => "clear_number",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A recorded content request awaiting replay
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Introduction(String),
    Section(String),
    SubSection(String),
    SubSubSection(String),
    Text(String),
    List {
        description: String,
        items: NestedList,
    },
    NumberedList {
        description: String,
        items: NestedList,
    },
    Image {
        path: PathBuf,
        description: String,
    },
    Listing {
        path: PathBuf,
    },
    Table {
        description: String,
        rows: Vec<Vec<String>>,
        /// Assigned during replay
        number: Option<String>,
    },
    SourceList,
    PageBreak,
    BlankLine,
    ClearNumber(HeadingLevel),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Introduction(_) => ActionKind::Introduction,
            Action::Section(_) => ActionKind::Section,
            Action::SubSection(_) => ActionKind::SubSection,
            Action::SubSubSection(_) => ActionKind::SubSubSection,
            Action::Text(_) => ActionKind::Text,
            Action::List { .. } => ActionKind::List,
            Action::NumberedList { .. } => ActionKind::NumberedList,
            Action::Image { .. } => ActionKind::Image,
            Action::Listing { .. } => ActionKind::Listing,
            Action::Table { .. } => ActionKind::Table,
            Action::SourceList => ActionKind::SourceList,
            Action::PageBreak => ActionKind::PageBreak,
            Action::BlankLine => ActionKind::BlankLine,
            Action::ClearNumber(_) => ActionKind::ClearNumber,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Action::BlankLine)
    }

    /// Shorthand for a text action
    pub fn text(text: impl Into<String>) -> Self {
        Action::Text(text.into())
    }
}

/// Append-only queue of recorded actions
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    actions: Vec<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action: Action) {
        log::trace!("recorded {}", action.kind());
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Drain the queue, leaving it empty
    pub fn take(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_order() {
        let mut queue = ActionQueue::new();
        queue.record(Action::BlankLine);
        queue.record(Action::text("a"));
        queue.record(Action::PageBreak);

        let kinds: Vec<ActionKind> = queue.actions().iter().map(Action::kind).collect();
        assert_eq!(kinds, vec![ActionKind::BlankLine, ActionKind::Text, ActionKind::PageBreak]);
    }

    #[test]
    fn test_take_drains() {
        let mut queue = ActionQueue::new();
        queue.record(Action::SourceList);
        assert_eq!(queue.take().len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_kind_helpers() {
        assert!(ActionKind::List.is_list());
        assert!(ActionKind::NumberedList.is_list());
        assert!(!ActionKind::Table.is_list());
        assert_eq!(ActionKind::Text.to_string(), "add_text");
        assert!(Action::BlankLine.is_blank());
    }
}
