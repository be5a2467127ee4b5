//! Nested list model and indentation parser
//!
//! Turns indentation-based multi-line text into a tree of items.
//! Nesting is relative: a line deeper than the current frame opens a
//! sublist, a shallower line closes frames until one matches.

use serde::{Deserialize, Serialize};

/// One entry of a nested list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListNode {
    /// Leaf text item
    Item(String),
    /// Nested sublist
    Nested(NestedList),
}

impl ListNode {
    /// Whether this node is a sublist
    pub fn is_nested(&self) -> bool {
        matches!(self, ListNode::Nested(_))
    }
}

impl From<&str> for ListNode {
    fn from(text: &str) -> Self {
        ListNode::Item(text.to_string())
    }
}

impl From<NestedList> for ListNode {
    fn from(list: NestedList) -> Self {
        ListNode::Nested(list)
    }
}

/// Ordered sequence of items and sublists
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedList(pub Vec<ListNode>);

impl NestedList {
    /// Create an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a node
    pub fn push(&mut self, node: impl Into<ListNode>) {
        self.0.push(node.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListNode> {
        self.0.iter()
    }

    /// True when no node is a sublist
    pub fn is_flat(&self) -> bool {
        self.0.iter().all(|node| !node.is_nested())
    }

    /// Maximum nesting depth (a flat list has depth 1, empty has 0)
    pub fn depth(&self) -> usize {
        if self.0.is_empty() {
            return 0;
        }
        1 + self
            .0
            .iter()
            .map(|node| match node {
                ListNode::Nested(list) => list.depth(),
                ListNode::Item(_) => 0,
            })
            .max()
            .unwrap_or(0)
    }

    /// Apply `f` to every leaf, producing a new tree
    pub fn map_items<F>(&self, f: &F) -> NestedList
    where
        F: Fn(&str) -> String,
    {
        NestedList(
            self.0
                .iter()
                .map(|node| match node {
                    ListNode::Item(text) => ListNode::Item(f(text)),
                    ListNode::Nested(list) => ListNode::Nested(list.map_items(f)),
                })
                .collect(),
        )
    }

    /// Serialize back to indented text, one item per line
    ///
    /// Each nesting level adds one `indent_unit`.
    pub fn to_indented_text(&self, indent_unit: &str) -> String {
        let mut lines = Vec::new();
        self.collect_lines(indent_unit, 0, &mut lines);
        lines.join("\n")
    }

    fn collect_lines(&self, indent_unit: &str, level: usize, lines: &mut Vec<String>) {
        for node in &self.0 {
            match node {
                ListNode::Item(text) => lines.push(format!("{}{}", indent_unit.repeat(level), text)),
                ListNode::Nested(list) => list.collect_lines(indent_unit, level + 1, lines),
            }
        }
    }
}

impl<'a> IntoIterator for &'a NestedList {
    type Item = &'a ListNode;
    type IntoIter = std::slice::Iter<'a, ListNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<ListNode>> for NestedList {
    fn from(nodes: Vec<ListNode>) -> Self {
        Self(nodes)
    }
}

/// Parse indentation-based text into a nested list
///
/// Blank lines are skipped. Indentation is the count of leading whitespace
/// characters; the first non-blank line sets the root level.
pub fn parse_nested(text: &str) -> NestedList {
    let mut lines = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| (indent_of(line), line.trim()))
        .peekable();

    let root_indent = lines.peek().map(|(indent, _)| *indent).unwrap_or(0);
    // Frames of (indent, list); the root frame is never popped.
    let mut stack: Vec<(usize, NestedList)> = vec![(root_indent, NestedList::new())];

    for (indent, stripped) in lines {
        while stack.len() > 1 && indent < stack[stack.len() - 1].0 {
            close_frame(&mut stack);
        }

        let top = stack.len() - 1;
        if indent == stack[top].0 {
            stack[top].1.push(stripped);
        } else {
            let mut sublist = NestedList::new();
            sublist.push(stripped);
            stack.push((indent, sublist));
        }
    }

    while stack.len() > 1 {
        close_frame(&mut stack);
    }

    stack.pop().map(|(_, list)| list).unwrap_or_default()
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn close_frame(stack: &mut Vec<(usize, NestedList)>) {
    if let Some((_, finished)) = stack.pop() {
        if let Some((_, parent)) = stack.last_mut() {
            parent.push(finished);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> ListNode {
        ListNode::from(text)
    }

    fn nested(nodes: Vec<ListNode>) -> ListNode {
        ListNode::Nested(NestedList(nodes))
    }

    #[test]
    fn test_parse_flat() {
        let list = parse_nested("one\ntwo\nthree");
        assert_eq!(list, NestedList(vec![item("one"), item("two"), item("three")]));
        assert!(list.is_flat());
        assert_eq!(list.depth(), 1);
    }

    #[test]
    fn test_parse_nested_levels() {
        let text = "fruits\n  apple\n  pear\n    green\nvegetables";
        let list = parse_nested(text);
        assert_eq!(
            list,
            NestedList(vec![
                item("fruits"),
                nested(vec![item("apple"), item("pear"), nested(vec![item("green")])]),
                item("vegetables"),
            ])
        );
        assert_eq!(list.depth(), 3);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let list = parse_nested("a\n\n   \n  b\n\n  c");
        assert_eq!(list, NestedList(vec![item("a"), nested(vec![item("b"), item("c")])]));
    }

    #[test]
    fn test_parse_all_blank_is_empty() {
        assert!(parse_nested("").is_empty());
        assert!(parse_nested("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_parse_relative_indentation() {
        // Tabs and spaces both count as one character each.
        let list = parse_nested("a\n\tb\n\t\tc\n\td");
        assert_eq!(
            list,
            NestedList(vec![
                item("a"),
                nested(vec![item("b"), nested(vec![item("c")]), item("d")]),
            ])
        );
    }

    #[test]
    fn test_parse_unmatched_dedent_opens_sibling_sublist() {
        // Depth 2 matches neither frame (0 or 4), so it starts a new sublist.
        let list = parse_nested("a\n    b\n  c");
        assert_eq!(
            list,
            NestedList(vec![item("a"), nested(vec![item("b")]), nested(vec![item("c")])])
        );
    }

    #[test]
    fn test_parse_indented_block() {
        let list = parse_nested("    - a\n        b\n    - c");
        assert_eq!(
            list,
            NestedList(vec![item("- a"), nested(vec![item("b")]), item("- c")])
        );
    }

    #[test]
    fn test_roundtrip_indented_text() {
        let text = "Мета\n  перша\n  друга\n    деталь\nВисновок";
        let parsed = parse_nested(text);
        let reparsed = parse_nested(&parsed.to_indented_text("  "));
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_map_items() {
        let list = parse_nested("A\n  B");
        let lowered = list.map_items(&|s: &str| s.to_lowercase());
        assert_eq!(lowered, NestedList(vec![item("a"), nested(vec![item("b")])]));
    }

    #[test]
    fn test_serde_untagged_shape() {
        let list = parse_nested("a\n  b");
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"["a",["b"]]"#);
        let back: NestedList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }
}
