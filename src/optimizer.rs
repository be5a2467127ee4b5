//! Blank-line layout passes
//!
//! `finalize` runs a fixed, ordered list of pure rewrites over the recorded
//! actions. Each pass removes blank lines that would sit between two kinds
//! of content the report layout places directly next to each other.
//!
//! Later passes rely on earlier ones: everything after
//! [`collapse_blank_runs`] assumes blank lines are never adjacent.

use crate::action::{Action, ActionKind};

/// A single named rewrite
pub type Pass = fn(Vec<Action>) -> Vec<Action>;

/// All passes in the order they are applied
pub const PASSES: &[(&str, Pass)] = &[
    ("collapse_blank_runs", collapse_blank_runs),
    ("drop_blank_between_texts", drop_blank_between_texts),
    ("trim_blank_edges", trim_blank_edges),
    ("drop_blank_between_text_and_list", drop_blank_between_text_and_list),
    ("drop_blank_between_lists", drop_blank_between_lists),
    ("drop_blank_between_text_and_image", drop_blank_between_text_and_image),
    ("drop_blank_between_text_and_listing", drop_blank_between_text_and_listing),
];

/// Apply every pass in [`PASSES`] order
pub fn finalize(actions: Vec<Action>) -> Vec<Action> {
    PASSES.iter().fold(actions, |actions, (name, pass)| {
        let before = actions.len();
        let actions = pass(actions);
        log::debug!("layout pass {}: {} -> {} actions", name, before, actions.len());
        actions
    })
}

/// Merge runs of consecutive blank lines into one
pub fn collapse_blank_runs(actions: Vec<Action>) -> Vec<Action> {
    let mut result: Vec<Action> = Vec::with_capacity(actions.len());
    for action in actions {
        if action.is_blank() && result.last().is_some_and(Action::is_blank) {
            continue;
        }
        result.push(action);
    }
    result
}

/// Drop a blank line sandwiched between two text blocks
pub fn drop_blank_between_texts(actions: Vec<Action>) -> Vec<Action> {
    drop_blank_where(actions, |prev, next| {
        prev == ActionKind::Text && next == ActionKind::Text
    })
}

/// Drop one leading and one trailing blank line
pub fn trim_blank_edges(mut actions: Vec<Action>) -> Vec<Action> {
    if actions.first().is_some_and(Action::is_blank) {
        actions.remove(0);
    }
    if actions.last().is_some_and(Action::is_blank) {
        actions.pop();
    }
    actions
}

/// Drop a blank line between text and a list, in either order
pub fn drop_blank_between_text_and_list(actions: Vec<Action>) -> Vec<Action> {
    drop_blank_where(actions, |prev, next| {
        (prev == ActionKind::Text && next.is_list()) || (prev.is_list() && next == ActionKind::Text)
    })
}

/// Drop a blank line between two lists
pub fn drop_blank_between_lists(actions: Vec<Action>) -> Vec<Action> {
    drop_blank_where(actions, |prev, next| prev.is_list() && next.is_list())
}

/// Drop a blank line between text and an image, in either order
pub fn drop_blank_between_text_and_image(actions: Vec<Action>) -> Vec<Action> {
    drop_blank_where(actions, |prev, next| {
        either_way(prev, next, ActionKind::Text, ActionKind::Image)
    })
}

/// Drop a blank line between text and a code listing, in either order
pub fn drop_blank_between_text_and_listing(actions: Vec<Action>) -> Vec<Action> {
    drop_blank_where(actions, |prev, next| {
        either_way(prev, next, ActionKind::Text, ActionKind::Listing)
    })
}

fn either_way(prev: ActionKind, next: ActionKind, a: ActionKind, b: ActionKind) -> bool {
    (prev == a && next == b) || (prev == b && next == a)
}

/// Single left-to-right scan shared by the neighbour passes
///
/// `prev` is the kind of the last action kept so far and `next` is the
/// kind of the following action in the input.
fn drop_blank_where<F>(actions: Vec<Action>, should_drop: F) -> Vec<Action>
where
    F: Fn(ActionKind, ActionKind) -> bool,
{
    let kinds: Vec<ActionKind> = actions.iter().map(Action::kind).collect();
    let mut result: Vec<Action> = Vec::with_capacity(actions.len());
    let mut prev: Option<ActionKind> = None;

    for (i, action) in actions.into_iter().enumerate() {
        if action.is_blank() {
            if let (Some(p), Some(&n)) = (prev, kinds.get(i + 1)) {
                if should_drop(p, n) {
                    continue;
                }
            }
        }
        prev = Some(action.kind());
        result.push(action);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nested_list::parse_nested;
    use std::path::PathBuf;

    fn text(s: &str) -> Action {
        Action::text(s)
    }

    fn blank() -> Action {
        Action::BlankLine
    }

    fn list() -> Action {
        Action::List {
            description: "d:".into(),
            items: parse_nested("a"),
        }
    }

    fn numbered() -> Action {
        Action::NumberedList {
            description: "d:".into(),
            items: parse_nested("a"),
        }
    }

    fn table() -> Action {
        Action::Table {
            description: "t".into(),
            rows: vec![vec!["1".into()]],
            number: None,
        }
    }

    fn image() -> Action {
        Action::Image {
            path: PathBuf::from("a.png"),
            description: "img".into(),
        }
    }

    fn listing() -> Action {
        Action::Listing {
            path: PathBuf::from("main.c"),
        }
    }

    fn kinds(actions: &[Action]) -> Vec<ActionKind> {
        actions.iter().map(Action::kind).collect()
    }

    #[test]
    fn test_finalize_composition() {
        let actions = vec![blank(), blank(), text("a"), blank(), text("b")];
        assert_eq!(finalize(actions), vec![text("a"), text("b")]);
    }

    #[test]
    fn test_blank_before_table_kept() {
        let actions = vec![text("a"), blank(), table()];
        assert_eq!(finalize(actions.clone()), actions);
    }

    #[test]
    fn test_collapse_blank_runs() {
        let actions = vec![blank(), blank(), blank(), text("a"), blank(), blank()];
        assert_eq!(collapse_blank_runs(actions), vec![blank(), text("a"), blank()]);
    }

    #[test]
    fn test_drop_between_texts_needs_both_sides() {
        let actions = vec![text("a"), blank(), table(), blank(), text("b")];
        assert_eq!(drop_blank_between_texts(actions.clone()), actions);
    }

    #[test]
    fn test_trim_edges_single_each() {
        let actions = vec![blank(), text("a"), blank()];
        assert_eq!(trim_blank_edges(actions), vec![text("a")]);
        assert!(trim_blank_edges(vec![blank()]).is_empty());
        assert!(trim_blank_edges(Vec::new()).is_empty());
    }

    #[test]
    fn test_text_and_list_both_directions() {
        let actions = vec![text("a"), blank(), list(), blank(), text("b"), blank(), numbered()];
        assert_eq!(
            kinds(&drop_blank_between_text_and_list(actions)),
            vec![ActionKind::Text, ActionKind::List, ActionKind::Text, ActionKind::NumberedList]
        );
    }

    #[test]
    fn test_between_lists() {
        let actions = vec![list(), blank(), numbered(), blank(), table()];
        assert_eq!(
            kinds(&drop_blank_between_lists(actions)),
            vec![ActionKind::List, ActionKind::NumberedList, ActionKind::BlankLine, ActionKind::Table]
        );
    }

    #[test]
    fn test_text_and_image_and_listing() {
        let actions = vec![
            image(),
            blank(),
            text("a"),
            blank(),
            listing(),
            blank(),
            text("b"),
            blank(),
            image(),
        ];
        let out = finalize(actions);
        assert_eq!(
            kinds(&out),
            vec![
                ActionKind::Image,
                ActionKind::Text,
                ActionKind::Listing,
                ActionKind::Text,
                ActionKind::Image,
            ]
        );
    }

    #[test]
    fn test_image_next_to_listing_keeps_blank() {
        let actions = vec![image(), blank(), listing()];
        assert_eq!(finalize(actions.clone()), actions);
    }

    #[test]
    fn test_prev_is_last_kept_action() {
        // The middle blank is dropped, so the scan sees text -> blank -> text
        // with the kept text as the previous action.
        let actions = vec![text("a"), blank(), text("b"), blank(), text("c")];
        assert_eq!(drop_blank_between_texts(actions), vec![text("a"), text("b"), text("c")]);
    }

    #[test]
    fn test_section_wrapping_survives() {
        let actions = vec![
            blank(),
            Action::Section("Вступ".into()),
            blank(),
            blank(),
            text("a"),
            blank(),
        ];
        assert_eq!(
            kinds(&finalize(actions)),
            vec![ActionKind::Section, ActionKind::BlankLine, ActionKind::Text]
        );
    }

    #[test]
    fn test_pass_order_is_fixed() {
        let names: Vec<&str> = PASSES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "collapse_blank_runs",
                "drop_blank_between_texts",
                "trim_blank_edges",
                "drop_blank_between_text_and_list",
                "drop_blank_between_lists",
                "drop_blank_between_text_and_image",
                "drop_blank_between_text_and_listing",
            ]
        );
    }
}
