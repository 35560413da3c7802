//! Order, link and boundary properties of the index and controller.

use std::sync::Arc;

use select_core::{
    OptionIndex, SelectError, SelectEvent, SelectItem, SelectOption, SelectionController, Signal,
};

fn options(keys: &[&str]) -> Vec<SelectOption> {
    keys.iter().map(|k| SelectOption::new(*k, format!("label {k}"))).collect()
}

fn controller(keys: &[&str]) -> SelectionController<SelectOption> {
    SelectionController::new(Arc::new(OptionIndex::build(options(keys)).unwrap()))
}

fn focused(c: &SelectionController<SelectOption>) -> Option<&str> {
    c.focused_key().map(String::as_str)
}

fn selected(c: &SelectionController<SelectOption>) -> Option<&str> {
    c.selected_key().map(String::as_str)
}

#[test]
fn order_is_preserved() {
    let keys = ["delta", "alpha", "charlie", "bravo", "echo"];
    let index = OptionIndex::build(options(&keys)).unwrap();

    let mut node = index.first().unwrap();
    let mut seen = vec![node.key().clone()];
    assert_eq!(node.position(), 0);
    for expected_pos in 1..keys.len() {
        node = index.next_of(node).unwrap();
        assert_eq!(node.position(), expected_pos);
        seen.push(node.key().clone());
    }
    assert!(index.next_of(node).is_none());
    assert_eq!(seen, keys);

    let via_iter: Vec<&str> = index.iter().map(|n| n.key().as_str()).collect();
    assert_eq!(via_iter, keys);
}

#[test]
fn links_are_symmetric() {
    for n in 1..6 {
        let keys: Vec<String> = (0..n).map(|i| format!("k{i}")).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let index = OptionIndex::build(options(&refs)).unwrap();

        for node in &index {
            if let Some(next) = index.next_of(node) {
                assert_eq!(index.previous_of(next).unwrap().key(), node.key());
            }
            if let Some(prev) = index.previous_of(node) {
                assert_eq!(index.next_of(prev).unwrap().key(), node.key());
            }
        }
        assert!(!index.first().unwrap().has_previous());
        assert!(!index.last().unwrap().has_next());
    }
}

#[test]
fn boundary_moves_are_silent_noops() {
    let mut c = controller(&["a", "b", "c"]);
    assert_eq!(c.focus_previous(), None);
    assert_eq!(focused(&c), Some("a"));

    c.focus_last();
    assert_eq!(c.focus_next(), None);
    assert_eq!(focused(&c), Some("c"));
}

#[test]
fn commit_after_k_moves_selects_position_k() {
    let keys = ["a", "b", "c", "d"];
    for k in 0..keys.len() {
        let mut c = controller(&keys);
        for _ in 0..k {
            assert!(c.focus_next().is_some());
        }
        assert_eq!(
            c.select_focused(),
            Some(SelectEvent::Selected {
                key: keys[k].to_string(),
                position: k,
            })
        );
        assert_eq!(selected(&c), Some(keys[k]));
        assert_eq!(c.selected().unwrap().position(), k);
    }
}

#[test]
fn empty_list_is_inert() {
    let index = OptionIndex::<SelectOption>::build(Vec::new()).unwrap();
    assert!(index.first().is_none());

    let mut c = SelectionController::new(Arc::new(index));
    for signal in [
        Signal::FocusNext,
        Signal::FocusPrevious,
        Signal::FocusFirst,
        Signal::FocusLast,
        Signal::Commit,
    ] {
        assert_eq!(c.apply(signal), None);
    }
    assert!(c.focused_key().is_none());
    assert!(c.selected_key().is_none());
}

#[test]
fn walk_to_end_then_commit() {
    let mut c = controller(&["a", "b", "c"]);
    assert_eq!(focused(&c), Some("a"));

    assert_eq!(
        c.focus_next(),
        Some(SelectEvent::FocusChanged {
            key: "b".to_string(),
            position: 1
        })
    );
    assert_eq!(focused(&c), Some("b"));

    assert!(c.focus_next().is_some());
    assert_eq!(focused(&c), Some("c"));

    assert_eq!(c.focus_next(), None);
    assert_eq!(focused(&c), Some("c"));

    assert!(c.select_focused().is_some());
    assert_eq!(selected(&c), Some("c"));
    assert_eq!(c.selected().unwrap().option().label(), "label c");
}

#[test]
fn duplicate_keys_are_rejected() {
    let err = OptionIndex::build(options(&["a", "a"])).unwrap_err();
    assert_eq!(
        err,
        SelectError::DuplicateKey {
            key: "\"a\"".to_string(),
            first: 0,
            duplicate: 1,
        }
    );
    assert_eq!(
        err.to_string(),
        "duplicate option key \"a\" at positions 0 and 1"
    );
}

#[test]
fn index_is_shared_between_controllers() {
    let index = Arc::new(OptionIndex::build(options(&["x", "y"])).unwrap());
    let mut left = SelectionController::new(index.clone());
    let right = SelectionController::new(index.clone());

    left.focus_next();
    assert_eq!(focused(&left), Some("y"));
    assert_eq!(focused(&right), Some("x"));
    assert!(Arc::ptr_eq(left.index(), right.index()));
}
