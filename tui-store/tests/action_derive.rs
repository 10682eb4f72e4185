//! Tests for #[derive(Action)]

#![allow(dead_code)]

use tui_store::Action;

#[derive(Action, Clone, Debug)]
enum PlainAction {
    Increment,
    SetValue(i32),
    Move { x: i32, y: i32 },
}

#[derive(Action, Clone, Debug)]
#[action(rename_all = "SCREAMING_SNAKE_CASE")]
enum TodoAction {
    AddItem(String),
    ClearCompleted,
    #[action(name = "@@UNKNOWN")]
    Unrecognized,
}

#[derive(Action, Clone, Debug)]
#[action(rename_all = "kebab-case")]
enum KebabAction {
    OpenPanel,
    Rename { to: String },
}

#[derive(Action, Clone, Debug)]
#[action(rename_all = "snake_case")]
enum SnakeAction {
    DidLoad,
}

#[test]
fn test_name_defaults_to_variant() {
    assert_eq!(PlainAction::Increment.name(), "Increment");
    assert_eq!(PlainAction::SetValue(1).name(), "SetValue");
    assert_eq!(PlainAction::Move { x: 0, y: 0 }.name(), "Move");
}

#[test]
fn test_rename_all_screaming_snake() {
    assert_eq!(TodoAction::AddItem("buy milk".into()).name(), "ADD_ITEM");
    assert_eq!(TodoAction::ClearCompleted.name(), "CLEAR_COMPLETED");
}

#[test]
fn test_explicit_name_wins() {
    assert_eq!(TodoAction::Unrecognized.name(), "@@UNKNOWN");
}

#[test]
fn test_other_rules() {
    assert_eq!(KebabAction::OpenPanel.name(), "open-panel");
    assert_eq!(KebabAction::Rename { to: "x".into() }.name(), "rename");
    assert_eq!(SnakeAction::DidLoad.name(), "did_load");
}

#[test]
fn test_derived_action_works_with_store() {
    use std::convert::Infallible;
    use tui_store::{CallCounter, Store};

    fn reducer(items: &Vec<String>, action: TodoAction) -> Result<Vec<String>, Infallible> {
        Ok(match action {
            TodoAction::AddItem(item) => [items.as_slice(), &[item]].concat(),
            TodoAction::ClearCompleted | TodoAction::Unrecognized => items.clone(),
        })
    }

    let mut store = Store::new(Vec::new(), reducer);
    let counter = CallCounter::new();
    store.subscribe(counter.observer());

    store.dispatch(TodoAction::AddItem("buy milk".into())).unwrap();
    store.dispatch(TodoAction::Unrecognized).unwrap();

    assert_eq!(store.state(), &vec!["buy milk"]);
    assert_eq!(counter.count(), 2);
}
