//! Reducer - pure function: (state, action) -> next state
//!
//! The state is the ordered list of items. The reducer never touches its
//! input; it builds the next list and hands it back to the store.

use std::convert::Infallible;

use crate::action::TodoAction;

/// The todo list state
pub type Todos = Vec<String>;

/// The reducer handles all state transitions
///
/// Unrecognized actions leave the list unchanged.
pub fn reducer(todos: &Todos, action: TodoAction) -> Result<Todos, Infallible> {
    match action {
        TodoAction::AddItem(item) => {
            let mut next = Vec::with_capacity(todos.len() + 1);
            next.extend_from_slice(todos);
            next.push(item);
            Ok(next)
        }
        TodoAction::Unrecognized => Ok(todos.clone()),
    }
}
