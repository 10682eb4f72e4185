//! UI components

mod item_list;
mod todo_panel;

pub use item_list::{ItemList, ItemListProps};
pub use todo_panel::{
    binding, map_actions, map_state, BoundTodoPanel, TodoActions, TodoBinding, TodoOwnProps,
    TodoPanel, TodoPanelProps, TodoStateProps, DEFAULT_TITLE, PLACEHOLDER,
};
pub use tui_store::Component;
