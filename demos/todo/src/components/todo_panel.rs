//! The todo panel and its store binding
//!
//! FRAMEWORK PATTERN: connect
//! - `map_state` selects what the panel reads from the store
//! - `map_actions` wraps the dispatch capability into typed callbacks
//! - `TodoPanelProps::merge` lets own props override derived ones

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_store::connect::prefer;
use tui_store::{connect, Component, Connect, Connected, Dispatch, EventKind, MergeProps};

use super::item_list::{ItemList, ItemListProps};
use crate::action::{add_item, TodoAction};
use crate::reducer::Todos;

/// Title used when the parent does not pass one
pub const DEFAULT_TITLE: &str = "Untitled";
/// Input placeholder
pub const PLACEHOLDER: &str = "Task name";

/// Props passed in by the parent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoOwnProps {
    pub title: Option<String>,
}

/// Props derived from store state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoStateProps {
    pub items: Vec<String>,
}

/// Props derived from the dispatch capability
#[derive(Debug, Clone)]
pub struct TodoActions {
    dispatch: Dispatch<TodoAction>,
}

impl TodoActions {
    pub fn new(dispatch: Dispatch<TodoAction>) -> Self {
        Self { dispatch }
    }

    /// Dispatch an `ADD_ITEM` action
    pub fn add_item(&self, text: impl Into<String>) {
        self.dispatch.send(add_item(text));
    }
}

/// Everything the panel renders from
#[derive(Debug, Clone)]
pub struct TodoPanelProps {
    pub title: String,
    pub items: Vec<String>,
    pub actions: TodoActions,
}

impl MergeProps<TodoOwnProps, TodoStateProps, TodoActions> for TodoPanelProps {
    fn merge(state: TodoStateProps, actions: TodoActions, own: TodoOwnProps) -> Self {
        Self {
            title: prefer(own.title, DEFAULT_TITLE.to_string()),
            items: state.items,
            actions,
        }
    }
}

pub fn map_state(todos: &Todos, _own: &TodoOwnProps) -> TodoStateProps {
    TodoStateProps {
        items: todos.clone(),
    }
}

pub fn map_actions(dispatch: &Dispatch<TodoAction>, _own: &TodoOwnProps) -> TodoActions {
    TodoActions::new(dispatch.clone())
}

pub type TodoBinding = Connect<Todos, TodoAction, TodoOwnProps, TodoStateProps, TodoActions>;

pub type BoundTodoPanel =
    Connected<TodoPanel, Todos, TodoAction, TodoOwnProps, TodoStateProps, TodoActions>;

/// The panel's store binding
pub fn binding() -> TodoBinding {
    connect(map_state, map_actions)
}

/// Title, input line and item list
///
/// The draft text is UI state owned by the panel; only submitted items reach
/// the store. Enter submits a non-empty draft and clears it.
#[derive(Debug, Default)]
pub struct TodoPanel {
    draft: String,
    list: ItemList,
}

impl TodoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft text
    pub fn draft(&self) -> &str {
        &self.draft
    }
}

impl Component<TodoAction> for TodoPanel {
    type Props<'a> = TodoPanelProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = TodoAction> {
        if let Some(key) = event.key_press() {
            let plain = !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            match key.code {
                KeyCode::Char(c) if plain => self.draft.push(c),
                KeyCode::Backspace => {
                    self.draft.pop();
                }
                // Empty drafts can't be submitted
                KeyCode::Enter if !self.draft.is_empty() => {
                    props.actions.add_item(std::mem::take(&mut self.draft));
                }
                _ => {}
            }
        }
        None::<TodoAction>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .title(format!(" {} ", props.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [input_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
        let [draft_area, button_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(5)]).areas(input_area);

        let draft = if self.draft.is_empty() {
            Line::from(vec![
                Span::raw("> "),
                Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![Span::raw("> "), Span::raw(self.draft.as_str())])
        };
        frame.render_widget(Paragraph::new(draft), draft_area);

        let button_style = if self.draft.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        frame.render_widget(Paragraph::new("[Add]").style(button_style), button_area);

        self.list.render(
            frame,
            list_area,
            ItemListProps {
                items: &props.items,
                empty_text: "No items yet",
            },
        );
    }
}
