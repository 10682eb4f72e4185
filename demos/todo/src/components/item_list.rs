use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use tui_store::Component;

use crate::action::TodoAction;

pub struct ItemListProps<'a> {
    pub items: &'a [String],
    /// Shown instead of the list when there are no items
    pub empty_text: &'a str,
}

/// Render-only list of todo items
#[derive(Debug, Default)]
pub struct ItemList;

impl Component<TodoAction> for ItemList {
    type Props<'a> = ItemListProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.items.is_empty() {
            let hint = Paragraph::new(props.empty_text).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, area);
            return;
        }

        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|item| ListItem::new(format!("• {item}")))
            .collect();
        frame.render_widget(List::new(items), area);
    }
}
