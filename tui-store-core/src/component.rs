//! Component trait for renderable units

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI unit that renders from props and turns events into actions
///
/// Components follow these rules:
/// 1. Props contain ALL read-only data needed for rendering
/// 2. `handle_event` returns actions (or sends them through a dispatch
///    capability carried in props), never touches the store directly
/// 3. `render` is a function of props plus internal UI state
///
/// Internal UI state (a draft input, a scroll offset) can live in `&mut self`,
/// but application data changes must go through actions.
///
/// Components never see the store. To feed one from store state, wrap it with
/// [`connect`](crate::connect::connect).
///
/// # Example
///
/// ```ignore
/// use tui_store::{Component, EventKind, Frame, Rect};
///
/// struct Counter;
///
/// struct CounterProps {
///     count: i32,
/// }
///
/// impl Component<AppAction> for Counter {
///     type Props<'a> = CounterProps;
///
///     fn handle_event(&mut self, event: &EventKind, _props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         match event.key_press().map(|k| k.code) {
///             Some(KeyCode::Up) => Some(AppAction::Increment),
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(format!("Count: {}", props.count)), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `vec![...]` - multiple actions
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
