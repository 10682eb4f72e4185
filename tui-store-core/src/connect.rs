//! Binding adapter between a store and a component
//!
//! [`connect`] takes a state selector and an action selector and produces a
//! [`Connect`] that can mount components against a store. A mounted
//! [`Connected`] instance holds exactly one subscription: the store marks it
//! dirty on every transition, and the next render re-derives props from the
//! current snapshot.
//!
//! Props are typed. The merged props type implements [`MergeProps`], whose
//! `merge` receives the state-derived part, the action-derived part and the
//! own props, and is responsible for letting own props win.
//!
//! ```ignore
//! fn map_state(items: &Vec<String>, _own: &TodoOwnProps) -> TodoStateProps {
//!     TodoStateProps { items: items.clone() }
//! }
//!
//! fn map_actions(dispatch: &Dispatch<TodoAction>, _own: &TodoOwnProps) -> TodoActions {
//!     TodoActions::new(dispatch.clone())
//! }
//!
//! let mut panel = connect(map_state, map_actions).mount(TodoPanel::new(), &mut store);
//! panel.render(frame, area, &store, own.clone());
//! panel.handle_event(&event, &mut store, own)?;
//! panel.unmount(&mut store);
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use ratatui::{layout::Rect, Frame};
use tracing::{debug, warn};

use crate::component::Component;
use crate::dispatch::Dispatch;
use crate::event::EventKind;
use crate::store::{StateStore, SubscriptionId};
use crate::Action;

/// Builds a component's props from its three sources
///
/// Implementations must give own props precedence: a field the parent set
/// explicitly is never overwritten by a derived value. [`prefer`] covers the
/// common optional-override case.
pub trait MergeProps<O, SP, AP>: Sized {
    fn merge(state: SP, actions: AP, own: O) -> Self;
}

/// Field-level precedence: the own value if present, the derived one otherwise
pub fn prefer<T>(own: Option<T>, derived: T) -> T {
    own.unwrap_or(derived)
}

/// Selectors binding a store to components
///
/// # Type Parameters
/// * `S` - store state
/// * `A` - action type
/// * `O` - own props passed in by the parent
/// * `SP` - props derived from state
/// * `AP` - props derived from the dispatch capability
pub struct Connect<S, A, O, SP, AP> {
    map_state: fn(&S, &O) -> SP,
    map_actions: fn(&Dispatch<A>, &O) -> AP,
}

/// Create a binding from a state selector and an action selector
pub fn connect<S, A: Action, O, SP, AP>(
    map_state: fn(&S, &O) -> SP,
    map_actions: fn(&Dispatch<A>, &O) -> AP,
) -> Connect<S, A, O, SP, AP> {
    Connect {
        map_state,
        map_actions,
    }
}

impl<S, A, O, SP, AP> Clone for Connect<S, A, O, SP, AP> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A, O, SP, AP> Copy for Connect<S, A, O, SP, AP> {}

impl<S, A, O, SP, AP> fmt::Debug for Connect<S, A, O, SP, AP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connect").finish_non_exhaustive()
    }
}

impl<S, A: Action, O, SP, AP> Connect<S, A, O, SP, AP> {
    /// Derive merged props from the store's current snapshot
    pub fn props<St, P>(&self, store: &St, own: O) -> P
    where
        St: StateStore<State = S, Action = A>,
        P: MergeProps<O, SP, AP>,
    {
        self.derive(store.state(), &store.dispatcher(), own)
    }

    fn derive<P: MergeProps<O, SP, AP>>(&self, state: &S, dispatch: &Dispatch<A>, own: O) -> P {
        let state_props = (self.map_state)(state, &own);
        let action_props = (self.map_actions)(dispatch, &own);
        P::merge(state_props, action_props, own)
    }

    /// Mount a component against a store
    ///
    /// Subscribes one observer that flags the instance for re-render. The
    /// returned instance must be handed back through [`Connected::unmount`].
    pub fn mount<St, C>(&self, component: C, store: &mut St) -> Connected<C, S, A, O, SP, AP>
    where
        St: StateStore<State = S, Action = A>,
    {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = store.subscribe(move || flag.set(true));
        debug!(subscription = ?subscription, "Bound component mounted");

        Connected {
            component,
            connect: *self,
            dispatch: store.dispatcher(),
            subscription: Some(subscription),
            dirty,
        }
    }
}

/// A component mounted against a store
///
/// Lifecycle: created mounted by [`Connect::mount`], consumed by
/// [`unmount`](Connected::unmount). Mounting again creates a new instance
/// with a new subscription.
pub struct Connected<C, S, A, O, SP, AP> {
    component: C,
    connect: Connect<S, A, O, SP, AP>,
    dispatch: Dispatch<A>,
    subscription: Option<SubscriptionId>,
    dirty: Rc<Cell<bool>>,
}

impl<C, S, A: Action, O, SP, AP> Connected<C, S, A, O, SP, AP> {
    /// Whether the store notified since the last render
    pub fn needs_render(&self) -> bool {
        self.dirty.get()
    }

    /// Request a render regardless of store notifications (e.g. after resize)
    pub fn invalidate(&self) {
        self.dirty.set(true);
    }

    /// Whether the instance still holds its subscription
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// The subscription held by this instance
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// The wrapped component
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Derive merged props from the store's current snapshot
    pub fn props<St, P>(&self, store: &St, own: O) -> P
    where
        St: StateStore<State = S, Action = A>,
        P: MergeProps<O, SP, AP>,
    {
        self.connect.derive(store.state(), &self.dispatch, own)
    }

    /// Re-derive props from the current snapshot and render the component
    pub fn render<St>(&mut self, frame: &mut Frame, area: Rect, store: &St, own: O)
    where
        St: StateStore<State = S, Action = A>,
        C: Component<A>,
        for<'a> C::Props<'a>: MergeProps<O, SP, AP>,
    {
        let props: C::Props<'_> = self.connect.derive(store.state(), &self.dispatch, own);
        self.component.render(frame, area, props);
        self.dirty.set(false);
    }

    /// Let the component handle an event and apply the actions it produced
    ///
    /// Actions returned by the component are dispatched first, then actions it
    /// sent through the dispatch capability in its props. Returns the number of
    /// actions applied; a rejected action stops processing and its error is
    /// returned.
    ///
    /// A key press marks the instance for render even when no action results,
    /// since the component's own UI state (a draft, a cursor) may have changed.
    pub fn handle_event<St>(
        &mut self,
        event: &EventKind,
        store: &mut St,
        own: O,
    ) -> Result<usize, St::Error>
    where
        St: StateStore<State = S, Action = A>,
        C: Component<A>,
        for<'a> C::Props<'a>: MergeProps<O, SP, AP>,
    {
        let props: C::Props<'_> = self.connect.derive(store.state(), &self.dispatch, own);
        let actions: Vec<A> = self.component.handle_event(event, props).into_iter().collect();
        if event.key_press().is_some() {
            self.dirty.set(true);
        }

        let mut applied = 0;
        for action in actions {
            store.dispatch(action)?;
            applied += 1;
        }
        applied += store.dispatch_pending()?;
        Ok(applied)
    }

    /// Unsubscribe from the store and drop the instance
    pub fn unmount<St>(mut self, store: &mut St)
    where
        St: StateStore<State = S, Action = A>,
    {
        if let Some(id) = self.subscription.take() {
            store.unsubscribe(id);
            debug!(subscription = ?id, "Bound component unmounted");
        }
    }
}

impl<C, S, A, O, SP, AP> Drop for Connected<C, S, A, O, SP, AP> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription {
            warn!(subscription = ?id, "Bound component dropped while mounted, observer leaked");
        }
    }
}

impl<C: fmt::Debug, S, A, O, SP, AP> fmt::Debug for Connected<C, S, A, O, SP, AP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connected")
            .field("component", &self.component)
            .field("subscription", &self.subscription)
            .field("needs_render", &self.dirty.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use crossterm::event::KeyCode;
    use ratatui::widgets::Paragraph;

    use super::*;
    use crate::store::Store;
    use crate::testing::{key, RenderHarness};

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        AddItem(String),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "ADD_ITEM"
        }
    }

    type Items = Vec<String>;

    fn reducer(state: &Items, action: TestAction) -> Result<Items, Infallible> {
        match action {
            TestAction::AddItem(item) => Ok([state.as_slice(), &[item]].concat()),
        }
    }

    #[derive(Clone, Default)]
    struct OwnProps {
        title: Option<String>,
    }

    struct StateProps {
        title: String,
        items: Items,
    }

    struct ActionProps {
        dispatch: Dispatch<TestAction>,
    }

    impl ActionProps {
        fn add_item(&self, item: &str) {
            self.dispatch.send(TestAction::AddItem(item.to_string()));
        }
    }

    struct ListProps {
        title: String,
        items: Items,
        actions: ActionProps,
    }

    impl MergeProps<OwnProps, StateProps, ActionProps> for ListProps {
        fn merge(state: StateProps, actions: ActionProps, own: OwnProps) -> Self {
            Self {
                title: prefer(own.title, state.title),
                items: state.items,
                actions,
            }
        }
    }

    fn map_state(items: &Items, _own: &OwnProps) -> StateProps {
        StateProps {
            title: "Y".to_string(),
            items: items.clone(),
        }
    }

    fn map_actions(dispatch: &Dispatch<TestAction>, _own: &OwnProps) -> ActionProps {
        ActionProps {
            dispatch: dispatch.clone(),
        }
    }

    /// Enter returns an action, 'a' sends one through the dispatch prop
    #[derive(Debug)]
    struct List;

    impl Component<TestAction> for List {
        type Props<'a> = ListProps;

        fn handle_event(
            &mut self,
            event: &EventKind,
            props: Self::Props<'_>,
        ) -> impl IntoIterator<Item = TestAction> {
            match event.key_press().map(|k| k.code) {
                Some(KeyCode::Enter) => Some(TestAction::AddItem("returned".to_string())),
                Some(KeyCode::Char('a')) => {
                    props.actions.add_item("sent");
                    None
                }
                _ => None,
            }
        }

        fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
            let mut lines = vec![props.title];
            lines.extend(props.items);
            frame.render_widget(Paragraph::new(lines.join("\n")), area);
        }
    }

    fn own(title: Option<&str>) -> OwnProps {
        OwnProps {
            title: title.map(str::to_string),
        }
    }

    #[test]
    fn test_own_props_win() {
        let store = Store::new(Items::new(), reducer);
        let binding = connect(map_state, map_actions);

        let props: ListProps = binding.props(&store, own(Some("X")));
        assert_eq!(props.title, "X");

        let props: ListProps = binding.props(&store, own(None));
        assert_eq!(props.title, "Y");
    }

    #[test]
    fn test_mount_subscribes_once() {
        let mut store = Store::new(Items::new(), reducer);
        let bound = connect(map_state, map_actions).mount(List, &mut store);

        assert!(bound.is_mounted());
        assert!(bound.subscription().is_some());
        assert_eq!(store.subscriber_count(), 1);

        bound.unmount(&mut store);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_remount_gets_fresh_subscription() {
        let mut store = Store::new(Items::new(), reducer);
        let binding = connect(map_state, map_actions);

        let first = binding.mount(List, &mut store);
        let first_id = first.subscription();
        first.unmount(&mut store);

        let second = binding.mount(List, &mut store);
        assert_ne!(second.subscription(), first_id);
        assert_eq!(store.subscriber_count(), 1);
        second.unmount(&mut store);
    }

    #[test]
    fn test_notification_marks_for_render() {
        let mut store = Store::new(Items::new(), reducer);
        let mut bound = connect(map_state, map_actions).mount(List, &mut store);
        let mut render = RenderHarness::new(20, 4);

        assert!(bound.needs_render());
        render.render_to_string_plain(|frame| {
            let area = frame.area();
            bound.render(frame, area, &store, OwnProps::default());
        });
        assert!(!bound.needs_render());

        store.dispatch(TestAction::AddItem("buy milk".into())).unwrap();
        assert!(bound.needs_render());

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            bound.render(frame, area, &store, own(Some("X")));
        });
        assert!(output.starts_with("X\nbuy milk"), "got: {output:?}");
        assert!(!bound.needs_render());

        bound.unmount(&mut store);
        store.dispatch(TestAction::AddItem("walk dog".into())).unwrap();
    }

    #[test]
    fn test_handle_event_dispatches_returned_and_sent_actions() {
        let mut store = Store::new(Items::new(), reducer);
        let mut bound = connect(map_state, map_actions).mount(List, &mut store);

        let applied = bound
            .handle_event(&EventKind::Key(key("enter")), &mut store, OwnProps::default())
            .unwrap();
        assert_eq!(applied, 1);

        let applied = bound
            .handle_event(&EventKind::Key(key("a")), &mut store, OwnProps::default())
            .unwrap();
        assert_eq!(applied, 1);

        let applied = bound
            .handle_event(&EventKind::Key(key("z")), &mut store, OwnProps::default())
            .unwrap();
        assert_eq!(applied, 0);

        assert_eq!(store.state(), &vec!["returned", "sent"]);
        bound.unmount(&mut store);
    }

    #[test]
    fn test_key_without_action_marks_for_render() {
        let mut store = Store::new(Items::new(), reducer);
        let mut bound = connect(map_state, map_actions).mount(List, &mut store);
        let mut render = RenderHarness::new(20, 4);
        render.render(|frame| {
            let area = frame.area();
            bound.render(frame, area, &store, OwnProps::default());
        });
        assert!(!bound.needs_render());

        let applied = bound
            .handle_event(&EventKind::Key(key("z")), &mut store, OwnProps::default())
            .unwrap();

        assert_eq!(applied, 0);
        assert!(bound.needs_render());

        // Resize is the application's call, not the component's
        render.render(|frame| {
            let area = frame.area();
            bound.render(frame, area, &store, OwnProps::default());
        });
        bound
            .handle_event(&EventKind::Resize(80, 24), &mut store, OwnProps::default())
            .unwrap();
        assert!(!bound.needs_render());
        bound.unmount(&mut store);
    }

    #[test]
    fn test_dropped_mount_stays_visible() {
        let mut store = Store::new(Items::new(), reducer);
        let bound = connect(map_state, map_actions).mount(List, &mut store);
        drop(bound);

        assert_eq!(store.subscriber_count(), 1);
    }
}
