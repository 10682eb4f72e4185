//! Centralized state store with reducer pattern and observer subscriptions

use std::convert::Infallible;
use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::dispatch::Dispatch;
use crate::Action;

/// A transition function computing the next state from the current one
///
/// The reducer only borrows the current state and must return a fresh value.
/// Returning `Err` rejects the action: the store keeps its current state and
/// hands the error back to the caller of `dispatch`.
pub type Reducer<S, A, E = Infallible> = fn(&S, A) -> Result<S, E>;

/// Opaque handle for one observer subscription
///
/// Handles are unique per store and never reused, so unsubscribing a stale
/// handle can never remove someone else's observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut()>;

/// The store interface consumers depend on
///
/// Bound views and application loops take any `StateStore` instead of a
/// concrete store, so middleware-wrapped stores can be passed in unchanged.
pub trait StateStore {
    type State;
    type Action: Action;
    type Error;

    /// Current state snapshot
    fn state(&self) -> &Self::State;

    /// Apply an action and notify observers
    fn dispatch(&mut self, action: Self::Action) -> Result<(), Self::Error>;

    /// Register an observer called after every applied transition
    fn subscribe<F: FnMut() + 'static>(&mut self, observer: F) -> SubscriptionId;

    /// Remove a subscription. Returns `false` if the handle was not registered.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// A dispatch capability queuing actions for this store
    fn dispatcher(&self) -> Dispatch<Self::Action>;

    /// Apply every queued action, returning how many were applied
    fn dispatch_pending(&mut self) -> Result<usize, Self::Error>;
}

/// Centralized state store with Redux-like reducer pattern
///
/// The store owns the application state, replaces it wholesale with the
/// reducer's result on every dispatch, and then synchronously calls every
/// registered observer in registration order.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
/// * `E` - The reducer's error type
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(rename_all = "SCREAMING_SNAKE_CASE")]
/// enum TodoAction {
///     AddItem(String),
/// }
///
/// fn reducer(state: &Vec<String>, action: TodoAction) -> Result<Vec<String>, Infallible> {
///     match action {
///         TodoAction::AddItem(item) => Ok([state.as_slice(), &[item]].concat()),
///     }
/// }
///
/// let mut store = Store::new(Vec::new(), reducer);
/// let id = store.subscribe(|| println!("changed"));
/// store.dispatch(TodoAction::AddItem("buy milk".into()))?;
/// store.unsubscribe(id);
/// ```
pub struct Store<S, A: Action, E = Infallible> {
    state: S,
    reducer: Reducer<S, A, E>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
    queue_tx: mpsc::UnboundedSender<A>,
    queue_rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action, E> Store<S, A, E> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A, E>) -> Self {
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        Self {
            state,
            reducer,
            observers: Vec::new(),
            next_id: 0,
            queue_tx,
            queue_rx,
        }
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Dispatch an action to the store
    ///
    /// The next state is computed in full before it replaces the current one,
    /// so a rejected action leaves the state and the observers untouched.
    pub fn dispatch(&mut self, action: A) -> Result<(), E> {
        let name = action.name();
        match (self.reducer)(&self.state, action) {
            Ok(next) => {
                self.state = next;
                trace!(action = %name, observers = self.observers.len(), "Notifying observers");
                self.notify();
                Ok(())
            }
            Err(err) => {
                debug!(action = %name, "Reducer rejected action");
                Err(err)
            }
        }
    }

    /// Register an observer and return its handle
    ///
    /// Every call creates an independent subscription: registering the same
    /// callback twice means it runs twice per notification.
    pub fn subscribe<F: FnMut() + 'static>(&mut self, observer: F) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        trace!(subscription = ?id, total = self.observers.len(), "Observer subscribed");
        id
    }

    /// Remove a subscription
    ///
    /// Unknown or already removed handles are ignored and return `false`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        let removed = self.observers.len() != before;
        trace!(subscription = ?id, removed, "Observer unsubscribed");
        removed
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Get a dispatch capability that queues actions for this store
    pub fn dispatcher(&self) -> Dispatch<A> {
        Dispatch::new(self.queue_tx.clone())
    }

    /// Apply queued actions in the order they were sent
    ///
    /// Stops at the first rejected action; anything queued after it stays
    /// queued for the next call.
    pub fn dispatch_pending(&mut self) -> Result<usize, E> {
        let mut applied = 0;
        while let Some(action) = self.next_pending() {
            self.dispatch(action)?;
            applied += 1;
        }
        Ok(applied)
    }

    pub(crate) fn next_pending(&mut self) -> Option<A> {
        self.queue_rx.try_recv().ok()
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer();
        }
    }
}

impl<S: fmt::Debug, A: Action, E> fmt::Debug for Store<S, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S, A: Action, E> StateStore for Store<S, A, E> {
    type State = S;
    type Action = A;
    type Error = E;

    fn state(&self) -> &S {
        Store::state(self)
    }

    fn dispatch(&mut self, action: A) -> Result<(), E> {
        Store::dispatch(self, action)
    }

    fn subscribe<F: FnMut() + 'static>(&mut self, observer: F) -> SubscriptionId {
        Store::subscribe(self, observer)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        Store::unsubscribe(self, id)
    }

    fn dispatcher(&self) -> Dispatch<A> {
        Store::dispatcher(self)
    }

    fn dispatch_pending(&mut self) -> Result<usize, E> {
        Store::dispatch_pending(self)
    }
}

/// Store with middleware support
///
/// Wraps a `Store` and lets middleware observe every action before and after
/// the reducer runs, including actions queued through a [`Dispatch`] handle.
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>, E = Infallible> {
    store: Store<S, A, E>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>, E> StoreWithMiddleware<S, A, M, E> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> Result<(), E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.is_ok());
        result
    }

    /// Apply queued actions through the middleware
    pub fn dispatch_pending(&mut self) -> Result<usize, E> {
        let mut applied = 0;
        while let Some(action) = self.store.next_pending() {
            self.dispatch(action)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a reference to the wrapped store
    pub fn store(&self) -> &Store<S, A, E> {
        &self.store
    }

    /// Get a mutable reference to the wrapped store
    ///
    /// Actions dispatched directly on the inner store bypass the middleware.
    pub fn store_mut(&mut self) -> &mut Store<S, A, E> {
        &mut self.store
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}

impl<S, A: Action, M: Middleware<A>, E> StateStore for StoreWithMiddleware<S, A, M, E> {
    type State = S;
    type Action = A;
    type Error = E;

    fn state(&self) -> &S {
        self.store.state()
    }

    fn dispatch(&mut self, action: A) -> Result<(), E> {
        StoreWithMiddleware::dispatch(self, action)
    }

    fn subscribe<F: FnMut() + 'static>(&mut self, observer: F) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    fn dispatcher(&self) -> Dispatch<A> {
        self.store.dispatcher()
    }

    fn dispatch_pending(&mut self) -> Result<usize, E> {
        StoreWithMiddleware::dispatch_pending(self)
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging, recording, or other
/// cross-cutting concerns to your store.
pub trait Middleware<A: Action> {
    /// Called before the action is handed to the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer ran; `applied` is false when it rejected the action
    fn after(&mut self, action: &A, applied: bool);
}

/// Two middlewares run as one: `before` in order, `after` in reverse
impl<A: Action, M1: Middleware<A>, M2: Middleware<A>> Middleware<A> for (M1, M2) {
    fn before(&mut self, action: &A) {
        self.0.before(action);
        self.1.before(action);
    }

    fn after(&mut self, action: &A, applied: bool) {
        self.1.after(action, applied);
        self.0.after(action, applied);
    }
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, applied: bool) {
        if self.log_after {
            debug!(action = %action.name(), applied, "Action processed");
        }
    }
}
