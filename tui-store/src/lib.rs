//! tui-store: a reducer store with observer subscriptions for Rust TUI apps
//!
//! Like Redux with `connect`, but for terminals. The store owns the state,
//! every change goes through a dispatched action, observers are notified after
//! each transition, and bound components re-derive their props from the
//! current snapshot.
//!
//! # Example
//! ```ignore
//! use std::convert::Infallible;
//! use tui_store::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum TodoAction {
//!     AddItem(String),
//! }
//!
//! fn reducer(items: &Vec<String>, action: TodoAction) -> Result<Vec<String>, Infallible> {
//!     match action {
//!         TodoAction::AddItem(item) => Ok([items.as_slice(), &[item]].concat()),
//!     }
//! }
//!
//! let mut store = Store::new(Vec::new(), reducer);
//! let mut panel = connect(map_state, map_actions).mount(TodoPanel::new(), &mut store);
//! ```

// Re-export everything from core
pub use tui_store_core::*;

// Re-export derive macros
pub use tui_store_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_store_core::{Action, Component, MergeProps, Middleware, StateStore};

    // Store
    pub use tui_store_core::{
        ActionHistory, Dispatch, LoggingMiddleware, Reducer, Store, StoreWithMiddleware,
        SubscriptionId,
    };

    // Binding
    pub use tui_store_core::connect::prefer;
    pub use tui_store_core::{connect, Connect, Connected};

    // Events
    pub use tui_store_core::{
        process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent,
    };

    // Derive macros
    pub use tui_store_macros::Action;

    // Ratatui re-exports
    pub use tui_store_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
