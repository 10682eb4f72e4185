//! Core traits and types for tui-store
//!
//! This crate provides a small reducer store with observer subscriptions and a
//! binding adapter that feeds store state into ratatui components.
//!
//! # Core Concepts
//!
//! - **Action**: tagged values describing an intended state change
//! - **Store**: owns the state, applies a pure reducer, notifies observers
//! - **Observer**: zero-argument callback keyed by a [`SubscriptionId`]
//! - **Connect**: binds a component to a store through typed, merged props
//! - **Component**: UI units that render from props and emit actions
//!
//! # Basic Example
//!
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
//! let id = store.subscribe(|| tracing::info!("state changed"));
//! store.dispatch(TodoAction::AddItem("buy milk".into()))?;
//! store.unsubscribe(id);
//! ```
//!
//! # Dispatch Loop
//!
//! An application owns the store and passes it explicitly to everything that
//! needs it; there is no global or ambient store:
//!
//! 1. A terminal event reaches a bound component through [`Connected::handle_event`]
//! 2. The component returns actions, or sends them through the [`Dispatch`] in its props
//! 3. The store applies them and notifies observers, flagging bound components
//! 4. The loop re-renders every component whose [`Connected::needs_render`] is set

pub mod action;
pub mod component;
pub mod connect;
pub mod dispatch;
pub mod event;
pub mod history;
pub mod poller;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::Action;
pub use component::Component;

// Store exports
pub use dispatch::Dispatch;
pub use store::{
    LoggingMiddleware, Middleware, Reducer, StateStore, Store, StoreWithMiddleware,
    SubscriptionId,
};

// Binding exports
pub use connect::{connect, Connect, Connected, MergeProps};

// History exports
pub use history::{ActionHistory, HistoryError, ReplayLog};

// Event exports
pub use event::EventKind;
pub use poller::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{buffer_to_string_plain, char_key, key, CallCounter, RenderHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::component::Component;
    pub use crate::connect::{connect, prefer, Connect, Connected, MergeProps};
    pub use crate::dispatch::Dispatch;
    pub use crate::event::EventKind;
    pub use crate::history::ActionHistory;
    pub use crate::poller::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent};
    pub use crate::store::{
        LoggingMiddleware, Middleware, Reducer, StateStore, Store, StoreWithMiddleware,
        SubscriptionId,
    };

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
