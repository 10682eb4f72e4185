//! Todo list TUI built on tui-store
//!
//! The todo list is the store state, `ADD_ITEM` the only action that changes
//! it, and [`components::TodoPanel`] the bound view: the store is owned by
//! [`app::App`] and handed explicitly to the panel for every render and event.

pub mod action;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod reducer;
