//! Action trait for type-safe state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to a store
///
/// An action is a tagged value: the tag is its *kind* (returned by
/// [`name`](Action::name)), the payload is whatever data the variant carries.
/// Actions are transient; the store hands them to the reducer and keeps nothing
/// unless a middleware records them.
///
/// - Clone: actions may be logged, recorded or replayed
/// - Debug: for logging
/// - Send + 'static: so they can travel through dispatch channels
///
/// Use `#[derive(Action)]` from `tui-store-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// The action kind, used for logging and history
    fn name(&self) -> &'static str;
}
