//! Dispatch capability handed out to action selectors

use tokio::sync::mpsc;

use crate::Action;

/// Cloneable handle that queues actions for the store that created it.
///
/// Obtained from [`StateStore::dispatcher`](crate::StateStore::dispatcher).
/// Queued actions are applied, in the order they were sent, the next time the
/// owner calls [`dispatch_pending`](crate::StateStore::dispatch_pending).
///
/// ```ignore
/// let dispatch = store.dispatcher();
/// dispatch.send(TodoAction::AddItem("buy milk".into()));
/// store.dispatch_pending()?;
/// ```
pub struct Dispatch<A> {
    tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> Dispatch<A> {
    pub(crate) fn new(tx: mpsc::UnboundedSender<A>) -> Self {
        Self { tx }
    }

    /// Queue an action for the store.
    ///
    /// Returns `false` if the store has been dropped.
    pub fn send(&self, action: A) -> bool {
        match self.tx.send(action) {
            Ok(()) => true,
            Err(mpsc::error::SendError(action)) => {
                tracing::debug!(action = %action.name(), "Store gone, action dropped");
                false
            }
        }
    }

    /// Whether the owning store is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<A> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A> std::fmt::Debug for Dispatch<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
