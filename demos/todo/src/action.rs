//! Actions - what can happen to the todo list
//!
//! Actions serialize as `{"kind": "ADD_ITEM", "payload": "buy milk"}`, which
//! is also the line format of recorded action logs.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tui_store::Action;

#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize)]
#[action(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append an item to the list
    AddItem(String),

    /// Any kind this version does not know, whatever its payload; the reducer ignores it
    Unrecognized,
}

/// Decoding shim: `kind` is required, the payload is only inspected for known kinds
#[derive(Deserialize)]
struct WireAction {
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl<'de> Deserialize<'de> for TodoAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireAction::deserialize(deserializer)?;
        TodoAction::try_from(wire).map_err(de::Error::custom)
    }
}

impl TryFrom<WireAction> for TodoAction {
    type Error = String;

    fn try_from(wire: WireAction) -> Result<Self, Self::Error> {
        match wire.kind.as_str() {
            "ADD_ITEM" => match wire.payload {
                Value::String(text) => Ok(TodoAction::AddItem(text)),
                other => Err(format!("ADD_ITEM payload must be a string, got {other}")),
            },
            _ => Ok(TodoAction::Unrecognized),
        }
    }
}

/// Action creator for [`TodoAction::AddItem`]
pub fn add_item(text: impl Into<String>) -> TodoAction {
    TodoAction::AddItem(text.into())
}
