//! Action history: recording, replay and JSON-lines persistence
//!
//! A store's state is fully determined by its initial state and the actions
//! it applied. [`ActionHistory`] records those actions as a middleware,
//! [`replay`] folds them back into a state, and [`save`] / [`load`] keep them
//! in a JSON-lines file, one action per line.
//!
//! # Example
//!
//! ```ignore
//! use tui_store::history::{self, ActionHistory};
//!
//! let mut store = StoreWithMiddleware::new(Vec::new(), reducer, ActionHistory::new());
//! store.dispatch(TodoAction::AddItem("buy milk".into()))?;
//!
//! history::save("todo.jsonl", store.middleware().entries())?;
//! let log = history::load::<TodoAction>("todo.jsonl")?;
//! let state = history::replay(Vec::new(), reducer, log.actions)?;
//! assert_eq!(&state, store.state());
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{trace, warn};

use crate::store::{Middleware, Reducer};
use crate::Action;

/// Errors reading or writing an action log
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("action log I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode action: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Middleware recording every applied action in dispatch order
///
/// Rejected actions are not recorded: they did not change the state, and
/// leaving them out keeps `replay(initial, entries)` equal to the live state.
#[derive(Debug, Clone)]
pub struct ActionHistory<A> {
    entries: Vec<A>,
}

impl<A> Default for ActionHistory<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A> ActionHistory<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded actions, oldest first
    pub fn entries(&self) -> &[A] {
        &self.entries
    }
}

impl<A: Action> Middleware<A> for ActionHistory<A> {
    fn before(&mut self, _action: &A) {}

    fn after(&mut self, action: &A, applied: bool) {
        if applied {
            self.entries.push(action.clone());
            trace!(action = %action.name(), seq = self.entries.len(), "Action recorded");
        }
    }
}

/// Fold actions over an initial state with the given reducer
///
/// Stops at the first rejected action and returns its error.
pub fn replay<S, A, E, I>(initial: S, reducer: Reducer<S, A, E>, actions: I) -> Result<S, E>
where
    I: IntoIterator<Item = A>,
{
    actions
        .into_iter()
        .try_fold(initial, |state, action| reducer(&state, action))
}

/// A line of an action log that could not be turned into an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: String,
}

/// Actions read from an action log
#[derive(Debug, Clone)]
pub struct ReplayLog<A> {
    pub actions: Vec<A>,
    /// Lines that did not decode into an action
    pub skipped: Vec<SkippedLine>,
}

/// Write actions as JSON lines
pub fn write_jsonl<A: Serialize, W: Write>(mut writer: W, actions: &[A]) -> Result<(), HistoryError> {
    for action in actions {
        serde_json::to_writer(&mut writer, action)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read actions from JSON lines
///
/// Blank lines are ignored. Lines that are not valid UTF-8 or JSON, or do not
/// decode into an action (for example a missing `kind`), are skipped with a
/// warning and reported in [`ReplayLog::skipped`]; an undecodable line never
/// aborts the read. Only failing to read from `reader` is an error.
pub fn read_jsonl<A: DeserializeOwned, R: BufRead>(reader: R) -> Result<ReplayLog<A>, HistoryError> {
    let mut actions = Vec::new();
    let mut skipped = Vec::new();

    for (idx, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if line.trim_ascii().is_empty() {
            continue;
        }
        match serde_json::from_slice::<A>(&line) {
            Ok(action) => actions.push(action),
            Err(err) => {
                warn!(line = idx + 1, error = %err, "Skipping invalid action");
                skipped.push(SkippedLine {
                    line: idx + 1,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(ReplayLog { actions, skipped })
}

/// Write actions to a JSON-lines file, replacing it
pub fn save<A: Serialize>(path: impl AsRef<Path>, actions: &[A]) -> Result<(), HistoryError> {
    let file = File::create(path)?;
    write_jsonl(BufWriter::new(file), actions)
}

/// Read actions from a JSON-lines file
pub fn load<A: DeserializeOwned>(path: impl AsRef<Path>) -> Result<ReplayLog<A>, HistoryError> {
    let file = File::open(path)?;
    read_jsonl(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use serde::Deserialize;

    use super::*;
    use crate::store::StoreWithMiddleware;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
    enum TestAction {
        AddItem(String),
        Reset,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::AddItem(_) => "ADD_ITEM",
                TestAction::Reset => "RESET",
            }
        }
    }

    fn reducer(state: &Vec<String>, action: TestAction) -> Result<Vec<String>, Infallible> {
        Ok(match action {
            TestAction::AddItem(item) => [state.as_slice(), &[item]].concat(),
            TestAction::Reset => Vec::new(),
        })
    }

    fn add(item: &str) -> TestAction {
        TestAction::AddItem(item.to_string())
    }

    #[test]
    fn test_history_replays_to_store_state() {
        let mut store = StoreWithMiddleware::new(Vec::new(), reducer, ActionHistory::new());
        for action in [add("a"), add("b"), TestAction::Reset, add("c")] {
            store.dispatch(action).unwrap();
        }

        let entries = store.middleware().entries().to_vec();
        assert_eq!(entries.len(), 4);

        let replayed = replay(Vec::new(), reducer, entries).unwrap();
        assert_eq!(&replayed, store.state());
        assert_eq!(replayed, vec!["c"]);
    }

    #[test]
    fn test_rejected_actions_not_recorded() {
        #[derive(Debug)]
        struct Full;

        fn bounded(state: &Vec<String>, action: TestAction) -> Result<Vec<String>, Full> {
            match action {
                TestAction::AddItem(_) if !state.is_empty() => Err(Full),
                TestAction::AddItem(item) => Ok(vec![item]),
                TestAction::Reset => Ok(Vec::new()),
            }
        }

        let mut store = StoreWithMiddleware::new(Vec::new(), bounded, ActionHistory::new());
        store.dispatch(add("a")).unwrap();
        store.dispatch(add("b")).unwrap_err();

        assert_eq!(store.middleware().entries(), &[add("a")]);
    }

    #[test]
    fn test_jsonl_format() {
        let mut out = Vec::new();
        write_jsonl(&mut out, &[add("buy milk"), TestAction::Reset]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "{\"kind\":\"ADD_ITEM\",\"payload\":\"buy milk\"}\n{\"kind\":\"RESET\"}\n"
        );
    }

    #[test]
    fn test_read_skips_invalid_lines() {
        let input = concat!(
            "{\"kind\":\"ADD_ITEM\",\"payload\":\"buy milk\"}\n",
            "\n",
            "{\"payload\":\"no kind\"}\n",
            "not json\n",
            "{\"kind\":\"ADD_ITEM\",\"payload\":\"walk dog\"}\n",
        );

        let log: ReplayLog<TestAction> = read_jsonl(input.as_bytes()).unwrap();

        assert_eq!(log.actions, vec![add("buy milk"), add("walk dog")]);
        let lines: Vec<usize> = log.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn test_read_skips_invalid_utf8_and_crlf() {
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"kind\":\"ADD_ITEM\",\"payload\":\"a\"}\r\n");
        input.extend_from_slice(b"\xff\xfe\n");
        input.extend_from_slice(b"{\"kind\":\"ADD_ITEM\",\"payload\":\"b\"}");

        let log: ReplayLog<TestAction> = read_jsonl(input.as_slice()).unwrap();

        assert_eq!(log.actions, vec![add("a"), add("b")]);
        assert_eq!(log.skipped.len(), 1);
        assert_eq!(log.skipped[0].line, 2);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "tui-store-history-{}.jsonl",
            std::process::id()
        ));
        let actions = vec![add("a"), add("b")];

        save(&path, &actions).unwrap();
        let log = load::<TestAction>(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(log.actions, actions);
        assert!(log.skipped.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load::<TestAction>("/definitely/not/here.jsonl").unwrap_err();
        assert!(matches!(err, HistoryError::Io(_)));
    }
}
