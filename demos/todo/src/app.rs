//! Application shell: owns the store and the mounted panel

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use tracing::{info, warn};
use tui_store::{ActionHistory, EventKind, LoggingMiddleware, ReplayLog, StoreWithMiddleware};

use crate::action::TodoAction;
use crate::components::{binding, BoundTodoPanel, TodoOwnProps, TodoPanel};
use crate::reducer::{reducer, Todos};

/// Store with action logging and recording
pub type TodoStore =
    StoreWithMiddleware<Todos, TodoAction, (LoggingMiddleware, ActionHistory<TodoAction>)>;

const HELP: &str = "Enter: add  Backspace: delete  Esc: quit";

pub struct App {
    store: TodoStore,
    panel: BoundTodoPanel,
    own: TodoOwnProps,
    should_quit: bool,
}

impl App {
    /// Create the store and mount the root panel against it
    pub fn new(own: TodoOwnProps) -> Self {
        let mut store = StoreWithMiddleware::new(
            Todos::new(),
            reducer,
            (LoggingMiddleware::new(), ActionHistory::new()),
        );
        let panel = binding().mount(TodoPanel::new(), &mut store);

        Self {
            store,
            panel,
            own,
            should_quit: false,
        }
    }

    /// Dispatch previously recorded actions, returning how many were applied
    pub fn replay(&mut self, log: ReplayLog<TodoAction>) -> usize {
        if !log.skipped.is_empty() {
            warn!(skipped = log.skipped.len(), "Some recorded actions were skipped");
        }
        let mut applied = 0;
        for action in log.actions {
            self.store
                .dispatch(action)
                .unwrap_or_else(|never| match never {});
            applied += 1;
        }
        info!(applied, "Replayed action log");
        applied
    }

    pub fn handle_event(&mut self, event: &EventKind) {
        if event.is_interrupt() {
            self.should_quit = true;
            return;
        }
        if let EventKind::Resize(_, _) = event {
            self.panel.invalidate();
            return;
        }
        self.panel
            .handle_event(event, &mut self.store, self.own.clone())
            .unwrap_or_else(|never| match never {});
    }

    /// Whether the store notified the panel (or the terminal resized) since the last render
    pub fn needs_render(&self) -> bool {
        self.panel.needs_render()
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [main, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        self.panel
            .render(frame, main, &self.store, self.own.clone());

        let help = Paragraph::new(HELP)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, help_area);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Unmount the panel and hand back the recorded actions
    pub fn shutdown(self) -> Vec<TodoAction> {
        let App {
            mut store, panel, ..
        } = self;
        panel.unmount(&mut store);
        store.middleware().1.entries().to_vec()
    }
}
