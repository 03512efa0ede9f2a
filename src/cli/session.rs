//! Interactive selection session.
//!
//! The menu is a pure state machine: [`update`] takes the current
//! [`Session`] and one [`Event`] and returns the next session plus the
//! [`Effect`]s the terminal driver must carry out. Nothing here touches the
//! terminal, so the whole interaction can be tested directly.

use crate::domain::models::{ClusterId, CommandTemplate, Config};

/// Widest layout the view will use.
pub const MAX_WIDTH: usize = 135;

/// Horizontal padding around the view (one column left, four right).
pub const FRAME_WIDTH: usize = 5;

/// Which list has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Cluster multi-select.
    Clusters,
    /// Command multi-select.
    Commands,
}

/// Operator input after key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Move the cursor up.
    Up,
    /// Move the cursor down.
    Down,
    /// Toggle the option under the cursor.
    Toggle,
    /// Select everything in the focused list, or nothing if all are selected.
    ToggleAll,
    /// Focus the next list.
    NextField,
    /// Focus the previous list.
    PrevField,
    /// Run the current selection.
    Confirm,
    /// Leave the menu.
    Quit,
}

/// Something that happened to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyInput),
    /// The terminal is now `width` columns wide.
    Resize {
        /// Terminal width in columns.
        width: usize,
    },
    /// A run finished; `report` is its rendered text.
    ReportReady(String),
}

/// Work for the terminal driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Redraw the view.
    Render,
    /// Run the selection through the execution coordinator.
    RunBatch(Selection),
    /// Exit the menu.
    Quit,
}

/// Typed snapshot of what the operator selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected clusters, in menu order.
    pub clusters: Vec<ClusterId>,
    /// Selected templates, in menu order. May contain the custom sentinel.
    pub templates: Vec<CommandTemplate>,
}

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption<T> {
    /// Text shown in the list.
    pub label: String,
    /// Value handed to the run.
    pub value: T,
    /// Whether the entry is ticked.
    pub selected: bool,
}

impl<T> MenuOption<T> {
    fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
            selected: false,
        }
    }
}

/// State of the interactive menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    clusters: Vec<MenuOption<ClusterId>>,
    commands: Vec<MenuOption<CommandTemplate>>,
    focus: Field,
    cluster_cursor: usize,
    command_cursor: usize,
    width: usize,
    output: String,
    running: bool,
}

impl Session {
    /// Build the menu from the configured catalog, plus the custom command.
    pub fn new(config: &Config) -> Self {
        Self {
            clusters: config
                .clusters
                .iter()
                .map(|cluster| MenuOption::new(cluster.as_str(), cluster.clone()))
                .collect(),
            commands: config
                .command_options()
                .into_iter()
                .map(|entry| MenuOption::new(entry.name, entry.command))
                .collect(),
            focus: Field::Clusters,
            cluster_cursor: 0,
            command_cursor: 0,
            width: MAX_WIDTH,
            output: String::new(),
            running: false,
        }
    }

    /// The operator's current selection.
    pub fn selection(&self) -> Selection {
        Selection {
            clusters: self.selected_clusters(),
            templates: self.selected_templates(),
        }
    }

    /// Ticked clusters in menu order.
    pub fn selected_clusters(&self) -> Vec<ClusterId> {
        selected_values(&self.clusters)
    }

    /// Ticked templates in menu order.
    pub fn selected_templates(&self) -> Vec<CommandTemplate> {
        selected_values(&self.commands)
    }

    /// Cluster entries.
    pub fn cluster_options(&self) -> &[MenuOption<ClusterId>] {
        &self.clusters
    }

    /// Command entries, custom last.
    pub fn command_options(&self) -> &[MenuOption<CommandTemplate>] {
        &self.commands
    }

    /// Focused list.
    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Cursor position within `field`.
    pub fn cursor(&self, field: Field) -> usize {
        match field {
            Field::Clusters => self.cluster_cursor,
            Field::Commands => self.command_cursor,
        }
    }

    /// Usable layout width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Text of the last finished run.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Field::Clusters => self.clusters.len(),
            Field::Commands => self.commands.len(),
        }
    }

    fn focused_cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            Field::Clusters => &mut self.cluster_cursor,
            Field::Commands => &mut self.command_cursor,
        }
    }

    fn toggle_current(&mut self) {
        match self.focus {
            Field::Clusters => toggle_at(&mut self.clusters, self.cluster_cursor),
            Field::Commands => toggle_at(&mut self.commands, self.command_cursor),
        }
    }

    fn toggle_all(&mut self) {
        match self.focus {
            Field::Clusters => toggle_every(&mut self.clusters),
            Field::Commands => toggle_every(&mut self.commands),
        }
    }
}

fn selected_values<T: Clone>(options: &[MenuOption<T>]) -> Vec<T> {
    options
        .iter()
        .filter(|option| option.selected)
        .map(|option| option.value.clone())
        .collect()
}

fn toggle_at<T>(options: &mut [MenuOption<T>], index: usize) {
    if let Some(option) = options.get_mut(index) {
        option.selected = !option.selected;
    }
}

fn toggle_every<T>(options: &mut [MenuOption<T>]) {
    let select = options.iter().any(|option| !option.selected);
    for option in options {
        option.selected = select;
    }
}

/// Layout width for a terminal `width` columns wide.
pub fn layout_width(width: usize) -> usize {
    width.min(MAX_WIDTH).saturating_sub(FRAME_WIDTH)
}

/// Advance the session by one event.
pub fn update(mut session: Session, event: Event) -> (Session, Vec<Effect>) {
    match event {
        Event::Resize { width } => {
            session.width = layout_width(width);
            (session, vec![Effect::Render])
        }
        Event::ReportReady(report) => {
            session.output = report;
            session.running = false;
            (session, vec![Effect::Render])
        }
        Event::Key(_) if session.running => (session, Vec::new()),
        Event::Key(KeyInput::Quit) => (session, vec![Effect::Quit]),
        Event::Key(KeyInput::Confirm) => {
            let selection = session.selection();
            session.output.clear();
            session.running = true;
            (session, vec![Effect::Render, Effect::RunBatch(selection)])
        }
        Event::Key(KeyInput::Up) => {
            let cursor = session.focused_cursor_mut();
            *cursor = cursor.saturating_sub(1);
            (session, vec![Effect::Render])
        }
        Event::Key(KeyInput::Down) => {
            let last = session.focused_len().saturating_sub(1);
            let cursor = session.focused_cursor_mut();
            *cursor = (*cursor + 1).min(last);
            (session, vec![Effect::Render])
        }
        Event::Key(KeyInput::Toggle) => {
            session.toggle_current();
            (session, vec![Effect::Render])
        }
        Event::Key(KeyInput::ToggleAll) => {
            session.toggle_all();
            (session, vec![Effect::Render])
        }
        Event::Key(KeyInput::NextField) => {
            session.focus = Field::Commands;
            (session, vec![Effect::Render])
        }
        Event::Key(KeyInput::PrevField) => {
            session.focus = Field::Clusters;
            (session, vec![Effect::Render])
        }
    }
}
