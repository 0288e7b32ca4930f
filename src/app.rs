//! Interactive demo hosting a single tag list.
//!
//! [`App`] follows the model/update/view split: events flow into
//! [`App::update`], rendering happens in [`App::view`]. The tags live in a
//! [`TagStore`] that serves as both data source and delegate.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect as CellRect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::events::{Command, Event, KeyBindings};
use crate::layout::Point;
use crate::ui::{DragPhase, Focus, Mode, TagListDataSource, TagListDelegate, TagListView};

/// Backing store for the demo tags.
#[derive(Debug, Default)]
pub struct TagStore {
    tags: Vec<String>,
    last_action: Option<String>,
}

impl TagStore {
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            tags,
            last_action: None,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Description of the most recent change, for the status bar.
    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    fn record(&mut self, action: String) {
        debug!(action = %action, "Tag store changed");
        self.last_action = Some(action);
    }
}

impl TagListDataSource for TagStore {
    fn count(&self) -> usize {
        self.tags.len()
    }

    fn title_for(&self, index: usize) -> Option<String> {
        self.tags.get(index).cloned()
    }

    fn can_edit(&self, _index: usize) -> bool {
        true
    }

    fn can_move(&self, _index: usize) -> bool {
        true
    }

    fn move_item(&mut self, from: usize, to: usize) {
        if from >= self.tags.len() || to >= self.tags.len() {
            return;
        }
        let tag = self.tags.remove(from);
        self.record(format!("Moved '{tag}' to position {}", to + 1));
        self.tags.insert(to, tag);
    }

    fn collapsed_summary_text(&self) -> Option<String> {
        match self.tags.len() {
            0 => None,
            1 => Some(format!("1 tag: {}", self.tags[0])),
            n => Some(format!("{n} tags: {}", self.tags.join(", "))),
        }
    }

    fn clear_all(&mut self) {
        let count = self.tags.len();
        self.tags.clear();
        self.record(format!("Cleared {count} tags"));
    }
}

impl TagListDelegate for TagStore {
    fn did_select(&mut self, index: usize) {
        if let Some(tag) = self.tags.get(index).cloned() {
            self.record(format!("Selected '{tag}'"));
        }
    }

    fn did_deselect(&mut self, index: usize) {
        if let Some(tag) = self.tags.get(index).cloned() {
            self.record(format!("Deselected '{tag}'"));
        }
    }

    fn did_delete(&mut self, index: usize) {
        if index < self.tags.len() {
            let tag = self.tags.remove(index);
            self.record(format!("Removed '{tag}'"));
        }
    }

    fn did_add_tag(&mut self, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        if self.tags.iter().any(|tag| tag == title) {
            self.record(format!("'{title}' already exists"));
            return;
        }
        self.tags.push(title.to_string());
        self.record(format!("Added '{title}'"));
    }
}

/// A pointer gesture recognized from raw mouse events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap(Point),
    Drag(DragPhase, Point),
}

/// Turns left-button mouse events into taps and drags.
///
/// A press followed by a release is a tap. A press followed by motion starts
/// a drag at the press location.
#[derive(Debug, Default)]
pub struct GestureTracker {
    pressed: Option<Point>,
    dragging: bool,
    last: Option<Point>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed one mouse event at `point`, returning the gestures it completes.
    pub fn handle(&mut self, kind: MouseEventKind, point: Point) -> Vec<Gesture> {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = Some(point);
                self.dragging = false;
                self.last = Some(point);
                Vec::new()
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(origin) = self.pressed else {
                    return Vec::new();
                };
                self.last = Some(point);
                if self.dragging {
                    vec![Gesture::Drag(DragPhase::Changed, point)]
                } else {
                    self.dragging = true;
                    vec![
                        Gesture::Drag(DragPhase::Began, origin),
                        Gesture::Drag(DragPhase::Changed, point),
                    ]
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pressed.take();
                self.last = None;
                if std::mem::take(&mut self.dragging) {
                    vec![Gesture::Drag(DragPhase::Ended, point)]
                } else if pressed.is_some() {
                    vec![Gesture::Tap(point)]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    /// Abort the current press; returns the cancel phase if a drag was active.
    pub fn cancel(&mut self) -> Option<Gesture> {
        self.pressed = None;
        let last = self.last.take();
        if std::mem::take(&mut self.dragging) {
            last.map(|point| Gesture::Drag(DragPhase::Cancelled, point))
        } else {
            None
        }
    }
}

/// The demo application.
pub struct App {
    should_quit: bool,
    tag_list: TagListView,
    store: Rc<RefCell<TagStore>>,
    gestures: GestureTracker,
    bindings: KeyBindings,
    /// Where the tag list was last drawn, in terminal cells.
    list_area: CellRect,
}

impl App {
    /// Create the application around the given tags.
    pub fn new(config: Config, tags: Vec<String>) -> Self {
        debug!(tags = tags.len(), "Creating application");

        let height = config.metrics.tag_row_height;
        let store = Rc::new(RefCell::new(TagStore::new(tags)));
        let mut tag_list = TagListView::new(config, 80.0, height);
        tag_list.set_delegate(Some(store.clone()));
        tag_list.set_data_source(Some(store.clone()));

        Self {
            should_quit: false,
            tag_list,
            store,
            gestures: GestureTracker::new(),
            bindings: KeyBindings::default(),
            list_area: CellRect::default(),
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tag_list(&self) -> &TagListView {
        &self.tag_list
    }

    pub fn tag_list_mut(&mut self) -> &mut TagListView {
        &mut self.tag_list
    }

    pub fn store(&self) -> &Rc<RefCell<TagStore>> {
        &self.store
    }

    /// Place the tag list, resizing it to the area width.
    pub fn set_list_area(&mut self, area: CellRect) {
        self.list_area = area;
        self.tag_list.resize(f64::from(area.width));
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::Resize(width, height) => {
                // The list width follows the next view pass
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        let typing = self.tag_list.focus() != Focus::None;
        if let Some(command) = self.bindings.command_for(key_event, typing) {
            self.run(command);
            return;
        }
        if !self.tag_list.handle_key(key_event) {
            trace!(key = ?key_event.code, "Key not used by the tag list");
        }
    }

    fn run(&mut self, command: Command) {
        debug!(?command, "Running command");
        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleEditable => {
                let editable = !self.tag_list.is_editable();
                self.tag_list.set_editable(editable);
            }
            Command::ToggleCollapsed => {
                let collapsed = !self.tag_list.is_collapsed();
                self.tag_list.set_collapsed(collapsed);
            }
            Command::ToggleMultiSelect => {
                let multiple = !self.tag_list.behavior().multiple_selection;
                self.tag_list.set_allows_multiple_selection(multiple);
            }
            Command::Cancel => match self.gestures.cancel() {
                Some(gesture) => self.apply(gesture),
                None => self.tag_list.unhighlight_all_tags(),
            },
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let area = self.list_area;
        let inside = mouse_event.column >= area.left()
            && mouse_event.column < area.right()
            && mouse_event.row >= area.top()
            && mouse_event.row < area.bottom();
        if matches!(mouse_event.kind, MouseEventKind::Down(_)) && !inside {
            return;
        }

        let point = Point::new(
            f64::from(mouse_event.column) - f64::from(area.x),
            f64::from(mouse_event.row) - f64::from(area.y),
        );
        for gesture in self.gestures.handle(mouse_event.kind, point) {
            self.apply(gesture);
        }
    }

    fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Tap(point) => {
                let target = self.tag_list.tap_at(point);
                trace!(?target, "Tap");
            }
            Gesture::Drag(phase, point) => {
                let outcome = self.tag_list.drag(phase, point);
                trace!(?phase, ?outcome, "Drag");
            }
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(3),    // Tag list
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Tags ");
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        self.set_list_area(inner);
        self.tag_list.render(frame, inner);

        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: CellRect) {
        let mode = match self.tag_list.mode() {
            Mode::Browsing => "browsing",
            Mode::Editable => "editing",
            Mode::Collapsed => "collapsed",
        };
        let title = Paragraph::new(format!("taglist ({mode})"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: CellRect) {
        let store = self.store.borrow();
        let status = store.last_action().unwrap_or("");
        let footer = Line::from(vec![
            Span::styled(
                format!(" {} tags ", store.tags().len()),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::raw(" "),
            Span::raw(status.to_string()),
            Span::raw("  "),
            Span::styled(
                "^E edit  ^L collapse  ^S multi  ^C quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }
}
