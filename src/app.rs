// src/app.rs

//! The application shell: owns the managers, the event loop, and the key
//! bindings. All state mutation happens here, on the main task, either in
//! response to a key press or on the 30 FPS tick that drives the chunked
//! catalog build and the debounced rebalance.

use crate::catalog;
use crate::config::{FieldboardConfig, DEFAULT_CONFIG_PATH};
use crate::event::{AppEvent, Event, EventHandler};
use crate::favorites::{FavoritesStore, StateStore, BOARD_OPEN_KEY};
use crate::form::{FormManager, SortMode};
use crate::log_info;
use crate::presets::PresetManager;
use crate::search::SearchManager;
use color_eyre::Result;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    DefaultTerminal,
};
use std::path::Path;

/// Which pane keyboard input is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Board,
    Search,
    Presets,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Board => Focus::Search,
            Focus::Search => Focus::Presets,
            Focus::Presets => Focus::Board,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AppMode {
    /// Normal interaction with the board, search, and presets.
    Board,
    /// Naming a preset about to be captured; keys go to the input popup.
    Capture,
}

/// Application.
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Current app mode/screen
    pub mode: AppMode,
    pub focus: Focus,

    pub config: FieldboardConfig,
    pub form: FormManager,
    pub presets: PresetManager,
    pub search: SearchManager,
    store: StateStore,

    /// Whether the pip board pane is shown; persisted across sessions.
    pub board_open: bool,
    /// Index into the board's rendered pips, column order.
    pub board_cursor: usize,
    pub preset_cursor: usize,
    pub capture_input: String,

    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`] from the config file next to
    /// the binary (defaults apply when it is absent).
    pub fn new() -> Self {
        let config = FieldboardConfig::load(Path::new(DEFAULT_CONFIG_PATH));
        let store = StateStore::new(&config.state_dir, &config.fallback_state_dir);
        let favorites = FavoritesStore::load(store.clone());
        let fields = catalog::resolve(&config);
        log_info!(
            "Starting with {} catalog fields, {} favourites",
            fields.len(),
            favorites.len()
        );
        let form = FormManager::new(fields, favorites, &config);
        let presets = PresetManager::load(store.clone());
        let board_open = store.read_flag(BOARD_OPEN_KEY).unwrap_or(true);
        Self {
            running: true,
            mode: AppMode::Board,
            focus: Focus::Board,
            config,
            form,
            presets,
            search: SearchManager::new(),
            store,
            board_open,
            board_cursor: 0,
            preset_cursor: 0,
            capture_input: String::new(),
            events: EventHandler::new(),
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                // save power
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {
                    if self.form.on_tick() {
                        self.clamp_cursors();
                        needs_redraw = true;
                    }
                }
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key_event) = event {
                        self.handle_key_events(key_event)?;
                        needs_redraw = true;
                    }
                }
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::TogglePip(id) => {
                self.form.toggle_pip(&id);
            }
            AppEvent::ToggleFavourite(id) => {
                let _ = self.form.toggle_favourite(&id);
            }
            AppEvent::SortFavourites => self.form.set_sort_mode(SortMode::Favourites),
            AppEvent::SortAlphabetical => self.form.set_sort_mode(SortMode::Alphabetical),
            AppEvent::RefreshBoard => self.form.refresh_board(),
            AppEvent::NextPage => {
                self.form.next_page();
                self.board_cursor = 0;
            }
            AppEvent::PrevPage => {
                self.form.prev_page();
                self.board_cursor = 0;
            }
            AppEvent::ToggleBoard => {
                self.board_open = !self.board_open;
                self.store.write_flag(BOARD_OPEN_KEY, self.board_open);
            }
            AppEvent::SelectNext => self.move_selection(1),
            AppEvent::SelectPrev => self.move_selection(-1),
            AppEvent::OpenCapture => {
                self.capture_input.clear();
                self.mode = AppMode::Capture;
            }
            AppEvent::CaptureInput(ch) => self.capture_input.push(ch),
            AppEvent::CaptureBackspace => {
                self.capture_input.pop();
            }
            AppEvent::ConfirmCapture(name) => {
                let _ = self.presets.capture(&name, "", &self.form);
                self.mode = AppMode::Board;
            }
            AppEvent::CancelCapture => self.mode = AppMode::Board,
            AppEvent::ApplyPreset(index) => {
                self.presets.apply(index, &mut self.form);
            }
            AppEvent::DeletePreset(index) => {
                let _ = self.presets.remove(index);
                self.clamp_cursors();
            }
            AppEvent::SearchInput(ch) => {
                self.search.push_char(ch);
                self.apply_filter();
            }
            AppEvent::SearchBackspace => {
                self.search.backspace();
                self.apply_filter();
            }
            AppEvent::CycleKindFilter => {
                self.search.cycle_kind();
                self.apply_filter();
            }
            AppEvent::ClearSearch => {
                self.search.clear();
                self.apply_filter();
            }
            AppEvent::FocusNext => self.focus = self.focus.next(),
            AppEvent::FocusSearch => self.focus = Focus::Search,
            AppEvent::Quit => self.quit(),
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        // Preset-name input mode captures everything
        if self.mode == AppMode::Capture {
            match key_event.code {
                KeyCode::Esc => self.events.send(AppEvent::CancelCapture),
                KeyCode::Enter => {
                    let name = self.capture_input.clone();
                    self.events.send(AppEvent::ConfirmCapture(name));
                }
                KeyCode::Backspace => self.events.send(AppEvent::CaptureBackspace),
                KeyCode::Char(ch) => self.events.send(AppEvent::CaptureInput(ch)),
                _ => {}
            }
            return Ok(());
        }

        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.events.send(AppEvent::Quit);
            return Ok(());
        }

        // Search focus is an input mode of its own
        if self.focus == Focus::Search {
            match key_event.code {
                KeyCode::Esc => self.events.send(AppEvent::ClearSearch),
                KeyCode::Enter => self.events.send(AppEvent::FocusNext),
                KeyCode::Tab => self.events.send(AppEvent::CycleKindFilter),
                KeyCode::Backspace => self.events.send(AppEvent::SearchBackspace),
                KeyCode::Char(ch) => self.events.send(AppEvent::SearchInput(ch)),
                _ => {}
            }
            return Ok(());
        }

        // Handle normal navigation
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Tab => self.events.send(AppEvent::FocusNext),
            KeyCode::Char('/') => self.events.send(AppEvent::FocusSearch),
            KeyCode::Up | KeyCode::Char('k') => self.events.send(AppEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => self.events.send(AppEvent::SelectNext),
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Board => {
                    if let Some(id) = self.selected_pip_id() {
                        self.events.send(AppEvent::TogglePip(id));
                    }
                }
                Focus::Presets => self.events.send(AppEvent::ApplyPreset(self.preset_cursor)),
                Focus::Search => {}
            },
            KeyCode::Char('f') => {
                if self.focus == Focus::Board {
                    if let Some(id) = self.selected_pip_id() {
                        self.events.send(AppEvent::ToggleFavourite(id));
                    }
                }
            }
            KeyCode::Char('s') => {
                // flip to the other sort mode
                match self.form.sort_mode() {
                    SortMode::Favourites => self.events.send(AppEvent::SortAlphabetical),
                    SortMode::Alphabetical => self.events.send(AppEvent::SortFavourites),
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.events.send(AppEvent::PrevPage),
            KeyCode::Right | KeyCode::Char('l') => self.events.send(AppEvent::NextPage),
            KeyCode::Char('b') => self.events.send(AppEvent::ToggleBoard),
            KeyCode::Char('r') => self.events.send(AppEvent::RefreshBoard),
            KeyCode::Char('p') => self.events.send(AppEvent::OpenCapture),
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.focus == Focus::Presets {
                    self.events.send(AppEvent::DeletePreset(self.preset_cursor));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Id of the pip under the board cursor, in column order.
    pub fn selected_pip_id(&self) -> Option<String> {
        self.form.pip_columns().iter().nth(self.board_cursor).cloned()
    }

    fn apply_filter(&mut self) {
        self.form.set_filter(self.search.filter());
        self.board_cursor = 0;
    }

    fn move_selection(&mut self, delta: i64) {
        match self.focus {
            Focus::Board => {
                let count = self.form.pip_columns().len();
                self.board_cursor = wrapped(self.board_cursor, delta, count);
            }
            Focus::Presets => {
                let count = self.presets.len();
                self.preset_cursor = wrapped(self.preset_cursor, delta, count);
            }
            Focus::Search => {}
        }
    }

    /// Keeps cursors inside their panes after the underlying lists shrink.
    fn clamp_cursors(&mut self) {
        let pips = self.form.pip_columns().len();
        if self.board_cursor >= pips {
            self.board_cursor = pips.saturating_sub(1);
        }
        let presets = self.presets.len();
        if self.preset_cursor >= presets {
            self.preset_cursor = presets.saturating_sub(1);
        }
    }
}

fn wrapped(current: usize, delta: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let count = count as i64;
    (((current as i64 + delta) % count + count) % count) as usize
}
