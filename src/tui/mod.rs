//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Card lifecycle
//!
//! Whenever `update()` answers `Effect::Render`, the current
//! `CardViewState` is dropped first (unsubscribing from its item) and a
//! fresh one is attached to the new view model. A stale card can never
//! react to changes on an item that is no longer displayed.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms per poll and only
//! redraws after an event (key or resize).

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::item::ReviewState;
use crate::core::navigator::ViewModel;
use crate::core::state::App;
use crate::seed::LoadError;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AddressPromptState, CardViewState, FilterEvent, FilterPanelState, PromptEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// The attached card. Replaced wholesale on every render effect.
    pub card: Option<CardViewState>,
    /// Filter overlay (None = hidden)
    pub filter_panel: Option<FilterPanelState>,
    /// Address prompt overlay (None = hidden)
    pub address_prompt: Option<AddressPromptState>,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        let mut tui = Self {
            card: None,
            filter_panel: None,
            address_prompt: None,
        };
        tui.attach_card(app.view_model());
        tui
    }

    /// Tear down the current card, then attach one for `view`.
    pub fn attach_card(&mut self, view: ViewModel) {
        if let Some(old) = self.card.take() {
            debug!("Detaching card {}", old.item_id());
        }
        self.card = Some(CardViewState::attach(view));
    }

    pub fn open_filter_panel(&mut self, app: &App) {
        self.filter_panel = Some(FilterPanelState::new(app.root.levels(), app.filter.as_ref()));
    }

    pub fn open_address_prompt(&mut self, app: &App) {
        self.address_prompt = Some(AddressPromptState::new(app.address()));
    }
}

/// What a key means while browsing cards (no overlay open).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Core(Action),
    RevealHint,
    RevealAnswer,
    OpenFilter,
    OpenPrompt,
}

fn navigate(address: &str) -> Command {
    Command::Core(Action::Navigate(address.to_string()))
}

fn browse_command(event: &TuiEvent) -> Option<Command> {
    let command = match event {
        TuiEvent::ForceQuit | TuiEvent::InputChar('q') => Command::Core(Action::Quit),
        TuiEvent::Right | TuiEvent::InputChar('l') | TuiEvent::InputChar('n') => {
            navigate("questions/next")
        }
        TuiEvent::Left | TuiEvent::InputChar('h') | TuiEvent::InputChar('p') => {
            navigate("questions/previous")
        }
        TuiEvent::Home | TuiEvent::InputChar('g') => navigate("questions/first"),
        TuiEvent::End | TuiEvent::InputChar('G') => navigate("questions/last"),
        TuiEvent::InputChar('s') => navigate("questions/shuffle"),
        TuiEvent::InputChar('f') => Command::Core(Action::ToggleState(ReviewState::Favorite)),
        TuiEvent::InputChar('r') => Command::Core(Action::ToggleState(ReviewState::Right)),
        TuiEvent::InputChar('w') => Command::Core(Action::ToggleState(ReviewState::Wrong)),
        TuiEvent::InputChar('x') => Command::Core(Action::HideCurrent),
        TuiEvent::InputChar('?') => Command::RevealHint,
        TuiEvent::InputChar(' ') | TuiEvent::Submit => Command::RevealAnswer,
        TuiEvent::InputChar('o') => Command::OpenFilter,
        TuiEvent::InputChar(':') => Command::OpenPrompt,
        _ => return None,
    };
    Some(command)
}

/// Apply an action and carry out its effect on the presentation state.
/// Returns true when the session should end.
fn apply(app: &mut App, tui: &mut TuiState, action: Action) -> bool {
    match update(app, action) {
        Effect::Render => {
            tui.attach_card(app.view_model());
            false
        }
        Effect::Quit => true,
        Effect::None => false,
    }
}

/// Route one event to whichever layer owns the keyboard. Returns true when
/// the session should end.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> bool {
    if event == TuiEvent::ForceQuit {
        return apply(app, tui, Action::Quit);
    }

    if let Some(prompt) = tui.address_prompt.as_mut() {
        match prompt.handle_event(&event) {
            Some(PromptEvent::Submit(address)) => {
                tui.address_prompt = None;
                return apply(app, tui, Action::Navigate(address));
            }
            Some(PromptEvent::Dismiss) => tui.address_prompt = None,
            None => {}
        }
        return false;
    }

    if let Some(panel) = tui.filter_panel.as_mut() {
        match panel.handle_event(&event) {
            Some(FilterEvent::Apply(criteria)) => {
                tui.filter_panel = None;
                return apply(app, tui, Action::ApplyFilter(criteria));
            }
            Some(FilterEvent::Dismiss) => tui.filter_panel = None,
            None => {}
        }
        return false;
    }

    match browse_command(&event) {
        Some(Command::Core(action)) => apply(app, tui, action),
        Some(Command::RevealHint) => {
            if let Some(card) = tui.card.as_mut() {
                card.toggle_hint();
            }
            false
        }
        Some(Command::RevealAnswer) => {
            if let Some(card) = tui.card.as_mut() {
                card.toggle_answer();
            }
            false
        }
        Some(Command::OpenFilter) => {
            tui.open_filter_panel(app);
            false
        }
        Some(Command::OpenPrompt) => {
            tui.open_address_prompt(app);
            false
        }
        None => false,
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events are filtered in event.rs; the flag only helps
        // terminals that would otherwise merge Esc sequences.
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if event == TuiEvent::Resize {
                continue;
            }
            if handle_event(&mut app, &mut tui, event) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    info!(
        "Session over at {} ({} addresses visited)",
        app.address(),
        app.dispatcher.history().len()
    );
    drop(tui);
    ratatui::restore();
    Ok(())
}

/// Show the startup failure until a key is pressed. Nothing else is built
/// when the seed could not be loaded.
pub fn show_startup_failure(source: &str, error: &LoadError) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = terminal
        .draw(|f| ui::draw_error_view(f, source, error))
        .map(|_| ());
    if result.is_ok() {
        loop {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key)
                    if key.kind == crossterm::event::KeyEventKind::Press =>
                {
                    break;
                }
                _ => {}
            }
        }
    }
    ratatui::restore();
    result
}
