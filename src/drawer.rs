//! Navigation drawer for the study dashboard.
//!
//! A vertical menu that toggles between a collapsed rail of single-letter
//! markers and an expanded panel with full page titles plus the dark-mode
//! and live-update switches. Selecting a page or flipping a switch emits a
//! message for the hosting page; the drawer itself owns only its cursor,
//! open state, and the displayed switch positions.

use crate::key::{Binding, KeyMap};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use std::time::Duration;

/// The pages reachable from the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    /// Optimization history and the other study charts.
    History,
    /// Analytics charts (importances, EDF, slice).
    Analytics,
    /// The sortable trial table.
    TrialTable,
    /// The trial list with per-trial detail.
    TrialList,
    /// The free-form study note.
    Note,
}

/// Drawer entries in display order.
pub const PAGES: [PageId; 5] = [
    PageId::History,
    PageId::Analytics,
    PageId::TrialTable,
    PageId::TrialList,
    PageId::Note,
];

impl PageId {
    /// Full title shown when the drawer is open.
    pub fn title(&self) -> &'static str {
        match self {
            PageId::History => "History",
            PageId::Analytics => "Analytics",
            PageId::TrialTable => "Trials (table)",
            PageId::TrialList => "Trials (list)",
            PageId::Note => "Note",
        }
    }

    /// One-letter marker shown when the drawer is collapsed.
    pub fn marker(&self) -> &'static str {
        match self {
            PageId::History => "H",
            PageId::Analytics => "A",
            PageId::TrialTable => "T",
            PageId::TrialList => "L",
            PageId::Note => "N",
        }
    }
}

/// Emitted when the user selects a page.
#[derive(Debug, Clone, Copy)]
pub struct PageSelectedMsg {
    /// The newly selected page.
    pub page: PageId,
}

/// Emitted when the live-update switch is flipped.
#[derive(Debug, Clone, Copy)]
pub struct LiveUpdateToggledMsg {
    /// Switch position after the flip.
    pub enabled: bool,
}

/// Emitted when the dark-mode switch is flipped.
#[derive(Debug, Clone, Copy)]
pub struct DarkModeToggledMsg {
    /// Switch position after the flip.
    pub dark: bool,
}

fn emit<M: Send + Copy + 'static>(msg: M) -> Cmd {
    bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(msg) as Msg)
}

/// Key bindings for the drawer.
#[derive(Debug, Clone)]
pub struct DrawerKeyMap {
    /// Move the cursor up.
    pub up: Binding,
    /// Move the cursor down.
    pub down: Binding,
    /// Select the page under the cursor.
    pub select: Binding,
    /// Collapse or expand the drawer.
    pub toggle_open: Binding,
    /// Flip the live-update switch.
    pub toggle_live_update: Binding,
    /// Flip the dark-mode switch.
    pub toggle_dark_mode: Binding,
}

impl Default for DrawerKeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]).with_help("↓/j", "down"),
            select: Binding::new(vec![KeyCode::Enter]).with_help("enter", "open page"),
            toggle_open: Binding::new(vec![(KeyCode::Char('b'), KeyModifiers::CONTROL)])
                .with_help("ctrl+b", "toggle drawer"),
            toggle_live_update: Binding::new(vec![KeyCode::Char('u')])
                .with_help("u", "live update"),
            toggle_dark_mode: Binding::new(vec![KeyCode::Char('D')]).with_help("D", "dark mode"),
        }
    }
}

impl KeyMap for DrawerKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.up,
            &self.down,
            &self.select,
            &self.toggle_open,
            &self.toggle_live_update,
            &self.toggle_dark_mode,
        ]
    }
}

/// Styling for the drawer.
#[derive(Debug, Clone)]
pub struct DrawerStyles {
    /// Entry under the cursor.
    pub cursor: Style,
    /// The entry for the currently shown page.
    pub active: Style,
    /// Any other entry.
    pub item: Style,
    /// The switch rows at the bottom of the open drawer.
    pub switch: Style,
}

impl Default for DrawerStyles {
    fn default() -> Self {
        Self {
            cursor: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#7D56F4",
                Dark: "#AD8CFF",
            }),
            active: Style::new().bold(true),
            item: Style::new(),
            switch: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}

/// The drawer model.
#[derive(Debug, Clone)]
pub struct Model {
    open: bool,
    cursor: usize,
    page: PageId,
    live_update: bool,
    dark_mode: bool,
    /// Key bindings, replaceable wholesale.
    pub keymap: DrawerKeyMap,
    /// Styles, replaceable wholesale.
    pub styles: DrawerStyles,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an open drawer on the history page.
    pub fn new() -> Self {
        Self {
            open: true,
            cursor: 0,
            page: PageId::History,
            live_update: true,
            dark_mode: true,
            keymap: DrawerKeyMap::default(),
            styles: DrawerStyles::default(),
        }
    }

    /// Starts the drawer collapsed.
    pub fn collapsed(mut self) -> Self {
        self.open = false;
        self
    }

    /// Sets the initially shown page.
    pub fn with_page(mut self, page: PageId) -> Self {
        self.page = page;
        self.cursor = PAGES.iter().position(|p| *p == page).unwrap_or(0);
        self
    }

    /// Sets the displayed live-update switch position.
    pub fn with_live_update(mut self, enabled: bool) -> Self {
        self.live_update = enabled;
        self
    }

    /// The currently selected page.
    pub fn page(&self) -> PageId {
        self.page
    }

    /// Whether the drawer is expanded.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Displayed live-update switch position.
    pub fn live_update(&self) -> bool {
        self.live_update
    }

    /// Displayed dark-mode switch position.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Moves the selection to a page without emitting a message, for when
    /// the hosting page changes pages by other means.
    pub fn set_page(&mut self, page: PageId) {
        self.page = page;
        self.cursor = PAGES.iter().position(|p| *p == page).unwrap_or(0);
    }

    /// Syncs the live-update switch with the authoritative preference.
    pub fn set_live_update(&mut self, enabled: bool) {
        self.live_update = enabled;
    }

    /// Handles key input; emits selection and switch messages.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.toggle_open.matches(key_msg) {
            self.open = !self.open;
            return None;
        }
        if self.keymap.up.matches(key_msg) {
            self.cursor = self.cursor.saturating_sub(1);
            return None;
        }
        if self.keymap.down.matches(key_msg) {
            self.cursor = (self.cursor + 1).min(PAGES.len() - 1);
            return None;
        }
        if self.keymap.select.matches(key_msg) {
            self.page = PAGES[self.cursor];
            return Some(emit(PageSelectedMsg { page: self.page }));
        }
        if self.keymap.toggle_live_update.matches(key_msg) {
            self.live_update = !self.live_update;
            return Some(emit(LiveUpdateToggledMsg {
                enabled: self.live_update,
            }));
        }
        if self.keymap.toggle_dark_mode.matches(key_msg) {
            self.dark_mode = !self.dark_mode;
            return Some(emit(DarkModeToggledMsg {
                dark: self.dark_mode,
            }));
        }
        None
    }

    fn switch_line(&self, label: &str, on: bool) -> String {
        let state = if on { "on" } else { "off" };
        self.styles.switch.render(&format!("{} [{}]", label, state))
    }

    /// Renders the drawer.
    pub fn view(&self) -> String {
        let mut lines = Vec::with_capacity(PAGES.len() + 2);
        for (i, page) in PAGES.iter().enumerate() {
            let label = if self.open {
                page.title().to_string()
            } else {
                page.marker().to_string()
            };
            let line = if i == self.cursor {
                self.styles.cursor.render(&format!("> {}", label))
            } else if *page == self.page {
                self.styles.active.render(&format!("* {}", label))
            } else {
                self.styles.item.render(&format!("  {}", label))
            };
            lines.push(line);
        }
        if self.open {
            lines.push(self.switch_line("Live update", self.live_update));
            lines.push(self.switch_line("Dark mode", self.dark_mode));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut drawer = Model::new();
        drawer.update(&key(KeyCode::Up));
        assert_eq!(drawer.cursor, 0);
        for _ in 0..10 {
            drawer.update(&key(KeyCode::Down));
        }
        assert_eq!(drawer.cursor, PAGES.len() - 1);
    }

    #[test]
    fn test_select_changes_page_and_emits() {
        let mut drawer = Model::new();
        drawer.update(&key(KeyCode::Down));
        let cmd = drawer.update(&key(KeyCode::Enter));
        assert!(cmd.is_some());
        assert_eq!(drawer.page(), PageId::Analytics);
    }

    #[test]
    fn test_toggle_open() {
        let mut drawer = Model::new();
        assert!(drawer.is_open());
        let msg: Msg = Box::new(KeyMsg {
            key: KeyCode::Char('b'),
            modifiers: KeyModifiers::CONTROL,
        });
        assert!(drawer.update(&msg).is_none());
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_live_update_switch_emits() {
        let mut drawer = Model::new();
        assert!(drawer.live_update());
        let cmd = drawer.update(&key(KeyCode::Char('u')));
        assert!(cmd.is_some());
        assert!(!drawer.live_update());
    }

    #[test]
    fn test_set_page_moves_cursor() {
        let mut drawer = Model::new();
        drawer.set_page(PageId::Note);
        assert_eq!(drawer.page(), PageId::Note);
        assert_eq!(drawer.cursor, 4);
    }

    #[test]
    fn test_collapsed_view_uses_markers() {
        let mut drawer = Model::new().collapsed().with_page(PageId::TrialTable);
        // The cursor starts on the active entry and takes precedence when
        // rendering; move it away so the active marker shows.
        drawer.update(&key(KeyCode::Up));
        drawer.update(&key(KeyCode::Up));
        let view = drawer.view();
        assert!(view.contains("> H"));
        assert!(view.contains("* T"));
        assert!(!view.contains("Trials (table)"));
        assert!(!view.contains("Live update"));
    }

    #[test]
    fn test_cursor_outranks_active_marker() {
        let drawer = Model::new().collapsed().with_page(PageId::TrialTable);
        let view = drawer.view();
        assert!(view.contains("> T"));
        assert!(!view.contains("* T"));
    }

    #[test]
    fn test_open_view_shows_titles_and_switches() {
        let drawer = Model::new().with_page(PageId::TrialTable);
        let view = drawer.view();
        assert!(view.contains("Trials (table)"));
        assert!(view.contains("Live update [on]"));
        assert!(view.contains("Dark mode [on]"));
    }
}
