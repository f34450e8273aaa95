//! Study detail page: chart-section mapping, the preferences panel, and
//! the composition of drawer, trial table, and reload ticker.
//!
//! Chart rendering itself lives outside this crate; chart sections appear
//! as titled placeholder cards whose presence is decided by the pure
//! [`chart_sections`] mapping. Data fetching is likewise external: when
//! the reload ticker fires, the page emits a [`RefreshRequestedMsg`] and
//! the host pushes the fresh snapshot back in through
//! [`Model::set_study`].

use crate::datagrid::PageSize;
use crate::drawer::{
    self, DarkModeToggledMsg, LiveUpdateToggledMsg, PageId, PageSelectedMsg,
};
use crate::key::{Binding, KeyMap};
use crate::prefs::{PrefStore, Preferences, PrefsBackend, RELOAD_CHOICES, RELOAD_DISABLED};
use crate::reload::{self, ReloadTickMsg, StartStopMsg};
use crate::study::StudyDetail;
use crate::trialtable;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::fmt;
use std::time::Duration;

/// The chart sections a study page can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Optimization history over trial number.
    History,
    /// Pareto front, multi-objective studies only.
    ParetoFront,
    /// Parallel coordinate plot of parameters and objectives.
    ParallelCoordinate,
    /// Intermediate values per step, single-objective studies only.
    IntermediateValues,
    /// Empirical distribution function of objective values.
    Edf,
    /// Hyperparameter importances.
    Importances,
    /// Slice plot per parameter.
    Slice,
}

impl ChartKind {
    /// Section title.
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::History => "History",
            ChartKind::ParetoFront => "Pareto front",
            ChartKind::ParallelCoordinate => "Parallel coordinate",
            ChartKind::IntermediateValues => "Intermediate values",
            ChartKind::Edf => "EDF",
            ChartKind::Importances => "Hyperparameter importances",
            ChartKind::Slice => "Slice",
        }
    }
}

/// The chart sections to show for a study, in page order.
///
/// Each section is gated by its preference flag; the Pareto front only
/// applies to multi-objective studies and intermediate values only to
/// single-objective ones. No study, no sections.
pub fn chart_sections(study: Option<&StudyDetail>, prefs: &Preferences) -> Vec<ChartKind> {
    let study = match study {
        Some(study) => study,
        None => return Vec::new(),
    };
    let single = study.is_single_objective();
    let mut sections = Vec::new();
    if prefs.show_history {
        sections.push(ChartKind::History);
    }
    if !single && prefs.show_pareto_front {
        sections.push(ChartKind::ParetoFront);
    }
    if prefs.show_parallel_coordinate {
        sections.push(ChartKind::ParallelCoordinate);
    }
    if single && prefs.show_intermediate_values {
        sections.push(ChartKind::IntermediateValues);
    }
    if prefs.show_edf {
        sections.push(ChartKind::Edf);
    }
    if prefs.show_importances {
        sections.push(ChartKind::Importances);
    }
    if prefs.show_slice {
        sections.push(ChartKind::Slice);
    }
    sections
}

/// What the main area shows for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Chart sections for the history page.
    History,
    /// Analytics charts, with one EDF panel per objective direction.
    Analytics {
        /// Number of EDF panels.
        edf_panels: usize,
    },
    /// The sortable trial table.
    TrialTable,
    /// The per-trial list.
    TrialList,
    /// The study note.
    Note {
        /// Note text, empty when none was written.
        text: String,
    },
    /// No snapshot loaded yet.
    Empty,
}

/// Maps a page to its content description. Pure.
pub fn page_content(page: PageId, study: Option<&StudyDetail>) -> PageContent {
    let study = match study {
        Some(study) => study,
        None => return PageContent::Empty,
    };
    match page {
        PageId::History => PageContent::History,
        PageId::Analytics => PageContent::Analytics {
            edf_panels: study.directions.len(),
        },
        PageId::TrialTable => PageContent::TrialTable,
        PageId::TrialList => PageContent::TrialList,
        PageId::Note => PageContent::Note {
            text: study.note.clone().unwrap_or_default(),
        },
    }
}

/// Emitted when the preferences panel changes a value.
#[derive(Debug, Clone)]
pub struct PrefsChangedMsg {
    /// The full updated preferences value.
    pub prefs: Preferences,
}

/// Emitted when a reload tick fires; the host should fetch a fresh
/// snapshot and push it in via [`Model::set_study`].
#[derive(Debug, Clone, Copy)]
pub struct RefreshRequestedMsg;

fn emit<M: Send + Clone + 'static>(msg: M) -> Cmd {
    bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(msg.clone()) as Msg)
}

/// Key bindings for the preferences panel.
#[derive(Debug, Clone)]
pub struct PanelKeyMap {
    /// Move the cursor up.
    pub up: Binding,
    /// Move the cursor down.
    pub down: Binding,
    /// Toggle the flag under the cursor, or cycle the reload interval.
    pub toggle: Binding,
}

impl Default for PanelKeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]).with_help("↓/j", "down"),
            toggle: Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
                .with_help("enter/space", "toggle"),
        }
    }
}

impl KeyMap for PanelKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.up, &self.down, &self.toggle]
    }
}

const FLAG_ROWS: usize = 7;
const INTERVAL_ROW: usize = FLAG_ROWS;

fn flag_label(row: usize) -> &'static str {
    match row {
        0 => "Optimization history",
        1 => "Pareto front",
        2 => "Parallel coordinate",
        3 => "Intermediate values",
        4 => "EDF",
        5 => "Hyperparameter importances",
        _ => "Slice",
    }
}

/// Checkbox panel for the chart flags and the reload-interval selector.
///
/// Operates on a [`Preferences`] value and emits [`PrefsChangedMsg`] for
/// the owner to push into the store; it never persists anything itself.
#[derive(Debug, Clone)]
pub struct PrefsPanel {
    prefs: Preferences,
    single_objective: bool,
    cursor: usize,
    /// Key bindings, replaceable wholesale.
    pub keymap: PanelKeyMap,
    cursor_style: Style,
    disabled_style: Style,
}

impl PrefsPanel {
    /// Creates a panel over the given preferences value.
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            single_objective: true,
            cursor: 0,
            keymap: PanelKeyMap::default(),
            cursor_style: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#7D56F4",
                Dark: "#AD8CFF",
            }),
            disabled_style: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }

    /// The panel's current preferences value.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Replaces the preferences, typically after the store sanitized them.
    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.prefs = prefs;
    }

    /// Sets whether the study is single-objective, which decides the
    /// disabled checkboxes.
    pub fn set_single_objective(&mut self, single: bool) {
        self.single_objective = single;
    }

    fn flag(&self, row: usize) -> bool {
        match row {
            0 => self.prefs.show_history,
            1 => self.prefs.show_pareto_front,
            2 => self.prefs.show_parallel_coordinate,
            3 => self.prefs.show_intermediate_values,
            4 => self.prefs.show_edf,
            5 => self.prefs.show_importances,
            _ => self.prefs.show_slice,
        }
    }

    fn flip_flag(&mut self, row: usize) {
        let flag = match row {
            0 => &mut self.prefs.show_history,
            1 => &mut self.prefs.show_pareto_front,
            2 => &mut self.prefs.show_parallel_coordinate,
            3 => &mut self.prefs.show_intermediate_values,
            4 => &mut self.prefs.show_edf,
            5 => &mut self.prefs.show_importances,
            _ => &mut self.prefs.show_slice,
        };
        *flag = !*flag;
    }

    /// Whether the checkbox in this row cannot be toggled for the current
    /// study: Pareto front for single-objective studies, intermediate
    /// values for multi-objective ones.
    pub fn is_disabled(&self, row: usize) -> bool {
        (row == 1 && self.single_objective) || (row == 3 && !self.single_objective)
    }

    fn cycle_interval(&mut self) {
        let pos = RELOAD_CHOICES
            .iter()
            .position(|c| *c == self.prefs.reload_interval);
        let next = match pos {
            Some(p) => RELOAD_CHOICES[(p + 1) % RELOAD_CHOICES.len()],
            None => RELOAD_CHOICES[0],
        };
        self.prefs.reload_interval = next;
    }

    /// Handles key input; emits [`PrefsChangedMsg`] on any change.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.up.matches(key_msg) {
            self.cursor = self.cursor.saturating_sub(1);
            return None;
        }
        if self.keymap.down.matches(key_msg) {
            self.cursor = (self.cursor + 1).min(INTERVAL_ROW);
            return None;
        }
        if self.keymap.toggle.matches(key_msg) {
            if self.cursor == INTERVAL_ROW {
                self.cycle_interval();
            } else if self.is_disabled(self.cursor) {
                return None;
            } else {
                self.flip_flag(self.cursor);
            }
            return Some(emit(PrefsChangedMsg {
                prefs: self.prefs.clone(),
            }));
        }
        None
    }

    fn interval_label(secs: i32) -> String {
        if secs == RELOAD_DISABLED {
            "stop".to_string()
        } else {
            format!("{}s", secs)
        }
    }

    /// Renders the panel.
    pub fn view(&self) -> String {
        let mut lines = Vec::with_capacity(INTERVAL_ROW + 1);
        for row in 0..FLAG_ROWS {
            let mark = if self.flag(row) { "x" } else { " " };
            let line = format!("[{}] {}", mark, flag_label(row));
            let line = if self.is_disabled(row) {
                self.disabled_style.render(&line)
            } else {
                line
            };
            lines.push(self.decorate(row, line));
        }
        let interval = format!(
            "Live update: {}",
            Self::interval_label(self.prefs.reload_interval)
        );
        lines.push(self.decorate(INTERVAL_ROW, interval));
        lines.join("\n")
    }

    fn decorate(&self, row: usize, line: String) -> String {
        if row == self.cursor {
            self.cursor_style.render(&format!("> {}", line))
        } else {
            format!("  {}", line)
        }
    }
}

/// Key bindings the study page handles itself.
#[derive(Debug, Clone)]
pub struct StudyPageKeyMap {
    /// Show or hide the preferences panel.
    pub toggle_prefs: Binding,
}

impl Default for StudyPageKeyMap {
    fn default() -> Self {
        Self {
            toggle_prefs: Binding::new(vec![KeyCode::Char(',')]).with_help(",", "preferences"),
        }
    }
}

impl KeyMap for StudyPageKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.toggle_prefs]
    }
}

/// The composed study page.
///
/// Owns the drawer, preferences panel, trial table, reload ticker, and
/// the preferences store, and routes messages between them. The reload
/// ticker is suppressed while the trial table page is active so refreshes
/// cannot disturb sort, filter, or expansion state mid-interaction.
pub struct Model {
    study_id: i64,
    study: Option<StudyDetail>,
    store: PrefStore,
    drawer: drawer::Model,
    panel: PrefsPanel,
    table: trialtable::Model,
    reload: reload::Model,
    show_prefs: bool,
    /// Key bindings, replaceable wholesale.
    pub keymap: StudyPageKeyMap,
    title_style: Style,
    card_style: Style,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("study_id", &self.study_id)
            .field("page", &self.drawer.page())
            .field("show_prefs", &self.show_prefs)
            .finish()
    }
}

impl Model {
    /// Creates a study page for the given study id, loading preferences
    /// through the backend.
    pub fn new(study_id: i64, backend: Box<dyn PrefsBackend>) -> Self {
        let store = PrefStore::new(backend);
        let prefs = store.get();
        let reload = reload::Model::from_seconds(prefs.reload_interval);
        let drawer = drawer::Model::new().with_live_update(prefs.live_update_enabled());
        let panel = PrefsPanel::new(prefs);
        Self {
            study_id,
            study: None,
            store,
            drawer,
            panel,
            table: trialtable::Model::with_initial_page_size(PageSize::Limited(50)),
            reload,
            show_prefs: false,
            keymap: StudyPageKeyMap::default(),
            title_style: Style::new().bold(true),
            card_style: Style::new().foreground(AdaptiveColor {
                Light: "#606060",
                Dark: "#a0a0a0",
            }),
        }
    }

    /// Schedules the first reload tick, if live update is on.
    pub fn init(&self) -> Option<Cmd> {
        self.reload.init()
    }

    /// Page title: the study name, or `Study #{id}` until a snapshot
    /// arrives.
    pub fn title(&self) -> String {
        match &self.study {
            Some(study) => study.name.clone(),
            None => format!("Study #{}", self.study_id),
        }
    }

    /// The currently shown page.
    pub fn page(&self) -> PageId {
        self.drawer.page()
    }

    /// The drawer, for host-side inspection.
    pub fn drawer(&self) -> &drawer::Model {
        &self.drawer
    }

    /// The trial table, for host-side inspection.
    pub fn table(&self) -> &trialtable::Model {
        &self.table
    }

    /// The current preferences snapshot.
    pub fn prefs(&self) -> Preferences {
        self.store.get()
    }

    /// Whether the reload ticker is currently suppressed.
    pub fn reload_suppressed(&self) -> bool {
        self.reload.suppressed()
    }

    /// Installs a fresh study snapshot.
    pub fn set_study(&mut self, study: StudyDetail) {
        self.table.set_study(Some(&study));
        self.panel.set_single_objective(study.is_single_objective());
        self.study = Some(study);
    }

    fn apply_prefs(&mut self, prefs: Preferences) -> Option<Cmd> {
        self.store.set(prefs);
        let stored = self.store.get();
        self.panel.set_prefs(stored.clone());
        self.drawer.set_live_update(stored.live_update_enabled());
        self.reload.set_seconds(stored.reload_interval)
    }

    /// Routes a message to the owning component.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(selected) = msg.downcast_ref::<PageSelectedMsg>() {
            self.reload
                .set_suppressed(selected.page == PageId::TrialTable);
            return None;
        }
        if let Some(toggled) = msg.downcast_ref::<LiveUpdateToggledMsg>() {
            let mut prefs = self.store.get();
            prefs.reload_interval = if toggled.enabled { 10 } else { RELOAD_DISABLED };
            return self.apply_prefs(prefs);
        }
        if msg.downcast_ref::<DarkModeToggledMsg>().is_some() {
            // Theme switching is the host's concern.
            return None;
        }
        if let Some(changed) = msg.downcast_ref::<PrefsChangedMsg>() {
            return self.apply_prefs(changed.prefs.clone());
        }
        if msg.downcast_ref::<RefreshRequestedMsg>().is_some() {
            // The host fetches; we schedule the tick after this one.
            return self.reload.init();
        }
        if let Some(tick) = msg.downcast_ref::<ReloadTickMsg>() {
            if self.reload.fires(tick) {
                return Some(emit(RefreshRequestedMsg));
            }
            return self.reload.update(msg);
        }
        if msg.downcast_ref::<StartStopMsg>().is_some() {
            return self.reload.update(msg);
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.toggle_prefs.matches(key_msg) {
                self.show_prefs = !self.show_prefs;
                return None;
            }
            if self.show_prefs {
                return self.panel.update(&msg);
            }
            if self.drawer.is_open()
                || self.drawer.keymap.toggle_open.matches(key_msg)
                || self.drawer.keymap.toggle_live_update.matches(key_msg)
                || self.drawer.keymap.toggle_dark_mode.matches(key_msg)
            {
                return self.drawer.update(&msg);
            }
            if matches!(self.drawer.page(), PageId::TrialTable | PageId::TrialList) {
                self.table.update(&msg);
            }
            return None;
        }
        None
    }

    fn chart_cards(&self, sections: &[ChartKind]) -> String {
        sections
            .iter()
            .map(|kind| self.card_style.render(&format!("┌ {} ┐", kind.title())))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn trial_list(&self) -> String {
        let study = match &self.study {
            Some(study) => study,
            None => return String::new(),
        };
        study
            .trials
            .iter()
            .map(|t| {
                let value = t
                    .value(0)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "#{} {} value={} {}",
                    t.number,
                    t.state.as_str(),
                    value,
                    t.params_summary()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn content_view(&self) -> String {
        match page_content(self.drawer.page(), self.study.as_ref()) {
            PageContent::Empty => "Loading...".to_string(),
            PageContent::History => {
                let prefs = self.store.get();
                let sections = chart_sections(self.study.as_ref(), &prefs);
                let mut out = self.chart_cards(&sections);
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&self.table.view());
                out
            }
            PageContent::Analytics { edf_panels } => {
                let mut cards: Vec<ChartKind> = Vec::new();
                for _ in 0..edf_panels {
                    cards.push(ChartKind::Edf);
                }
                self.chart_cards(&cards)
            }
            PageContent::TrialTable => self.table.view(),
            PageContent::TrialList => self.trial_list(),
            PageContent::Note { text } => {
                if text.is_empty() {
                    "(no note)".to_string()
                } else {
                    text
                }
            }
        }
    }

    /// Renders the whole page: title, drawer, and the active content or
    /// the preferences panel.
    pub fn view(&self) -> String {
        let mut out = self.title_style.render(&self.title());
        out.push('\n');
        out.push_str(&self.drawer.view());
        out.push('\n');
        if self.show_prefs {
            out.push_str(&self.panel.view());
        } else {
            out.push_str(&self.content_view());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryBackend;
    use crate::study::{StudyDirection, Trial, TrialState};
    use crossterm::event::KeyModifiers;

    fn trial(id: i64) -> Trial {
        Trial {
            trial_id: id,
            number: id,
            state: TrialState::Complete,
            values: Some(vec![0.5]),
            datetime_start: None,
            datetime_complete: None,
            params: Vec::new(),
            intermediate_values: Vec::new(),
            user_attrs: Vec::new(),
            system_attrs: Vec::new(),
        }
    }

    fn study(directions: usize) -> StudyDetail {
        StudyDetail {
            id: 42,
            name: "sphere".into(),
            directions: vec![StudyDirection::Minimize; directions],
            trials: vec![trial(1), trial(2)],
            note: Some("baseline run".into()),
        }
    }

    #[test]
    fn test_chart_sections_single_objective() {
        let study = study(1);
        let sections = chart_sections(Some(&study), &Preferences::default());
        assert!(sections.contains(&ChartKind::IntermediateValues));
        assert!(!sections.contains(&ChartKind::ParetoFront));
    }

    #[test]
    fn test_chart_sections_multi_objective() {
        let study = study(2);
        let sections = chart_sections(Some(&study), &Preferences::default());
        assert!(sections.contains(&ChartKind::ParetoFront));
        assert!(!sections.contains(&ChartKind::IntermediateValues));
    }

    #[test]
    fn test_chart_sections_flag_gated() {
        let study = study(1);
        let mut prefs = Preferences::default();
        prefs.show_history = false;
        prefs.show_slice = false;
        let sections = chart_sections(Some(&study), &prefs);
        assert!(!sections.contains(&ChartKind::History));
        assert!(!sections.contains(&ChartKind::Slice));
        assert!(sections.contains(&ChartKind::Edf));
    }

    #[test]
    fn test_chart_sections_without_study() {
        assert!(chart_sections(None, &Preferences::default()).is_empty());
    }

    #[test]
    fn test_page_content_mapping() {
        let study = study(2);
        assert_eq!(
            page_content(PageId::Analytics, Some(&study)),
            PageContent::Analytics { edf_panels: 2 }
        );
        assert_eq!(
            page_content(PageId::Note, Some(&study)),
            PageContent::Note {
                text: "baseline run".into()
            }
        );
        assert_eq!(page_content(PageId::History, None), PageContent::Empty);
    }

    #[test]
    fn test_panel_disabled_rules() {
        let mut panel = PrefsPanel::new(Preferences::default());
        panel.set_single_objective(true);
        assert!(panel.is_disabled(1));
        assert!(!panel.is_disabled(3));
        panel.set_single_objective(false);
        assert!(!panel.is_disabled(1));
        assert!(panel.is_disabled(3));
    }

    #[test]
    fn test_panel_toggle_disabled_is_noop() {
        let mut panel = PrefsPanel::new(Preferences::default());
        panel.set_single_objective(true);
        panel.cursor = 1;
        let msg: Msg = Box::new(KeyMsg {
            key: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
        });
        assert!(panel.update(&msg).is_none());
        assert!(panel.prefs().show_pareto_front);
    }

    #[test]
    fn test_panel_toggle_flag_emits() {
        let mut panel = PrefsPanel::new(Preferences::default());
        let msg: Msg = Box::new(KeyMsg {
            key: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
        });
        assert!(panel.update(&msg).is_some());
        assert!(!panel.prefs().show_history);
    }

    #[test]
    fn test_panel_interval_cycles_through_choices() {
        let mut panel = PrefsPanel::new(Preferences::default());
        assert_eq!(panel.prefs().reload_interval, 10);
        panel.cycle_interval();
        assert_eq!(panel.prefs().reload_interval, 30);
        panel.cycle_interval();
        assert_eq!(panel.prefs().reload_interval, 60);
        panel.cycle_interval();
        assert_eq!(panel.prefs().reload_interval, RELOAD_DISABLED);
        panel.cycle_interval();
        assert_eq!(panel.prefs().reload_interval, 5);
    }

    #[test]
    fn test_title_falls_back_to_id() {
        let mut page = Model::new(7, Box::new(MemoryBackend::new()));
        assert_eq!(page.title(), "Study #7");
        page.set_study(study(1));
        assert_eq!(page.title(), "sphere");
    }

    #[test]
    fn test_trial_table_page_suppresses_reload() {
        let mut page = Model::new(7, Box::new(MemoryBackend::new()));
        assert!(!page.reload_suppressed());
        page.update(Box::new(PageSelectedMsg {
            page: PageId::TrialTable,
        }) as Msg);
        assert!(page.reload_suppressed());
        page.update(Box::new(PageSelectedMsg {
            page: PageId::History,
        }) as Msg);
        assert!(!page.reload_suppressed());
    }

    #[test]
    fn test_live_update_toggle_maps_interval() {
        let mut page = Model::new(7, Box::new(MemoryBackend::new()));
        page.update(Box::new(LiveUpdateToggledMsg { enabled: false }) as Msg);
        assert_eq!(page.prefs().reload_interval, RELOAD_DISABLED);
        page.update(Box::new(LiveUpdateToggledMsg { enabled: true }) as Msg);
        assert_eq!(page.prefs().reload_interval, 10);
    }

    #[test]
    fn test_prefs_change_reaches_store_and_drawer() {
        let mut page = Model::new(7, Box::new(MemoryBackend::new()));
        let mut prefs = Preferences::default();
        prefs.reload_interval = RELOAD_DISABLED;
        prefs.show_edf = false;
        page.update(Box::new(PrefsChangedMsg { prefs }) as Msg);
        assert!(!page.prefs().show_edf);
        assert!(!page.drawer().live_update());
    }

    #[test]
    fn test_trial_table_starts_at_fifty_rows_per_page() {
        let page = Model::new(7, Box::new(MemoryBackend::new()));
        assert_eq!(page.table().grid().page_size(), PageSize::Limited(50));
    }

    #[test]
    fn test_set_study_fills_trial_table() {
        let mut page = Model::new(7, Box::new(MemoryBackend::new()));
        page.set_study(study(1));
        assert_eq!(page.table().grid().rows().len(), 2);
    }

    #[test]
    fn test_view_renders_without_study() {
        let page = Model::new(7, Box::new(MemoryBackend::new()));
        let view = page.view();
        assert!(view.contains("Study #7"));
        assert!(view.contains("Loading..."));
    }

    #[test]
    fn test_disabled_reload_schedules_nothing() {
        let mut backend = MemoryBackend::new();
        let mut prefs = Preferences::default();
        prefs.reload_interval = RELOAD_DISABLED;
        crate::prefs::save_preferences(&mut backend, &prefs);
        let page = Model::new(7, Box::new(backend));
        assert!(page.init().is_none());
    }
}
