#![warn(missing_docs)]

//! # trialboard
//!
//! Terminal dashboard components for hyperparameter-optimization studies,
//! built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs). Each
//! component follows the Elm Architecture pattern with `update()` and
//! `view()` methods, so they compose into a host application's model the
//! same way they compose into each other here.
//!
//! ## Overview
//!
//! The core of the crate is a generic data grid: a sortable, filterable,
//! paginated table over any row type, with expandable per-row detail
//! panes. On top of it sit the study-specific pieces: typed trial
//! snapshots, derived trial-table columns for single- and multi-objective
//! studies, persisted dashboard preferences, a suppressible reload
//! ticker, and the navigation drawer and study page that tie them
//! together.
//!
//! ## Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | `key` | Type-safe key bindings and key maps |
//! | `datagrid` | Generic sortable/filterable/paginated table |
//! | `study` | Study and trial snapshot types |
//! | `trialtable` | Trial grid with derived objective columns |
//! | `prefs` | Persisted dashboard preferences |
//! | `reload` | Periodic refresh ticker with suppression |
//! | `drawer` | Collapsible page-navigation drawer |
//! | `studypage` | Composed study detail page |
//!
//! ## Quick Start
//!
//! ```rust
//! use trialboard::prelude::*;
//!
//! let mut page = StudyPage::new(1, Box::new(MemoryBackend::new()));
//! assert_eq!(page.title(), "Study #1");
//!
//! let study = StudyDetail {
//!     id: 1,
//!     name: "sphere".into(),
//!     directions: vec![StudyDirection::Minimize],
//!     trials: Vec::new(),
//!     note: None,
//! };
//! page.set_study(study);
//! assert_eq!(page.title(), "sphere");
//! println!("{}", page.view());
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! Components never fetch data themselves. The host application forwards
//! messages into the page and reacts to the messages the page emits, for
//! example [`studypage::RefreshRequestedMsg`] when the reload ticker
//! fires:
//!
//! ```rust,ignore
//! use bubbletea_rs::{Cmd, Model, Msg};
//! use trialboard::prelude::*;
//!
//! struct App {
//!     page: StudyPage,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let page = StudyPage::new(1, Box::new(MemoryBackend::new()));
//!         let cmd = page.init();
//!         (Self { page }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if msg.downcast_ref::<RefreshRequestedMsg>().is_some() {
//!             // fetch a snapshot, then self.page.set_study(study)
//!         }
//!         self.page.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.page.view()
//!     }
//! }
//! ```

pub mod datagrid;
pub mod drawer;
pub mod key;
pub mod prefs;
pub mod reload;
pub mod study;
pub mod studypage;
pub mod trialtable;

/// Convenient re-exports of the most commonly used types.
///
/// Component `Model` types are re-exported under distinct names so that
/// several of them can be imported at once.
pub mod prelude {
    pub use crate::datagrid::{
        CellPadding, CellValue, Column, GridRow, Model as DataGrid, PageSize, SortDirection,
    };
    pub use crate::drawer::{Model as Drawer, PageId, PageSelectedMsg};
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::prefs::{
        MemoryBackend, PrefStore, Preferences, PrefsBackend, RELOAD_DISABLED,
    };
    pub use crate::reload::{Model as ReloadTicker, ReloadTickMsg};
    pub use crate::study::{
        Attribute, IntermediateValue, StudyDetail, StudyDirection, Trial, TrialParam, TrialState,
    };
    pub use crate::studypage::{
        chart_sections, page_content, ChartKind, Model as StudyPage, PageContent, PrefsChangedMsg,
        PrefsPanel, RefreshRequestedMsg,
    };
    pub use crate::trialtable::{trial_columns, Model as TrialTable};
}
