//! Trial table: derived columns over a study snapshot plus the table
//! component itself.
//!
//! The column builders here hold the one piece of real conditional logic in
//! the dashboard: which columns exist depends on the study's objective
//! cardinality. A single-objective study gets one "Value" column; a
//! multi-objective study gets one independently sortable "Objective {i}"
//! column per direction. Both variants are followed by a derived duration
//! column and a parameter summary column.
//!
//! # Sort convention
//!
//! Objective and duration columns sort descending by value in their base
//! direction: the largest value surfaces at the top on the first header
//! selection. This is a deliberate dashboard convention ("best so far"
//! first), not a numeric default. A present value always sorts ahead of a
//! missing one; two missing values compare equal and keep their source
//! order under the engine's stable sort.

use crate::datagrid::{self, CellPadding, CellValue, Column, GridRow, PageSize};
use crate::study::{StudyDetail, Trial};
use bubbletea_rs::Msg;
use std::cmp::Ordering;

fn descending_with_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Comparator over one objective value: larger values first, present values
/// ahead of missing ones.
pub fn objective_less(objective: usize) -> impl Fn(&Trial, &Trial) -> Ordering {
    move |a, b| descending_with_missing_last(a.value(objective), b.value(objective))
}

/// Comparator over trial duration with the same present/missing policy as
/// [`objective_less`].
pub fn duration_less(a: &Trial, b: &Trial) -> Ordering {
    descending_with_missing_last(
        a.duration_millis().map(|ms| ms as f64),
        b.duration_millis().map(|ms| ms as f64),
    )
}

/// Builds the trial table columns for a study snapshot.
///
/// Pure: the same snapshot always yields the same column list. A missing
/// snapshot is treated like a single-objective study so the table shape is
/// stable while data loads.
pub fn trial_columns(study: Option<&StudyDetail>) -> Vec<Column<Trial>> {
    let mut columns = vec![
        Column::new("number", "Number")
            .sortable()
            .padding(CellPadding::None),
        Column::new("state", "State")
            .sortable()
            .filterable()
            .padding(CellPadding::None)
            .with_cell(|_, t: &Trial| Some(CellValue::from(t.state.as_str()))),
    ];

    match study {
        Some(s) if !s.is_single_objective() => {
            for (objective, _direction) in s.directions.iter().enumerate() {
                columns.push(
                    Column::new("values", format!("Objective {}", objective))
                        .sortable()
                        .with_less(objective_less(objective))
                        .with_cell(move |_, t: &Trial| t.value(objective).map(CellValue::Float)),
                );
            }
        }
        _ => {
            columns.push(
                Column::new("values", "Value")
                    .sortable()
                    .with_less(objective_less(0))
                    .with_cell(|_, t: &Trial| t.value(0).map(CellValue::Float)),
            );
        }
    }

    columns.push(
        Column::new("datetime_start", "Duration(ms)")
            .sortable()
            .with_less(duration_less)
            .with_cell(|_, t: &Trial| t.duration_millis().map(CellValue::Int)),
    );
    columns.push(
        Column::new("params", "Params").with_cell(|_, t: &Trial| Some(t.params_summary().into())),
    );
    columns
}

const COLLAPSE_PAGE_SIZES: [PageSize; 3] =
    [PageSize::Limited(5), PageSize::Limited(10), PageSize::All];

fn collapse_grid<R: GridRow>(columns: Vec<Column<R>>, rows: Vec<R>) -> String {
    datagrid::Model::new(columns)
        .with_page_sizes(COLLAPSE_PAGE_SIZES.to_vec())
        .dense(true)
        .with_rows(rows)
        .view()
}

/// Renders the detail region of one trial: parameters, intermediate values,
/// and user/system attributes, each as a dense sub-grid.
fn collapse_body(trial: &Trial) -> String {
    let params = collapse_grid(
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("value", "Value").sortable(),
        ],
        trial.params.clone(),
    );
    let intermediate = collapse_grid(
        vec![
            Column::new("step", "Step").sortable(),
            Column::new("value", "Value").sortable(),
        ],
        trial.intermediate_values.clone(),
    );
    let user_attrs = collapse_grid(
        vec![
            Column::new("key", "Key").sortable(),
            Column::new("value", "Value").sortable(),
        ],
        trial.user_attrs.clone(),
    );
    let system_attrs = collapse_grid(
        vec![
            Column::new("key", "Key").sortable(),
            Column::new("value", "Value").sortable(),
        ],
        trial.system_attrs.clone(),
    );
    format!(
        "Parameters\n{}\nIntermediate values\n{}\nTrial user attributes\n{}\nTrial system attributes\n{}",
        params, intermediate, user_attrs, system_attrs
    )
}

/// The trial table component.
///
/// Wraps a dense [`datagrid::Model`] over the study's trials with the
/// derived columns from [`trial_columns`] and a collapsible per-trial detail
/// region. Replacing the snapshot with [`Model::set_study`] keeps the
/// table's sort, filter, page-size, and expansion state whenever the
/// objective cardinality is unchanged; stale expanded keys match nothing.
pub struct Model {
    grid: datagrid::Model<Trial>,
    directions: usize,
    initial_page_size: PageSize,
}

impl Model {
    /// Creates an empty trial table.
    pub fn new() -> Self {
        Self::with_initial_page_size(PageSize::Limited(10))
    }

    /// Creates an empty trial table starting at the given rows-per-page
    /// option (the beta study view starts at 50).
    pub fn with_initial_page_size(size: PageSize) -> Self {
        Self {
            grid: Self::build_grid(None, Vec::new(), size),
            directions: 0,
            initial_page_size: size,
        }
    }

    fn build_grid(
        study: Option<&StudyDetail>,
        trials: Vec<Trial>,
        size: PageSize,
    ) -> datagrid::Model<Trial> {
        let detail_trials = trials.clone();
        datagrid::Model::new(trial_columns(study))
            .dense(true)
            .with_initial_page_size(size)
            .with_detail(move |index| {
                detail_trials
                    .get(index)
                    .map(collapse_body)
                    .unwrap_or_default()
            })
            .with_rows(trials)
    }

    /// Replaces the study snapshot.
    ///
    /// When the number of objective directions is unchanged the existing
    /// grid keeps its view state and only the rows are swapped; a change in
    /// cardinality rebuilds the column set (and with it the view state,
    /// since the old sort column may no longer exist).
    pub fn set_study(&mut self, study: Option<&StudyDetail>) {
        let directions = study.map(|s| s.directions.len()).unwrap_or(0);
        let trials = study.map(|s| s.trials.clone()).unwrap_or_default();
        if directions == self.directions {
            let detail_trials = trials.clone();
            self.grid.set_rows(trials);
            self.grid.set_detail(move |index| {
                detail_trials
                    .get(index)
                    .map(collapse_body)
                    .unwrap_or_default()
            });
        } else {
            self.grid = Self::build_grid(study, trials, self.initial_page_size);
            self.directions = directions;
        }
    }

    /// The underlying grid, for programmatic sort/filter/page control.
    pub fn grid(&self) -> &datagrid::Model<Trial> {
        &self.grid
    }

    /// Mutable access to the underlying grid.
    pub fn grid_mut(&mut self) -> &mut datagrid::Model<Trial> {
        &mut self.grid
    }

    /// Forwards key messages to the grid.
    pub fn update(&mut self, msg: &Msg) {
        self.grid.update(msg);
    }

    /// Renders the table.
    pub fn view(&self) -> String {
        self.grid.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
