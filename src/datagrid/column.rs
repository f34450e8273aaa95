//! Column model for the data grid.
//!
//! A [`Column`] declares how one attribute of a row is extracted, labeled,
//! compared, and filtered, without coupling the grid engine to the row's
//! internal shape. Rows expose themselves to the grid through the
//! [`GridRow`] trait, which supplies a unique key and raw field access.

use std::cmp::Ordering;
use std::fmt;

/// A single displayable cell value.
///
/// Missing values are represented as `Option<CellValue>::None` and render as
/// an empty cell. The `Display` form of a value doubles as its filter
/// identity: two cells are the same filter choice exactly when their
/// displayed strings are equal.
///
/// # Examples
///
/// ```rust
/// use trialboard::datagrid::CellValue;
///
/// assert_eq!(CellValue::Int(42).to_string(), "42");
/// assert_eq!(CellValue::Float(0.5).to_string(), "0.5");
/// assert_eq!(CellValue::Text("Complete".into()).to_string(), "Complete");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// An integer value (counts, identifiers, steps).
    Int(i64),
    /// A floating point value (objective values, metrics).
    Float(f64),
    /// A textual value (states, names, parameter summaries).
    Text(String),
}

impl CellValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

/// Natural ordering over optional cell values.
///
/// Used as the comparator for sortable columns that do not supply a custom
/// `less` function. Numbers compare numerically (integers and floats mix),
/// text compares lexicographically, and mixed kinds order numbers before
/// text. A present value always sorts ahead of a missing one; two missing
/// values compare equal, which leaves their source order untouched under a
/// stable sort.
pub fn natural_order(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match (a, b) {
                (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Presentational hint for cell padding. Not semantically load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellPadding {
    /// Standard cell padding.
    #[default]
    Normal,
    /// Compact cells with no horizontal padding.
    None,
}

/// Row seam between the grid engine and application entities.
///
/// Rows are immutable snapshots supplied by the caller on each
/// `set_rows`; the grid never mutates them.
///
/// # Key uniqueness
///
/// `key()` values must be unique across all rows handed to one grid
/// instance. Duplicate keys make expansion tracking undefined; the grid does
/// not check for them.
///
/// # Examples
///
/// ```rust
/// use trialboard::datagrid::{CellValue, GridRow};
///
/// #[derive(Clone)]
/// struct Measurement {
///     id: i64,
///     celsius: Option<f64>,
/// }
///
/// impl GridRow for Measurement {
///     fn key(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn field(&self, name: &str) -> Option<CellValue> {
///         match name {
///             "id" => Some(CellValue::Int(self.id)),
///             "celsius" => self.celsius.map(CellValue::Float),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait GridRow: Clone {
    /// Returns the unique identity of this row as a string.
    fn key(&self) -> String;

    /// Returns the raw value of the named field, or `None` when the field is
    /// absent or unknown. Used by columns without a cell extractor.
    fn field(&self, name: &str) -> Option<CellValue>;
}

type Comparator<R> = Box<dyn Fn(&R, &R) -> Ordering>;
type CellFn<R> = Box<dyn Fn(usize, &R) -> Option<CellValue>>;

/// Declarative description of one grid column.
///
/// A column names the raw field it reads, carries the display label, and
/// optionally overrides comparison (`less`) and value extraction (`cell`).
/// When a cell extractor is present it receives the row's position in the
/// original, unsorted and unfiltered collection, so derived columns can
/// address sibling data consistently regardless of display order; its output
/// must be consistent with what `less` compares.
///
/// Columns are built with the builder pattern:
///
/// ```rust
/// use trialboard::datagrid::{CellValue, Column, GridRow};
/// # #[derive(Clone)]
/// # struct R;
/// # impl GridRow for R {
/// #     fn key(&self) -> String { String::new() }
/// #     fn field(&self, _: &str) -> Option<CellValue> { None }
/// # }
///
/// let column: Column<R> = Column::new("state", "State")
///     .sortable()
///     .filterable();
/// assert!(column.sortable);
/// ```
pub struct Column<R> {
    /// The row field this column primarily reads. Informational when a cell
    /// extractor is present.
    pub field: &'static str,
    /// Display name shown in the header.
    pub label: String,
    /// Whether selecting this column's header sorts the grid.
    pub sortable: bool,
    /// Whether this column's distinct values can restrict the visible rows.
    pub filterable: bool,
    /// Presentational padding hint.
    pub padding: CellPadding,
    less: Option<Comparator<R>>,
    cell: Option<CellFn<R>>,
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("padding", &self.padding)
            .field("has_less", &self.less.is_some())
            .field("has_cell", &self.cell.is_some())
            .finish()
    }
}

impl<R: GridRow> Column<R> {
    /// Creates a plain display column over the named field.
    pub fn new(field: &'static str, label: impl Into<String>) -> Self {
        Self {
            field,
            label: label.into(),
            sortable: false,
            filterable: false,
            padding: CellPadding::Normal,
            less: None,
            cell: None,
        }
    }

    /// Marks this column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Marks this column as filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Sets the padding hint.
    pub fn padding(mut self, padding: CellPadding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets a custom comparator defining this column's base sort direction.
    ///
    /// `Ordering::Less` means the first argument displays first when the
    /// column is sorted in its base (ascending) direction. Required for
    /// sortable columns whose natural ordering is non-trivial, such as
    /// derived values with missing entries.
    pub fn with_less(mut self, less: impl Fn(&R, &R) -> Ordering + 'static) -> Self {
        self.less = Some(Box::new(less));
        self
    }

    /// Sets a value-extraction function, decoupling the displayed value from
    /// the stored representation.
    pub fn with_cell(mut self, cell: impl Fn(usize, &R) -> Option<CellValue> + 'static) -> Self {
        self.cell = Some(Box::new(cell));
        self
    }

    /// Returns the cell value for the row at `index` in the original
    /// collection. Falls back to raw field access when no extractor is set.
    pub fn cell_value(&self, index: usize, row: &R) -> Option<CellValue> {
        match &self.cell {
            Some(cell) => cell(index, row),
            None => row.field(self.field),
        }
    }

    /// Compares two rows in this column's base direction.
    ///
    /// Resolution order: the custom comparator if present, otherwise the
    /// natural ordering of the extracted cell values. A column with neither
    /// a comparator nor comparable values degrades to treating all rows as
    /// equal, which is a stable no-op under the engine's stable sort.
    pub fn compare(&self, a: (usize, &R), b: (usize, &R)) -> Ordering {
        match &self.less {
            Some(less) => less(a.1, b.1),
            None => {
                let av = self.cell_value(a.0, a.1);
                let bv = self.cell_value(b.0, b.1);
                natural_order(av.as_ref(), bv.as_ref())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Item {
        name: &'static str,
        score: Option<f64>,
    }

    impl GridRow for Item {
        fn key(&self) -> String {
            self.name.to_string()
        }

        fn field(&self, name: &str) -> Option<CellValue> {
            match name {
                "name" => Some(CellValue::from(self.name)),
                "score" => self.score.map(CellValue::Float),
                _ => None,
            }
        }
    }

    #[test]
    fn test_natural_order_numeric() {
        let a = CellValue::Int(2);
        let b = CellValue::Float(2.5);
        assert_eq!(natural_order(Some(&a), Some(&b)), Ordering::Less);
        assert_eq!(natural_order(Some(&b), Some(&a)), Ordering::Greater);
    }

    #[test]
    fn test_natural_order_present_before_missing() {
        let a = CellValue::Float(1.0);
        assert_eq!(natural_order(Some(&a), None), Ordering::Less);
        assert_eq!(natural_order(None, Some(&a)), Ordering::Greater);
        assert_eq!(natural_order(None, None), Ordering::Equal);
    }

    #[test]
    fn test_natural_order_text() {
        let a = CellValue::from("Complete");
        let b = CellValue::from("Running");
        assert_eq!(natural_order(Some(&a), Some(&b)), Ordering::Less);
    }

    #[test]
    fn test_numbers_sort_before_text() {
        let a = CellValue::Int(3);
        let b = CellValue::from("three");
        assert_eq!(natural_order(Some(&a), Some(&b)), Ordering::Less);
    }

    #[test]
    fn test_cell_value_falls_back_to_field() {
        let column: Column<Item> = Column::new("score", "Score").sortable();
        let item = Item {
            name: "a",
            score: Some(0.25),
        };
        assert_eq!(column.cell_value(0, &item), Some(CellValue::Float(0.25)));
    }

    #[test]
    fn test_cell_extractor_overrides_field() {
        let column: Column<Item> = Column::new("score", "Score")
            .with_cell(|_, item: &Item| item.score.map(|s| (s * 100.0).into()));
        let item = Item {
            name: "a",
            score: Some(0.25),
        };
        assert_eq!(column.cell_value(0, &item), Some(CellValue::Float(25.0)));
    }

    #[test]
    fn test_compare_uses_custom_less() {
        // Reverse of natural order on purpose.
        let column: Column<Item> = Column::new("score", "Score")
            .sortable()
            .with_less(|a: &Item, b: &Item| {
                b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
            });
        let low = Item {
            name: "low",
            score: Some(0.1),
        };
        let high = Item {
            name: "high",
            score: Some(0.9),
        };
        assert_eq!(column.compare((0, &low), (1, &high)), Ordering::Greater);
    }

    #[test]
    fn test_unorderable_column_compares_equal() {
        let column: Column<Item> = Column::new("unknown", "Unknown").sortable();
        let a = Item {
            name: "a",
            score: None,
        };
        let b = Item {
            name: "b",
            score: None,
        };
        assert_eq!(column.compare((0, &a), (1, &b)), Ordering::Equal);
    }
}
