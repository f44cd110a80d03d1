use crate::error::PlotError;

/// The metadata column carried through from the simulation's line list;
/// never plotted.
pub const LINESLIST_COLUMN: &str = "#lineslist";

// ---------------------------------------------------------------------------
// LineTable – the raw emission-line grid table
// ---------------------------------------------------------------------------

/// A loaded grid table: one named column per emission line, cells kept as
/// strings until numeric coercion (non-numeric cells are a legitimate part
/// of the input and only become NaN later).
#[derive(Debug, Clone)]
pub struct LineTable {
    /// Column names in file order, taken from the header row.
    pub headers: Vec<String>,
    /// Column-major cells: `columns[c]` has one entry per table row.
    pub columns: Vec<Vec<String>>,
}

impl LineTable {
    /// Number of data rows (all columns have the same length by construction).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    /// Look up a column by its exact header name (whitespace significant).
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|i| self.columns[i].as_slice())
    }
}

// ---------------------------------------------------------------------------
// GridSpec – the two simulation axes behind the flattened table
// ---------------------------------------------------------------------------

/// Evenly spaced grid axes: x is typically log n_H, y is log Φ_H.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub nx: usize,
    pub ny: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl GridSpec {
    pub fn expected_rows(&self) -> usize {
        self.nx * self.ny
    }

    /// Fail unless the flat table folds exactly onto the grid.
    pub fn validate_rows(&self, actual: usize) -> Result<(), PlotError> {
        if self.expected_rows() != actual {
            return Err(PlotError::GridShape {
                nx: self.nx,
                ny: self.ny,
                expected: self.expected_rows(),
                actual,
            });
        }
        Ok(())
    }
}

/// `n` evenly spaced values from `min` to `max`, both endpoints included.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => (0..n)
            .map(|i| min + (max - min) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Field – a column folded back onto the grid
// ---------------------------------------------------------------------------

/// A 2-D scalar field over the grid, x-major: row `i` of the flat column
/// lands at `(i / ny, i % ny)`, so axis 0 follows x and axis 1 follows y.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub nx: usize,
    pub ny: usize,
    values: Vec<f64>,
}

impl Field {
    /// Fold a flat column onto the grid. The caller has already validated
    /// the row count against the grid, so a mismatch here is a logic error.
    pub fn from_flat(values: Vec<f64>, nx: usize, ny: usize) -> Self {
        debug_assert_eq!(values.len(), nx * ny);
        Field { nx, ny, values }
    }

    #[inline]
    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.values[ix * self.ny + iy]
    }
}

// ---------------------------------------------------------------------------
// LevelSpec – contour level range
// ---------------------------------------------------------------------------

/// Contour levels: `n_levels` evenly spaced values over `[log_min, log_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSpec {
    pub log_min: f64,
    pub log_max: f64,
    pub n_levels: usize,
}

impl Default for LevelSpec {
    fn default() -> Self {
        // 12 levels between 0 and 3 decades, the usual EW dynamic range.
        LevelSpec {
            log_min: 0.0,
            log_max: 3.0,
            n_levels: 12,
        }
    }
}

impl LevelSpec {
    pub fn levels(&self) -> Vec<f64> {
        linspace(self.log_min, self.log_max, self.n_levels)
    }
}

// ---------------------------------------------------------------------------
// Continuum – the three-column SED table
// ---------------------------------------------------------------------------

/// Parsed `continuum.cont`: photon energy plus incident and transmitted
/// νFν, columns 0, 1 and 2 of the file.
#[derive(Debug, Clone, Default)]
pub struct Continuum {
    pub energy: Vec<f64>,
    pub incident: Vec<f64>,
    pub transmitted: Vec<f64>,
}

impl Continuum {
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }
}
