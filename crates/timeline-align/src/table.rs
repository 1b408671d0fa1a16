//! Aligned Timeline Table

/// Marker for grid cells with no contributing samples.
///
/// Cells hold this (never zero) between alignment and gap filling. Grid
/// timestamps themselves are always real values.
pub const MISSING: f64 = f64::NAN;

/// Whether a cell holds the missing marker.
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// One named value column over the shared grid.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    /// Create a column; length must match the owning table's grid.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A uniform-grid table: one timestamp per row plus named value columns.
#[derive(Debug, Clone, Default)]
pub struct AlignedTable {
    timestamps: Vec<f64>,
    columns: Vec<Column>,
}

impl AlignedTable {
    /// Build a table from a grid and its value columns.
    pub fn new(timestamps: Vec<f64>, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == timestamps.len()));
        Self { timestamps, columns }
    }

    /// Number of grid rows
    pub fn n_rows(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Grid timestamps, ascending after alignment or sorting
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// All value columns in insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access to the value columns
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Stable ascending sort of all rows by timestamp.
    pub fn sort_by_timestamp(&mut self) {
        let mut order: Vec<usize> = (0..self.timestamps.len()).collect();
        order.sort_by(|&a, &b| self.timestamps[a].total_cmp(&self.timestamps[b]));

        self.timestamps = order.iter().map(|&i| self.timestamps[i]).collect();
        for column in &mut self.columns {
            column.values = order.iter().map(|&i| column.values[i]).collect();
        }
    }
}
