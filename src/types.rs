//! Common types used throughout tabscan

use crate::error::{Result, TabscanError};
use std::fmt;

/// Contiguous selection of lines: skip a prefix, then keep up to `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowWindow {
    /// Lines to discard from the start of the file
    pub skip: u64,
    /// Maximum lines to retain after `skip`; `None` is unbounded
    pub limit: Option<u64>,
}

impl RowWindow {
    /// Create a window
    pub fn new(skip: u64, limit: Option<u64>) -> Self {
        Self { skip, limit }
    }

    /// Every line in the file
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a window using the `-1 means unbounded` convention
    ///
    /// Any negative limit maps to an unbounded window.
    ///
    /// ```
    /// use tabscan::RowWindow;
    ///
    /// assert_eq!(RowWindow::from_signed(2, -1).limit, None);
    /// assert_eq!(RowWindow::from_signed(2, 3).limit, Some(3));
    /// ```
    pub fn from_signed(skip: u64, limit: i64) -> Self {
        let limit = u64::try_from(limit).ok();
        Self { skip, limit }
    }

    /// Whether the line at 1-based `position` falls inside the window
    pub fn contains(&self, position: u64) -> bool {
        position > self.skip
            && self
                .limit
                .map_or(true, |limit| position - self.skip <= limit)
    }

    /// Number of lines retained from a file of `total` lines
    pub fn retained(&self, total: u64) -> u64 {
        let after_skip = total.saturating_sub(self.skip);
        match self.limit {
            Some(limit) => after_skip.min(limit),
            None => after_skip,
        }
    }
}

/// Row and column counts for a delimited file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileStats {
    /// Lines scanned
    pub total_rows: u64,
    /// Lines retained under the row window
    pub rows: u64,
    /// Field count of the last line in the file, independent of the window
    pub columns: usize,
}

impl fmt::Display for FileStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total_rows: {}\tRows: {}\tColumns: {}",
            self.total_rows, self.rows, self.columns
        )
    }
}

/// Fixed-size row-major grid of text cells
///
/// Cells start out empty and are filled row by row by the matrix loader.
/// The default value is the 0 × 0 grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringMatrix {
    nrows: usize,
    ncols: usize,
    cells: Vec<String>,
}

impl StringMatrix {
    /// Allocate an `nrows × ncols` grid of empty strings
    ///
    /// # Errors
    ///
    /// Returns [`TabscanError::InvalidConfig`] if the cell count overflows
    /// `usize` or the allocation is refused.
    pub fn try_new(nrows: usize, ncols: usize) -> Result<Self> {
        let len = nrows.checked_mul(ncols).ok_or_else(|| {
            TabscanError::InvalidConfig(format!("{} x {} matrix overflows usize", nrows, ncols))
        })?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|e| {
            TabscanError::InvalidConfig(format!("cannot allocate {} x {} matrix: {}", nrows, ncols, e))
        })?;
        cells.resize(len, String::new());

        Ok(Self { nrows, ncols, cells })
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Cell at (`row`, `col`), or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        if row < self.nrows && col < self.ncols {
            Some(self.cells[row * self.ncols + col].as_str())
        } else {
            None
        }
    }

    /// All cells of one row
    pub fn row(&self, row: usize) -> Option<&[String]> {
        if row < self.nrows {
            Some(&self.cells[row * self.ncols..(row + 1) * self.ncols])
        } else {
            None
        }
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        (0..self.nrows).map(move |row| &self.cells[row * self.ncols..(row + 1) * self.ncols])
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [String] {
        &mut self.cells[row * self.ncols..(row + 1) * self.ncols]
    }

    /// Convert into nested row vectors
    pub fn into_rows(self) -> Vec<Vec<String>> {
        let ncols = self.ncols;
        let mut cells = self.cells.into_iter();
        (0..self.nrows)
            .map(|_| cells.by_ref().take(ncols).collect())
            .collect()
    }
}
