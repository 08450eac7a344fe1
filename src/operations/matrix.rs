//! Windowed matrix extraction
//!
//! Copies a contiguous block of rows (after `skip` lines) and the first
//! `ncols` fields of each into a pre-sized [`StringMatrix`]. A selected row
//! that is narrower than the matrix is an error; nothing is padded.

use crate::error::{Partial, Result, ScanResult, TabscanError};
use crate::formats::delimited::split_fields;
use crate::types::StringMatrix;

/// Fills a [`StringMatrix`] from successive lines
#[derive(Debug, Clone)]
pub struct MatrixLoader {
    matrix: StringMatrix,
    skip: u64,
    delimiter: u8,
    next_row: usize,
}

impl MatrixLoader {
    /// Allocate an `nrows × ncols` grid that will take lines after `skip`
    ///
    /// # Errors
    ///
    /// Returns [`TabscanError::InvalidConfig`] if the grid is too large to
    /// allocate.
    pub fn new(nrows: usize, ncols: usize, skip: u64, delimiter: u8) -> Result<Self> {
        Ok(Self {
            matrix: StringMatrix::try_new(nrows, ncols)?,
            skip,
            delimiter,
            next_row: 0,
        })
    }

    /// Whether every row of the grid has been written
    pub fn is_full(&self) -> bool {
        self.next_row >= self.matrix.nrows()
    }

    /// Rows written so far
    pub fn rows_filled(&self) -> usize {
        self.next_row
    }

    /// Offer the line at 1-based `position`
    ///
    /// Lines before the window or after the grid is full are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TabscanError::IndexFault`] if a selected line has fewer
    /// fields than the grid has columns. The grid is left untouched.
    pub fn observe(&mut self, position: u64, line: &[u8]) -> Result<()> {
        if position <= self.skip || self.is_full() {
            return Ok(());
        }

        let ncols = self.matrix.ncols();
        let fields = split_fields(line, self.delimiter);
        if fields.len() < ncols {
            return Err(TabscanError::IndexFault {
                line: position,
                expected: ncols,
                actual: fields.len(),
            });
        }

        let row = self.matrix.row_mut(self.next_row);
        for (cell, field) in row.iter_mut().zip(fields) {
            *cell = String::from_utf8_lossy(field).into_owned();
        }
        self.next_row += 1;
        Ok(())
    }

    /// The grid, filled or not
    pub fn into_matrix(self) -> StringMatrix {
        self.matrix
    }
}

/// Load an `nrows × ncols` window of a line stream, starting after `skip` lines
///
/// Stops pulling lines as soon as the grid is full. Rows the input never
/// reaches stay empty.
///
/// # Errors
///
/// Stream errors, cancellation and [`TabscanError::IndexFault`] end the load
/// and return the rows written so far. A shape that cannot be allocated
/// fails with [`TabscanError::InvalidConfig`] and an empty 0 × 0 grid before
/// any line is read.
pub fn load<I>(
    lines: I,
    delimiter: u8,
    nrows: usize,
    ncols: usize,
    skip: u64,
) -> ScanResult<StringMatrix>
where
    I: IntoIterator<Item = Result<Vec<u8>>>,
{
    let mut loader = match MatrixLoader::new(nrows, ncols, skip, delimiter) {
        Ok(loader) => loader,
        Err(e) => return Err(Partial::new(StringMatrix::default(), e)),
    };
    if loader.is_full() {
        return Ok(loader.into_matrix());
    }

    let mut position = 0u64;
    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(e) => return Err(Partial::new(loader.into_matrix(), e)),
        };
        position += 1;

        if let Err(e) = loader.observe(position, &line) {
            return Err(Partial::new(loader.into_matrix(), e));
        }
        if loader.is_full() {
            log::debug!("Matrix window filled after {} lines", position);
            break;
        }
    }

    Ok(loader.into_matrix())
}
