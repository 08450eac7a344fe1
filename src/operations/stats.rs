//! Row and column statistics without materializing the file
//!
//! Every logical line counts towards `total_rows`; lines inside the
//! [`RowWindow`] count towards `rows`. The column count comes from the last
//! line of the file, even when that line lies outside the window, which
//! gives callers the file's trailing record width in the same pass.

use crate::error::{Partial, Result, ScanResult};
use crate::formats::delimited::count_fields;
use crate::types::{FileStats, RowWindow};

/// Accumulates [`FileStats`] one line at a time
#[derive(Debug, Clone)]
pub struct StatsCollector {
    window: RowWindow,
    delimiter: u8,
    stats: FileStats,
    last_line: Option<Vec<u8>>,
}

impl StatsCollector {
    /// Start counting under `window`
    pub fn new(window: RowWindow, delimiter: u8) -> Self {
        Self {
            window,
            delimiter,
            stats: FileStats::default(),
            last_line: None,
        }
    }

    /// Count one logical line
    pub fn observe(&mut self, line: Vec<u8>) {
        self.stats.total_rows += 1;
        if self.window.contains(self.stats.total_rows) {
            self.stats.rows += 1;
        }
        self.last_line = Some(line);
    }

    /// Final counts, with columns taken from the last line observed
    pub fn finish(self) -> FileStats {
        let columns = self
            .last_line
            .as_deref()
            .map_or(0, |line| count_fields(line, self.delimiter));
        FileStats {
            columns,
            ..self.stats
        }
    }
}

/// Count rows and last-line columns over a line stream
///
/// # Errors
///
/// Stops at the first error from `lines` and returns it together with the
/// counts accumulated so far.
pub fn compute<I>(lines: I, delimiter: u8, window: RowWindow) -> ScanResult<FileStats>
where
    I: IntoIterator<Item = Result<Vec<u8>>>,
{
    let mut collector = StatsCollector::new(window, delimiter);
    for line in lines {
        match line {
            Ok(line) => collector.observe(line),
            Err(e) => return Err(Partial::new(collector.finish(), e)),
        }
    }
    Ok(collector.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TabscanError;

    fn lines(text: &str) -> Vec<Result<Vec<u8>>> {
        text.lines().map(|l| Ok(l.as_bytes().to_vec())).collect()
    }

    fn ten_lines() -> String {
        (1..=10).map(|i| format!("row{i}\tA\tB\n")).collect()
    }

    #[test]
    fn test_window_arithmetic() {
        let stats = compute(lines(&ten_lines()), b'\t', RowWindow::new(2, Some(3))).unwrap();
        assert_eq!(stats.total_rows, 10);
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.columns, 3);
    }

    #[test]
    fn test_unbounded_limit() {
        let stats = compute(lines(&ten_lines()), b'\t', RowWindow::from_signed(4, -1)).unwrap();
        assert_eq!(stats.rows, 6);
    }

    #[test]
    fn test_skip_past_end() {
        let stats = compute(lines(&ten_lines()), b'\t', RowWindow::new(20, None)).unwrap();
        assert_eq!(stats.total_rows, 10);
        assert_eq!(stats.rows, 0);
    }

    #[test]
    fn test_columns_from_last_line_outside_window() {
        let text = "h1\th2\n1\t2\n3\t4\na\tb\tc\td\te\n";
        let stats = compute(lines(text), b'\t', RowWindow::new(1, Some(1))).unwrap();
        assert_eq!(stats.rows, 1);
        assert_eq!(stats.columns, 5);
    }

    #[test]
    fn test_no_lines() {
        let stats = compute(Vec::new(), b'\t', RowWindow::all()).unwrap();
        assert_eq!(stats, FileStats::default());
    }

    #[test]
    fn test_empty_last_line_has_one_column() {
        let input = vec![Ok(b"a,b".to_vec()), Ok(Vec::new())];
        let stats = compute(input, b',', RowWindow::all()).unwrap();
        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.columns, 1);
    }

    #[test]
    fn test_error_returns_partial_counts() {
        let input = vec![
            Ok(b"a\tb".to_vec()),
            Ok(b"c\td\te".to_vec()),
            Err(TabscanError::Stream("unexpected end of file".to_string())),
            Ok(b"never".to_vec()),
        ];
        let err = compute(input, b'\t', RowWindow::all()).unwrap_err();
        let (stats, error) = err.into_parts();

        assert!(matches!(error, TabscanError::Stream(_)));
        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.columns, 3);
    }
}
