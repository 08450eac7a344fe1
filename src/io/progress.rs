//! Progress notifications and cooperative cancellation

use crate::config::ScanConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Progress notification emitted while scanning in verbose mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Cumulative line count, every `progress_interval` lines
    Lines(u64),
    /// Stream finished cleanly after this many lines
    Completed(u64),
}

/// Receiver for [`ProgressEvent`]s
pub type ProgressCallback = Box<dyn FnMut(ProgressEvent)>;

/// Shared interrupt flag, polled once per chunk
///
/// Clones share the same flag, so a token can be handed to a signal
/// handler or another thread while the scan runs.
///
/// ```
/// use tabscan::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the interrupt
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the interrupt has been raised
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Routes progress to the injected callback, or to `log` when none is set
pub(crate) struct ProgressReporter {
    verbose: bool,
    interval: u64,
    callback: Option<ProgressCallback>,
}

impl ProgressReporter {
    pub(crate) fn new(config: &ScanConfig) -> Self {
        Self {
            verbose: config.verbose,
            interval: config.progress_interval.max(1),
            callback: None,
        }
    }

    pub(crate) fn set_callback(&mut self, callback: ProgressCallback) {
        self.callback = Some(callback);
    }

    pub(crate) fn line(&mut self, lines: u64) {
        if self.verbose && lines % self.interval == 0 {
            self.emit(ProgressEvent::Lines(lines));
        }
    }

    pub(crate) fn completed(&mut self, lines: u64) {
        if self.verbose {
            self.emit(ProgressEvent::Completed(lines));
        }
    }

    fn emit(&mut self, event: ProgressEvent) {
        match self.callback.as_mut() {
            Some(callback) => callback(event),
            None => match event {
                ProgressEvent::Lines(lines) => log::debug!("Processed line: {}", lines),
                ProgressEvent::Completed(lines) => log::info!("Completed: {} lines", lines),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(config: &ScanConfig) -> (ProgressReporter, Rc<RefCell<Vec<ProgressEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut reporter = ProgressReporter::new(config);
        reporter.set_callback(Box::new(move |event| sink.borrow_mut().push(event)));
        (reporter, events)
    }

    #[test]
    fn test_reports_every_interval() {
        let config = ScanConfig::default().with_progress_interval(2);
        let (mut reporter, events) = recording(&config);

        for line in 1..=5 {
            reporter.line(line);
        }
        reporter.completed(5);

        assert_eq!(
            *events.borrow(),
            vec![
                ProgressEvent::Lines(2),
                ProgressEvent::Lines(4),
                ProgressEvent::Completed(5),
            ]
        );
    }

    #[test]
    fn test_quiet_when_not_verbose() {
        let config = ScanConfig::default()
            .with_progress_interval(1)
            .with_verbose(false);
        let (mut reporter, events) = recording(&config);

        reporter.line(1);
        reporter.completed(1);

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_cancel_token_shared() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());

        let clone = token.clone();
        std::thread::spawn(move || clone.cancel()).join().unwrap();

        assert!(token.is_cancelled());
    }
}
