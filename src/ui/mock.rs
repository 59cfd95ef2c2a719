//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Confirmations can be answered in
//! advance.
//!
//! # Example
//!
//! ```
//! use pathreg::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm_response(false);
//!
//! ui.message("Reading user PATH");
//! ui.success("Added /opt/tool/bin");
//! assert!(!ui.confirm("Write machine PATH?", true).unwrap());
//!
//! assert!(ui.has_message("Reading user PATH"));
//! assert!(ui.has_success("Added /opt/tool/bin"));
//! assert_eq!(ui.confirms_shown(), ["Write machine PATH?"]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    spinners: Vec<Rc<RefCell<MockSpinner>>>,
    confirms_shown: Vec<String>,
    confirm_response: Option<bool>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Answer every confirmation with `response`.
    ///
    /// Without a response, confirmations return their default.
    pub fn set_confirm_response(&mut self, response: bool) {
        self.confirm_response = Some(response);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured hints.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Get all confirmation questions asked.
    pub fn confirms_shown(&self) -> &[String] {
        &self.confirms_shown
    }

    /// Snapshot of every spinner started so far.
    pub fn spinners(&self) -> Vec<MockSpinner> {
        self.spinners.iter().map(|s| s.borrow().clone()).collect()
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a success message containing `msg` was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
            || self.finished_with(SpinnerStatus::Success, msg)
    }

    /// Check if a warning containing `msg` was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
            || self.finished_with(SpinnerStatus::Warning, msg)
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
            || self.finished_with(SpinnerStatus::Error, msg)
    }

    /// Check if a hint containing `msg` was shown.
    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    fn finished_with(&self, status: SpinnerStatus, msg: &str) -> bool {
        self.spinners.iter().any(|s| {
            let s = s.borrow();
            s.status == Some(status) && s.finish_message().is_some_and(|m| m.contains(msg))
        })
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.confirms_shown.push(question.to_string());
        Ok(self.confirm_response.unwrap_or(default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let spinner = Rc::new(RefCell::new(MockSpinner {
            messages: vec![message.to_string()],
            ..Default::default()
        }));
        self.spinners.push(Rc::clone(&spinner));
        Box::new(SharedSpinner(spinner))
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures its messages and final status.
#[derive(Debug, Clone, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Warning,
    Error,
    Skipped,
}

impl MockSpinner {
    /// Messages set during spinning, starting with the initial one.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the finish status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }

    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        self.status = Some(status);
        self.finish_message = Some(msg.to_string());
    }
}

/// The handle given out by [`MockUI::start_spinner`]; the UI keeps a clone.
struct SharedSpinner(Rc<RefCell<MockSpinner>>);

impl SpinnerHandle for SharedSpinner {
    fn set_message(&mut self, msg: &str) {
        self.0.borrow_mut().messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.0.borrow_mut().finish(SpinnerStatus::Success, msg);
    }

    fn finish_warning(&mut self, msg: &str) {
        self.0.borrow_mut().finish(SpinnerStatus::Warning, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.0.borrow_mut().finish(SpinnerStatus::Error, msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.0.borrow_mut().finish(SpinnerStatus::Skipped, msg);
    }
}
