//! Console implementation of the progress reporter

use std::io::Write;

use crate::domain::ports::Reporter;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

/// Prints progress lines; sections and details to stdout, problems to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    caps: TerminalCapabilities,
}

impl ConsoleReporter {
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self { caps }
    }

    pub fn detect() -> Self {
        Self::new(detect_capabilities())
    }

    pub fn capabilities(&self) -> TerminalCapabilities {
        self.caps
    }

    fn line(&self, icon: Icon, text: ColoredText) -> String {
        format!(
            "{} {}",
            icon.colored(self.caps.supports_color, self.caps.supports_unicode),
            text.render(self.caps.supports_color)
        )
    }

    pub fn format_section(&self, message: &str) -> String {
        self.line(Icon::Section, ColoredText::success(message).bold())
    }

    pub fn format_detail(&self, message: &str) -> String {
        self.line(Icon::Detail, ColoredText::info(message))
    }

    pub fn format_warn(&self, message: &str) -> String {
        self.line(Icon::Warning, ColoredText::warning(message))
    }

    pub fn format_error(&self, message: &str) -> String {
        self.line(Icon::Error, ColoredText::error(message))
    }

    pub fn format_success(&self, message: &str) -> String {
        self.line(Icon::Success, ColoredText::success(message))
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, message: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", self.format_section(message));
    }

    fn detail(&self, message: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", self.format_detail(message));
    }

    fn warn(&self, message: &str) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{}", self.format_warn(message));
    }

    fn error(&self, message: &str) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{}", self.format_error(message));
    }
}
