//! Terminal presentation: capability detection, theme tokens, console reporter
//! and interactive prompts.

pub mod primitives;
pub mod prompt;
pub mod reporter;
pub mod terminal;
pub mod theme;

pub use prompt::DialoguerPrompter;
pub use reporter::ConsoleReporter;
pub use terminal::{detect_capabilities, TerminalCapabilities};
