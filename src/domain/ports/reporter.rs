//! Progress reporting port
//!
//! Operations describe what they are doing through this trait; the console
//! implementation colors it, tests record it.

/// User-facing progress messages
pub trait Reporter {
    /// Start of an operation (">> Configuring ...")
    fn section(&self, message: &str);

    /// Progress or an expected outcome ("-> DB already exists")
    fn detail(&self, message: &str);

    /// Something the operator should look at; the command continues
    fn warn(&self, message: &str);

    /// A failure the command cannot recover from
    fn error(&self, message: &str);
}
