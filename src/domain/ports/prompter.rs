//! Interactive prompt port

use crate::error::WiseResult;

/// Asks the operator for input
pub trait Prompter {
    /// Masked input
    fn password(&self, prompt: &str) -> WiseResult<String>;

    /// Yes/no question; `default` is used when the operator just hits enter
    fn confirm(&self, prompt: &str, default: bool) -> WiseResult<bool>;
}
