//! OpenSSH client adapter

mod args;
mod executor;

pub use args::shell_quote;
pub use executor::{SshConnector, SshExecutor};
