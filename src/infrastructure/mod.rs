//! Adapters for the domain ports: OpenSSH, the local shell and embedded
//! templates.

pub(crate) mod process;

pub mod local;
pub mod ssh;
pub mod templates;

pub use local::LocalShell;
pub use ssh::{shell_quote, SshConnector, SshExecutor};
pub use templates::{parse_package_list, EmbeddedTemplates};
