//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod local_runner;
pub mod prompter;
pub mod remote_executor;
pub mod reporter;
pub mod template_renderer;

pub use local_runner::LocalRunner;
pub use prompter::Prompter;
pub use remote_executor::{
    CommandOutput, ConnectionParams, Connector, Privilege, RemoteExecutor, ShellCommand,
};
pub use reporter::Reporter;
pub use template_renderer::{TemplateContext, TemplateRenderer};
