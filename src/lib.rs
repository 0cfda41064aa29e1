//! Wise - provision and deploy Django projects over SSH
//!
//! A project is described by a small JSON file. Commands turn it into
//! ordered sequences of remote shell commands: packages, accounts, database,
//! nginx, supervisor, certificates and a git push-to-deploy repository.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-exports for convenience
pub use application::{Command, DispatchOutcome, Dispatcher, Session, Toolkit};
pub use domain::entities::{ProjectConfig, ProjectSettings};
pub use error::{WiseError, WiseResult};
