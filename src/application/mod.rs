//! Application layer: the per-command session, the provisioning and
//! deployment operations, and the dispatcher tying them to the CLI.

pub mod deploy;
pub mod dispatcher;
pub mod pipeline;
pub mod provision;
pub mod session;

pub use dispatcher::{DispatchOutcome, Dispatcher, Phase};
pub use pipeline::{Command, RENEW_ARTIFACT};
pub use session::{Session, Toolkit};
