//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod layout;
mod option_set;
mod responder;

pub use layout::{
    CONFIG_FILE_NAME, DEFAULT_EMAIL, DEFAULT_PORT, DEFAULT_SSH_KEY, GIT_REMOTE, HOME_BASE_PATH,
    LETSENCRYPT_FOLDER, SHARED_GROUP,
};
pub use option_set::{Database, Deployment, OptionSet, ServerOs, UnknownOption, WebServer};
pub use responder::{Responder, ResponderScript};
