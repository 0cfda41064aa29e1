//! Configuration module for Wise
//!
//! The project is described by a JSON file (`django.json` by default) in the
//! working directory. `--file` on the command line picks another one.

mod home;
mod loader;
mod persist;

pub use home::{expand_home, wise_home_dir, WISE_TEST_HOME_VAR};
pub use loader::{load, load_with_warnings, parse, ConfigWarning};
pub use persist::enable_https;
