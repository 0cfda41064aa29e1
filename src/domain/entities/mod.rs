//! Domain Entities

mod project_config;

#[cfg(test)]
pub(crate) use project_config::sample_settings;
pub use project_config::{ProjectConfig, ProjectSettings};
