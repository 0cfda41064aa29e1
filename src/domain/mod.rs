//! Domain Layer
//!
//! The project model and the interfaces the provisioning pipeline talks to.
//!
//! ## Structure
//!
//! - `entities/` - The loaded project configuration
//! - `value_objects/` - Option sets, fixed names, prompt responders
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod value_objects;
