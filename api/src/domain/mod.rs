//! Domain layer
//!
//! Contains pure scoring types with no external dependencies.
//! - `entities`: Domain names, features, scores and market context
//! - `ports`: Trait definitions for external collaborators

pub mod entities;
pub mod ports;
