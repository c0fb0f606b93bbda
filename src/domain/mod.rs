//! Domain layer - Core business logic
//!
//! Contains the content classifier, image codec, snapshot cache,
//! configuration model, and domain errors.

pub mod config;
pub mod content;
pub mod error;
pub mod image;
pub mod snapshot;
