//! Application layer - Clipboard orchestration and port interfaces
//!
//! Contains the trait definitions that adapters implement, the
//! lazily-initialized backend facade, and the clipboard manager.

pub mod facade;
pub mod manager;
pub mod ports;
