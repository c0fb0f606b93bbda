//! Configuration adapters

mod xdg;

pub use xdg::{env_overrides, XdgConfigStore};
