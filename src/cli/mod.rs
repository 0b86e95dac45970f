/// CLI Indexes: registered components
pub mod components;

/// CLI backend selection
pub mod backend;

pub use components::{Component, ComponentError};
