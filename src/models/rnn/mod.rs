/// RNN sequence tagger config
pub mod config;

/// RNN sequence tagger
pub mod model;

/// Training and validation steps
pub mod train;

pub use config::{Config, MODEL};
pub use model::{Model, ModelRecord};
