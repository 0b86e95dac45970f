/// Common model traits for name classification
pub mod model;

/// Batcher
pub mod batcher;

/// Masked sequence loss
pub mod loss;

/// Output adapted for Burn metrics
pub mod output;

/// Caller-owned running metrics
pub mod metrics;

/// Training
pub mod training;

/// Inference
pub mod inference;

pub use batcher::Batcher;
pub use inference::{Predictor, PredictorError, PREDICTOR};
pub use loss::sequence_cross_entropy_with_logits;
pub use metrics::CategoricalAccuracy;
pub use model::Model;
pub use output::Output;
pub use training::{evaluate, train};

/// The unique string token that identifies this pipeline
pub static PIPELINE: &str = "name-classification";
