use burn::tensor::{backend::Backend, Tensor};

use super::{
    batcher::{Infer, Train},
    Output,
};

/// A trait for sequence taggers that can be used for Name Classification
pub trait Model<B: Backend> {
    /// Perform a forward pass, computing logits and a masked loss against the targets
    fn forward(&self, item: Train<B>) -> Output<B>;

    /// Defines forward pass for inference, returning logits: [batch_size, seq_length, n_classes]
    fn infer(&self, input: Infer<B>) -> Tensor<B, 3>;
}
