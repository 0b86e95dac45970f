use burn::{
    tensor::{backend::Backend, Bool, Int, Tensor},
    train::metric::{AccuracyInput, Adaptor, LossInput},
};
use derive_new::new;

/// Per-token classification output adapted for multiple metrics.
#[derive(new)]
pub struct Output<B: Backend> {
    /// The loss.
    pub loss: Tensor<B, 1>,

    /// The logits: [batch_size, seq_length, n_classes]
    pub output: Tensor<B, 3>,

    /// The targets.
    pub targets: Tensor<B, 2, Int>,

    /// The padding mask, true at padded positions.
    pub mask_pad: Tensor<B, 2, Bool>,
}

impl<B: Backend> Output<B> {
    /// The target id used for padded positions when flattening for accuracy. It is one past
    /// the last real class, so it never matches a prediction.
    pub fn pad_target(&self) -> usize {
        let [_, _, n_classes] = self.output.dims();

        n_classes
    }
}

impl<B: Backend> Adaptor<AccuracyInput<B>> for Output<B> {
    fn adapt(&self) -> AccuracyInput<B> {
        let [batch_size, seq_length, n_classes] = self.output.dims();

        let targets = self
            .targets
            .clone()
            .mask_fill(self.mask_pad.clone(), self.pad_target() as i64);

        AccuracyInput::new(
            self.output
                .clone()
                .reshape([batch_size * seq_length, n_classes]),
            targets.reshape([batch_size * seq_length]),
        )
    }
}

impl<B: Backend> Adaptor<LossInput<B>> for Output<B> {
    fn adapt(&self) -> LossInput<B> {
        LossInput::new(self.loss.clone())
    }
}
