use burn::tensor::{backend::Backend, Bool, Int, Tensor};

/// Running per-token accuracy over the valid (non-padded) positions of every batch it sees.
///
/// The caller owns the accumulator and decides when to reset it, typically once per
/// evaluation epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoricalAccuracy {
    correct: usize,
    total: usize,
}

impl CategoricalAccuracy {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the argmax predictions of a batch of logits to the running counts
    pub fn update<B: Backend>(
        &mut self,
        logits: Tensor<B, 3>,
        targets: Tensor<B, 2, Int>,
        mask_pad: Tensor<B, 2, Bool>,
    ) {
        let [batch_size, seq_length, _] = logits.dims();

        let predictions = logits
            .argmax(2)
            .reshape([batch_size * seq_length])
            .into_data()
            .convert::<i64>()
            .value;
        let targets = targets
            .reshape([batch_size * seq_length])
            .into_data()
            .convert::<i64>()
            .value;
        let padding = mask_pad.reshape([batch_size * seq_length]).into_data().value;

        for ((prediction, target), is_pad) in predictions.into_iter().zip(targets).zip(padding) {
            if is_pad {
                continue;
            }

            self.total += 1;
            if prediction == target {
                self.correct += 1;
            }
        }
    }

    /// The accuracy so far, optionally resetting the counts afterwards
    pub fn get_metric(&mut self, reset: bool) -> f64 {
        let accuracy = if self.total > 0 {
            self.correct as f64 / self.total as f64
        } else {
            0.0
        };

        if reset {
            self.reset();
        }

        accuracy
    }

    /// Clear the running counts
    pub fn reset(&mut self) {
        self.correct = 0;
        self.total = 0;
    }

    /// The number of valid positions seen since the last reset
    pub fn total(&self) -> usize {
        self.total
    }
}
