use burn::tensor::{activation::log_softmax, backend::Backend, Bool, Int, Tensor};

/// Cross entropy over a batch of sequences, ignoring padded positions.
///
/// The loss is averaged over the valid tokens of each sequence, and then over the
/// sequences that have at least one valid token.
pub fn sequence_cross_entropy_with_logits<B: Backend>(
    logits: Tensor<B, 3>,
    targets: Tensor<B, 2, Int>,
    mask_pad: Tensor<B, 2, Bool>,
) -> Tensor<B, 1> {
    let [batch_size, seq_length, _] = logits.dims();

    let weights = mask_pad.float().neg().add_scalar(1.0);

    let negative_log_likelihood = log_softmax(logits, 2)
        .gather(2, targets.reshape([batch_size, seq_length, 1]))
        .reshape([batch_size, seq_length])
        .neg();

    let weights_per_sequence = weights.clone().sum_dim(1);

    let per_sequence_loss = (negative_log_likelihood * weights)
        .sum_dim(1)
        .div(weights_per_sequence.clone().add_scalar(1e-13));

    let non_empty_sequences = weights_per_sequence
        .greater_elem(0.0)
        .float()
        .sum()
        .add_scalar(1e-13);

    per_sequence_loss.sum().div(non_empty_sequences)
}
