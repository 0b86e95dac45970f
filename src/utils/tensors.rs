use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

/// Generate a `[batch_size, seq_length]` tensor of ids, padding each row to the given length
pub fn pad_to<B: Backend>(
    pad_token: usize,
    tokens_list: Vec<Vec<usize>>,
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = tokens_list.len();

    let mut values = Vec::with_capacity(batch_size * seq_length);
    for tokens in tokens_list {
        let padding = seq_length.saturating_sub(tokens.len());

        values.extend(tokens.into_iter().take(seq_length));
        values.extend(std::iter::repeat(pad_token).take(padding));
    }

    let data: Data<B::IntElem, 2> = Data::new(
        values.into_iter().map(|e| (e as i64).elem()).collect(),
        Shape::new([batch_size, seq_length]),
    );

    Tensor::from_data(data, device)
}

/// Generate a `[batch_size, seq_length, n_chars]` tensor of character ids, padding both the
/// sequence of tokens and each token's characters
pub fn pad_nested_to<B: Backend>(
    pad_token: usize,
    chars_list: Vec<Vec<Vec<usize>>>,
    seq_length: usize,
    n_chars: usize,
    device: &B::Device,
) -> Tensor<B, 3, Int> {
    let batch_size = chars_list.len();

    let mut values = Vec::with_capacity(batch_size * seq_length * n_chars);
    for tokens in chars_list {
        let padding = seq_length.saturating_sub(tokens.len());

        for chars in tokens.into_iter().take(seq_length) {
            let char_padding = n_chars.saturating_sub(chars.len());

            values.extend(chars.into_iter().take(n_chars));
            values.extend(std::iter::repeat(pad_token).take(char_padding));
        }

        values.extend(std::iter::repeat(pad_token).take(padding * n_chars));
    }

    let data: Data<B::IntElem, 3> = Data::new(
        values.into_iter().map(|e| (e as i64).elem()).collect(),
        Shape::new([batch_size, seq_length, n_chars]),
    );

    Tensor::from_data(data, device)
}
