use burn::{
    module::Module,
    nn::{Dropout, Embedding, Linear, Lstm},
    tensor::{backend::Backend, Int, Tensor},
};

use crate::pipelines::name_classification::{
    self,
    batcher::{Infer, Train},
    sequence_cross_entropy_with_logits, Output,
};

/// RNN sequence tagger over names, with word and character level embeddings
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Embedding for whole names
    pub word_embedding: Embedding<B>,

    /// Embedding for the characters of each name
    pub char_embedding: Embedding<B>,

    /// Encodes each name's characters into a single vector
    pub char_encoder: Lstm<B>,

    /// Sequence encoder over the names of an instance
    pub encoder: Lstm<B>,

    /// Dropout on the sequence encoder output
    pub dropout: Dropout,

    /// Linear layer projecting each timestep to class logits
    pub hidden2tag: Linear<B>,

    /// Total number of classes
    pub n_classes: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Encode each name's characters as the last valid hidden state of the character LSTM
    fn encode_characters(&self, characters: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [n_tokens, _] = characters.dims();

        let embedded = self.char_embedding.forward(characters.clone());
        let (_, hidden_states) = self.char_encoder.forward(embedded, None);
        let [_, _, d_hidden] = hidden_states.dims();

        // Index of the last non-padding character, or 0 for empty names
        let last = characters
            .greater_elem(0)
            .int()
            .sum_dim(1)
            .sub_scalar(1)
            .clamp_min(0)
            .reshape([n_tokens, 1, 1])
            .repeat(2, d_hidden);

        hidden_states.gather(1, last).reshape([n_tokens, d_hidden])
    }

    /// Concatenate word and character representations for every token
    fn embed(&self, tokens: Tensor<B, 2, Int>, token_characters: Tensor<B, 3, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_length] = tokens.dims();
        let [_, _, n_chars] = token_characters.dims();

        let words = self.word_embedding.forward(tokens);

        let characters =
            self.encode_characters(token_characters.reshape([batch_size * seq_length, n_chars]));
        let [_, d_chars] = characters.dims();
        let characters = characters.reshape([batch_size, seq_length, d_chars]);

        Tensor::cat(vec![words, characters], 2)
    }

    /// Defines forward pass for inference
    pub fn infer(&self, input: Infer<B>) -> Tensor<B, 3> {
        let embeddings = self.embed(input.tokens, input.token_characters);

        // Padding always trails the valid names, so a forward LSTM never mixes it into
        // the states of valid positions
        let (_, encoded) = self.encoder.forward(embeddings, None);
        let encoded = self.dropout.forward(encoded);

        self.hidden2tag.forward(encoded)
    }

    /// Defines forward pass for training
    pub fn forward(&self, item: Train<B>) -> Output<B> {
        let mask_pad = item.input.mask_pad.clone();
        let logits = self.infer(item.input);

        let loss =
            sequence_cross_entropy_with_logits(logits.clone(), item.targets.clone(), mask_pad.clone());

        Output::new(loss, logits, item.targets, mask_pad)
    }
}

impl<B: Backend> name_classification::Model<B> for Model<B> {
    fn forward(&self, item: Train<B>) -> Output<B> {
        Model::forward(self, item)
    }

    fn infer(&self, input: Infer<B>) -> Tensor<B, 3> {
        Model::infer(self, input)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use burn::{backend::NdArray, data::dataloader::batcher::Batcher as _};
    use pretty_assertions::assert_eq;

    use crate::{
        data::{Instance, Vocabulary, LABELS, TOKENS, TOKEN_CHARACTERS},
        models::rnn::Config,
        pipelines::name_classification::Batcher,
    };

    type TestBackend = NdArray;

    #[test]
    fn test_forward_shapes() {
        let device = Default::default();
        let instances = vec![
            Instance::new(
                vec!["Dubois".into(), "Muller".into(), "Rossi".into()],
                Some(vec!["French".into(), "German".into(), "Italian".into()]),
            )
            .unwrap(),
            Instance::new(vec!["".into()], Some(vec!["French".into()])).unwrap(),
        ];
        let vocabulary = Vocabulary::from_instances(&instances);

        let model = Config::new(
            vocabulary.get_vocab_size(TOKENS),
            vocabulary.get_vocab_size(TOKEN_CHARACTERS),
            vocabulary.get_vocab_size(LABELS),
        )
        .with_hidden_size(8)
        .with_char_hidden_size(4)
        .init::<TestBackend>(&device);

        let batcher = Batcher::<TestBackend>::new(Arc::new(vocabulary), device);
        let output = model.forward(batcher.batch(instances));

        assert_eq!(output.output.dims(), [2, 3, 3]);
        assert_eq!(output.targets.dims(), [2, 3]);
        assert_eq!(output.loss.dims(), [1]);
        assert!(output.loss.into_scalar().is_finite());
    }
}
