use std::{fmt::Debug, sync::Arc};

use burn::{
    data::dataloader,
    tensor::{backend::Backend, Bool, Int, Tensor},
};
use derive_new::new;

use crate::{
    data::{Instance, Vocabulary, LABELS, OOV_INDEX, PADDING_INDEX, TOKENS, TOKEN_CHARACTERS},
    utils::tensors,
};

/// An inference batch for name classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Token ids as 2D tensor: [batch_size, seq_length]
    pub tokens: Tensor<B, 2, Int>,

    /// Character ids for each token as 3D tensor: [batch_size, seq_length, n_chars]
    pub token_characters: Tensor<B, 3, Int>,

    /// Padding mask for the tokens containing booleans for padding locations
    pub mask_pad: Tensor<B, 2, Bool>,
}

/// A training batch for name classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Model input
    pub input: Infer<B>,

    /// Class ids for each token: [batch_size, seq_length]
    pub targets: Tensor<B, 2, Int>,
}

/// Struct for batching name classification instances
#[derive(Clone)]
pub struct Batcher<B: Backend> {
    /// Token, character, and label ids
    pub vocabulary: Arc<Vocabulary>,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a new batcher
    pub fn new(vocabulary: Arc<Vocabulary>, device: B::Device) -> Self {
        Self { vocabulary, device }
    }

    fn index(&self, token: &str, namespace: &str) -> usize {
        self.vocabulary
            .get_token_index(token, namespace)
            .unwrap_or(OOV_INDEX)
    }

    /// Collects the token and character fields of the instances into an inference batch
    pub fn encode(&self, items: &[Instance]) -> Infer<B> {
        let batch_size = items.len();
        let seq_length = items.iter().map(Instance::len).max().unwrap_or(0).max(1);

        let mut token_ids_list = Vec::with_capacity(batch_size);
        let mut char_ids_list = Vec::with_capacity(batch_size);

        for item in items {
            let token_ids: Vec<_> = item
                .tokens
                .texts()
                .map(|text| self.index(text, TOKENS))
                .collect();

            let char_ids: Vec<Vec<_>> = item
                .token_characters
                .texts()
                .map(|text| {
                    let mut buf = [0u8; 4];

                    text.chars()
                        .map(|c| self.index(c.encode_utf8(&mut buf), TOKEN_CHARACTERS))
                        .collect()
                })
                .collect();

            token_ids_list.push(token_ids);
            char_ids_list.push(char_ids);
        }

        let n_chars = char_ids_list
            .iter()
            .flatten()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(1);

        let tokens = tensors::pad_to::<B>(PADDING_INDEX, token_ids_list, seq_length, &self.device);
        let token_characters = tensors::pad_nested_to::<B>(
            PADDING_INDEX,
            char_ids_list,
            seq_length,
            n_chars,
            &self.device,
        );

        let mask_pad = tokens.clone().equal_elem(PADDING_INDEX as i64);

        Infer {
            tokens,
            token_characters,
            mask_pad,
        }
    }

    /// Collects the label fields of the instances, padded to the given sequence length
    pub fn targets(&self, items: &[Instance], seq_length: usize) -> Tensor<B, 2, Int> {
        let class_ids_list = items
            .iter()
            .map(|item| {
                item.labels
                    .iter()
                    .flat_map(|field| field.labels())
                    .map(|label| {
                        self.vocabulary
                            .get_token_index(label, LABELS)
                            .unwrap_or_else(|err| {
                                warn!("{}, using class 0", err);
                                0
                            })
                    })
                    .collect()
            })
            .collect();

        tensors::pad_to::<B>(0, class_ids_list, seq_length, &self.device)
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend> dataloader::batcher::Batcher<Instance, Train<B>> for Batcher<B> {
    /// Collects a vector of labeled instances into a training batch
    fn batch(&self, items: Vec<Instance>) -> Train<B> {
        let input = self.encode(&items);
        let [_, seq_length] = input.tokens.dims();

        let targets = self.targets(&items, seq_length);

        Train { input, targets }
    }
}

#[cfg(test)]
mod tests {
    use burn::{backend::NdArray, data::dataloader::batcher::Batcher as _};
    use pretty_assertions::assert_eq;

    use super::*;

    type TestBackend = NdArray;

    fn instances() -> Vec<Instance> {
        vec![
            Instance::new(
                vec!["Abe".into(), "Bo".into()],
                Some(vec!["Japanese".into(), "Korean".into()]),
            )
            .unwrap(),
            Instance::new(vec!["Abel".into()], Some(vec!["Japanese".into()])).unwrap(),
        ]
    }

    #[test]
    fn test_batch_shapes_and_padding() {
        let items = instances();
        let vocabulary = Arc::new(Vocabulary::from_instances(&items));
        let batcher = Batcher::<TestBackend>::new(vocabulary, Default::default());

        let batch = batcher.batch(items);

        assert_eq!(batch.input.tokens.dims(), [2, 2]);
        assert_eq!(batch.input.token_characters.dims(), [2, 2, 4]);
        assert_eq!(batch.targets.dims(), [2, 2]);
        assert_eq!(
            batch.input.mask_pad.into_data().value,
            vec![false, false, false, true]
        );

        // Japanese is the more frequent label, so it takes id 0
        assert_eq!(
            batch.targets.into_data().convert::<i64>().value,
            vec![0, 1, 0, 0]
        );

        let chars = batch.input.token_characters.into_data().convert::<i64>().value;
        // "Bo" is padded to four characters, and the missing second token is all padding
        assert_eq!(&chars[6..8], &[0, 0]);
        assert_eq!(&chars[12..16], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_unknown_tokens_use_oov() {
        let vocabulary = Arc::new(Vocabulary::from_instances(&instances()));
        let batcher = Batcher::<TestBackend>::new(vocabulary, Default::default());

        let unlabeled = Instance::new(vec!["Zed".into()], None).unwrap();
        let input = batcher.encode(&[unlabeled]);

        assert_eq!(input.tokens.into_data().convert::<i64>().value, vec![OOV_INDEX as i64]);
        assert_eq!(
            input.token_characters.into_data().convert::<i64>().value[0],
            OOV_INDEX as i64
        );
    }

    #[test]
    fn test_empty_instance_still_has_one_position() {
        let vocabulary = Arc::new(Vocabulary::from_instances(&instances()));
        let batcher = Batcher::<TestBackend>::new(vocabulary, Default::default());

        let input = batcher.encode(&[Instance::new(vec![], None).unwrap()]);

        assert_eq!(input.tokens.dims(), [1, 1]);
        assert_eq!(input.token_characters.dims(), [1, 1, 1]);
        assert_eq!(input.mask_pad.into_data().value, vec![true]);
    }
}
