use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::utils::classes::invert_map;

use super::{Instance, LABELS, TOKENS, TOKEN_CHARACTERS};

/// The id reserved for padding in padded namespaces
pub const PADDING_INDEX: usize = 0;

/// The id reserved for out-of-vocabulary entries in padded namespaces
pub const OOV_INDEX: usize = 1;

/// The padding token text
pub static PADDING_TOKEN: &str = "@@PADDING@@";

/// The out-of-vocabulary token text
pub static OOV_TOKEN: &str = "@@UNKNOWN@@";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Namespace {
    padded: bool,
    id2token: Vec<String>,
    token2id: HashMap<String, usize>,
}

impl Namespace {
    fn from_counts(counts: HashMap<String, usize>, padded: bool) -> Self {
        let mut counted: Vec<(String, usize)> = counts.into_iter().collect();

        // Most frequent first, ties broken lexically so ids are stable across runs
        counted.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));

        let mut id2token = Vec::with_capacity(counted.len() + 2);
        if padded {
            id2token.push(PADDING_TOKEN.to_string());
            id2token.push(OOV_TOKEN.to_string());
        }
        id2token.extend(counted.into_iter().map(|(token, _)| token));

        let token2id = invert_map(id2token.iter().cloned().enumerate());

        Self {
            padded,
            id2token,
            token2id,
        }
    }
}

/// Token/id mappings for each field namespace
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    namespaces: BTreeMap<String, Namespace>,
}

impl Vocabulary {
    /// Count every token, character, and label in the given instances
    pub fn from_instances<'a>(instances: impl IntoIterator<Item = &'a Instance>) -> Self {
        let mut tokens: HashMap<String, usize> = HashMap::new();
        let mut characters: HashMap<String, usize> = HashMap::new();
        let mut labels: HashMap<String, usize> = HashMap::new();

        for instance in instances {
            for text in instance.tokens.texts() {
                *tokens.entry(text.to_string()).or_default() += 1;
            }

            for text in instance.token_characters.texts() {
                for c in text.chars() {
                    *characters.entry(c.to_string()).or_default() += 1;
                }
            }

            if let Some(field) = &instance.labels {
                for label in field.labels() {
                    *labels.entry(label.clone()).or_default() += 1;
                }
            }
        }

        let namespaces = BTreeMap::from([
            (TOKENS.to_string(), Namespace::from_counts(tokens, true)),
            (
                TOKEN_CHARACTERS.to_string(),
                Namespace::from_counts(characters, true),
            ),
            (LABELS.to_string(), Namespace::from_counts(labels, false)),
        ]);

        Self { namespaces }
    }

    fn namespace(&self, namespace: &str) -> Result<&Namespace, VocabularyError> {
        self.namespaces
            .get(namespace)
            .ok_or_else(|| VocabularyError::UnknownNamespace(namespace.to_string()))
    }

    /// The number of ids in a namespace, including padding and OOV where reserved
    pub fn get_vocab_size(&self, namespace: &str) -> usize {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.id2token.len())
            .unwrap_or(0)
    }

    /// Look up the id for a token. Padded namespaces fall back to the OOV id.
    pub fn get_token_index(&self, token: &str, namespace: &str) -> Result<usize, VocabularyError> {
        let ns = self.namespace(namespace)?;

        match ns.token2id.get(token) {
            Some(index) => Ok(*index),
            None if ns.padded => Ok(OOV_INDEX),
            None => Err(VocabularyError::UnknownToken {
                token: token.to_string(),
                namespace: namespace.to_string(),
            }),
        }
    }

    /// Look up the token for an id
    pub fn get_token_from_index(&self, index: usize, namespace: &str) -> Result<&str, VocabularyError> {
        self.namespace(namespace)?
            .id2token
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| VocabularyError::IndexOutOfRange {
                index,
                namespace: namespace.to_string(),
            })
    }

    /// All tokens in a namespace, ordered by id
    pub fn get_index_to_token(&self, namespace: &str) -> Result<&[String], VocabularyError> {
        Ok(&self.namespace(namespace)?.id2token)
    }

    /// Save the vocabulary as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), VocabularyError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;

        Ok(())
    }

    /// Load a vocabulary previously written with `save`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let file = File::open(path)?;

        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Vocabulary Error
#[derive(thiserror::Error, Debug)]
pub enum VocabularyError {
    /// No namespace with the given name
    #[error("no vocabulary namespace named {0}")]
    UnknownNamespace(String),

    /// The token is missing from an unpadded namespace
    #[error("token {token:?} not found in namespace {namespace}")]
    UnknownToken {
        /// The token that was looked up
        token: String,

        /// The namespace it was looked up in
        namespace: String,
    },

    /// The id is past the end of the namespace
    #[error("index {index} is out of range for namespace {namespace}")]
    IndexOutOfRange {
        /// The id that was looked up
        index: usize,

        /// The namespace it was looked up in
        namespace: String,
    },

    /// Unable to read or write the vocabulary file
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unable to encode or decode the vocabulary file
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn instances() -> Vec<Instance> {
        vec![
            Instance::new(
                vec!["Dubois".into(), "Muller".into()],
                Some(vec!["French".into(), "German".into()]),
            )
            .unwrap(),
            Instance::new(vec!["Rossi".into()], Some(vec!["German".into()])).unwrap(),
        ]
    }

    #[test]
    fn test_padded_namespaces_reserve_ids() {
        let vocab = Vocabulary::from_instances(&instances());

        assert_eq!(vocab.get_vocab_size(TOKENS), 5);
        assert_eq!(vocab.get_token_from_index(PADDING_INDEX, TOKENS).unwrap(), PADDING_TOKEN);
        assert_eq!(vocab.get_token_from_index(OOV_INDEX, TOKENS).unwrap(), OOV_TOKEN);
        assert_eq!(vocab.get_token_index("Garcia", TOKENS).unwrap(), OOV_INDEX);
        assert_eq!(vocab.get_token_index("z", TOKEN_CHARACTERS).unwrap(), OOV_INDEX);
    }

    #[test]
    fn test_labels_are_unpadded_and_ordered_by_count() {
        let vocab = Vocabulary::from_instances(&instances());

        assert_eq!(
            vocab.get_index_to_token(LABELS).unwrap(),
            &["German".to_string(), "French".to_string()]
        );
        assert!(matches!(
            vocab.get_token_index("Spanish", LABELS),
            Err(VocabularyError::UnknownToken { .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.json");
        let vocab = Vocabulary::from_instances(&instances());

        vocab.save(&path).unwrap();

        assert_eq!(Vocabulary::load(&path).unwrap(), vocab);
    }
}
