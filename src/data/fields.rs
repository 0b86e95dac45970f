use derive_new::new;
use serde::{Deserialize, Serialize};

/// A single input unit, which for this task is a whole name
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Token {
    /// The raw text of the token
    pub text: String,
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// A sequence of tokens, indexed either as whole tokens or as characters
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct TextField {
    /// The wrapped tokens
    pub tokens: Vec<Token>,
}

impl TextField {
    /// The number of tokens in the field
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the field holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the token texts
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|token| token.text.as_str())
    }
}

/// One label per token of a sequence field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceLabelField {
    labels: Vec<String>,
}

impl SequenceLabelField {
    /// Attach labels to a sequence field, failing if they are not aligned with its tokens
    pub fn new(labels: Vec<String>, sequence_field: &TextField) -> Result<Self, FieldError> {
        if labels.len() != sequence_field.len() {
            return Err(FieldError::LengthMismatch {
                labels: labels.len(),
                tokens: sequence_field.len(),
            });
        }

        Ok(Self { labels })
    }

    /// The labels, positionally aligned with the sequence field's tokens
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if there are no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Field Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// The label sequence does not line up with the token sequence
    #[error("{labels} labels given for a sequence of {tokens} tokens")]
    LengthMismatch {
        /// Number of labels supplied
        labels: usize,

        /// Number of tokens in the sequence field
        tokens: usize,
    },
}
