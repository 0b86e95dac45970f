/// Tokens and the fields that wrap them
pub mod fields;

/// Instances of named fields
pub mod instance;

/// Per-namespace token/id mappings
pub mod vocabulary;

pub use fields::{FieldError, SequenceLabelField, TextField, Token};
pub use instance::{Instance, LABELS, TOKENS, TOKEN_CHARACTERS};
pub use vocabulary::{Vocabulary, VocabularyError, OOV_INDEX, PADDING_INDEX};
