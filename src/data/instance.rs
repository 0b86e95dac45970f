use serde::{Deserialize, Serialize};

use super::{FieldError, SequenceLabelField, TextField, Token};

/// Field name (and vocabulary namespace) for whole-token ids
pub static TOKENS: &str = "tokens";

/// Field name (and vocabulary namespace) for character ids
pub static TOKEN_CHARACTERS: &str = "token_characters";

/// Field name (and vocabulary namespace) for category labels
pub static LABELS: &str = "labels";

/// A bundle of named fields describing one chunk of names
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// The names, indexed as whole tokens
    pub tokens: TextField,

    /// The same names, indexed as characters
    pub token_characters: TextField,

    /// One category per name, absent at inference time
    pub labels: Option<SequenceLabelField>,
}

impl Instance {
    /// Wrap each name as a token, and attach per-token labels if categories are supplied
    pub fn new(names: Vec<String>, categories: Option<Vec<String>>) -> Result<Self, FieldError> {
        let tokens = TextField::new(names.into_iter().map(Token::from).collect());
        let token_characters = tokens.clone();

        let labels = categories
            .map(|categories| SequenceLabelField::new(categories, &tokens))
            .transpose()?;

        Ok(Self {
            tokens,
            token_characters,
            labels,
        })
    }

    /// The number of names in the instance
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the instance holds no names
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The names of the fields present on this instance
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec![TOKENS, TOKEN_CHARACTERS];

        if self.labels.is_some() {
            names.push(LABELS);
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_unlabeled_instance_has_no_label_field() {
        let instance = Instance::new(vec!["Dubois".into()], None).unwrap();

        assert_eq!(instance.field_names(), vec![TOKENS, TOKEN_CHARACTERS]);
        assert!(instance.labels.is_none());
    }

    #[test]
    fn test_token_characters_share_tokens() {
        let instance = Instance::new(
            vec!["Dubois".into(), "Muller".into()],
            Some(vec!["French".into(), "German".into()]),
        )
        .unwrap();

        assert_eq!(instance.tokens, instance.token_characters);
        assert_eq!(instance.field_names(), vec![TOKENS, TOKEN_CHARACTERS, LABELS]);
    }
}
