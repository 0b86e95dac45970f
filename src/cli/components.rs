use std::fmt::Display;

use crate::{
    datasets::names::READER, models::rnn::MODEL, pipelines::name_classification::PREDICTOR,
};

/// The registered components, looked up by name from the CLI options
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Component {
    /// The per-category name file reader
    Reader,

    /// The RNN sequence tagger
    Classifier,

    /// The predictor wrapping a trained classifier
    Predictor,
}

impl Component {
    /// Every registered component
    pub const ALL: [Component; 3] = [
        Component::Reader,
        Component::Classifier,
        Component::Predictor,
    ];

    /// Get the unique string token that identifies this component
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Reader => READER,
            Component::Classifier => MODEL,
            Component::Predictor => PREDICTOR,
        }
    }

    /// Resolve a name, requiring that it identifies the expected kind of component
    pub fn resolve(name: &str, expected: Component) -> Result<Self, ComponentError> {
        let component = Self::try_from(name)?;

        if component != expected {
            return Err(ComponentError::WrongKind {
                name: name.to_string(),
                expected,
            });
        }

        Ok(component)
    }
}

impl TryFrom<&str> for Component {
    type Error = ComponentError;

    /// Try to convert a registration name to a Component
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let name = value.to_lowercase();

        Self::ALL
            .into_iter()
            .find(|component| component.as_str() == name)
            .ok_or_else(|| ComponentError::Unknown(value.to_string()))
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Component Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ComponentError {
    /// No component registered under the given name
    #[error("no component registered as {0}")]
    Unknown(String),

    /// The name is registered, but for a different kind of component
    #[error("{name} is not a {expected:?} component")]
    WrongKind {
        /// The name that was looked up
        name: String,

        /// The kind of component that was expected
        expected: Component,
    },
}
