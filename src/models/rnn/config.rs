use burn::{
    nn::{DropoutConfig, EmbeddingConfig, LinearConfig, LstmConfig},
    tensor::backend::Backend,
};

use super::Model;

/// The registration name of the model
pub static MODEL: &str = "name-classifier";

/// RNN sequence tagger configuration
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Number of ids in the "tokens" namespace
    pub token_vocab_size: usize,

    /// Number of ids in the "token_characters" namespace
    pub char_vocab_size: usize,

    /// Number of ids in the "labels" namespace
    pub n_classes: usize,

    /// Size of the whole-name embedding
    #[config(default = 64)]
    pub word_embedding_dim: usize,

    /// Size of each character embedding
    #[config(default = 16)]
    pub char_embedding_dim: usize,

    /// Size of the character LSTM state, which becomes the per-name character encoding
    #[config(default = 32)]
    pub char_hidden_size: usize,

    /// Size of the sequence LSTM state
    #[config(default = 128)]
    pub hidden_size: usize,

    /// Dropout applied to the sequence encoder output
    #[config(default = 0.1)]
    pub dropout: f64,
}

impl Config {
    /// The size of each token representation fed to the sequence encoder
    pub fn embedding_dim(&self) -> usize {
        self.word_embedding_dim + self.char_hidden_size
    }

    /// Initialize the model
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        Model {
            word_embedding: EmbeddingConfig::new(self.token_vocab_size, self.word_embedding_dim)
                .init(device),
            char_embedding: EmbeddingConfig::new(self.char_vocab_size, self.char_embedding_dim)
                .init(device),
            char_encoder: LstmConfig::new(self.char_embedding_dim, self.char_hidden_size, true)
                .init(device),
            encoder: LstmConfig::new(self.embedding_dim(), self.hidden_size, true).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
            hidden2tag: LinearConfig::new(self.hidden_size, self.n_classes).init(device),
            n_classes: self.n_classes,
        }
    }
}
