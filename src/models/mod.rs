/// RNN sequence tagger over word and character embeddings
pub mod rnn;
