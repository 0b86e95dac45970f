use std::sync::Arc;

use burn::{
    config::Config as _,
    module::Module,
    record::{CompactRecorder, Recorder},
    tensor::backend::Backend,
};
use serde_json::Value;

use crate::{
    data::{FieldError, Instance, Vocabulary, VocabularyError, LABELS},
    datasets::names::Reader,
    models::rnn,
};

use super::{Batcher, Model};

/// The registration name of the predictor
pub static PREDICTOR: &str = "name-predictor";

/// Wraps a trained model to turn raw names into category labels
pub struct Predictor<B: Backend, M: Model<B>> {
    /// Builds instances from raw input
    reader: Reader,

    /// The trained sequence tagger
    model: M,

    /// Maps predicted class ids back to labels
    vocabulary: Arc<Vocabulary>,

    /// Encodes instances as tensors
    batcher: Batcher<B>,
}

impl<B: Backend, M: Model<B>> Predictor<B, M> {
    /// Create a predictor from its collaborators
    pub fn new(reader: Reader, model: M, vocabulary: Arc<Vocabulary>, device: B::Device) -> Self {
        let batcher = Batcher::new(vocabulary.clone(), device);

        Self {
            reader,
            model,
            vocabulary,
            batcher,
        }
    }

    /// Predict a category for each name in a JSON list of names
    pub fn predict_json(&self, inputs: &Value) -> Result<Vec<String>, PredictorError> {
        let names: Vec<String> = serde_json::from_value(inputs.clone())?;
        let instance = self.reader.text_to_instance(names, None)?;

        self.predict_instance(&instance)
    }

    /// Predict categories for several JSON lists of names in a single batch
    pub fn predict_batch_json(&self, inputs: &[Value]) -> Result<Vec<Vec<String>>, PredictorError> {
        let instances = inputs
            .iter()
            .map(|input| -> Result<Instance, PredictorError> {
                let names: Vec<String> = serde_json::from_value(input.clone())?;

                Ok(self.reader.text_to_instance(names, None)?)
            })
            .collect::<Result<Vec<_>, PredictorError>>()?;

        self.predict_instances(&instances)
    }

    /// Predict a category for each token of an instance
    pub fn predict_instance(&self, instance: &Instance) -> Result<Vec<String>, PredictorError> {
        let mut predictions = self.predict_instances(std::slice::from_ref(instance))?;

        Ok(predictions.pop().unwrap_or_default())
    }

    /// Predict a category for each token of each instance
    pub fn predict_instances(
        &self,
        instances: &[Instance],
    ) -> Result<Vec<Vec<String>>, PredictorError> {
        if instances.is_empty() {
            return Ok(Vec::new());
        }

        let logits = self.model.infer(self.batcher.encode(instances));
        let [batch_size, seq_length, _] = logits.dims();

        let tag_ids = logits
            .argmax(2)
            .reshape([batch_size, seq_length])
            .into_data()
            .convert::<i64>()
            .value;

        instances
            .iter()
            .zip(tag_ids.chunks(seq_length))
            .map(|(instance, ids)| {
                ids.iter()
                    .take(instance.len())
                    .map(|id| -> Result<String, PredictorError> {
                        Ok(self
                            .vocabulary
                            .get_token_from_index(*id as usize, LABELS)?
                            .to_string())
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }
}

impl<B: Backend> Predictor<B, rnn::Model<B>> {
    /// Restore a predictor from the artifacts written by training
    pub fn load(artifact_dir: &str, device: B::Device) -> anyhow::Result<Self> {
        // Load experiment configuration
        let model_config = rnn::Config::load(format!("{artifact_dir}/config.json").as_str())
            .map_err(|e| anyhow!("Unable to load config file: {}", e))?;

        let vocabulary = Vocabulary::load(format!("{artifact_dir}/vocabulary.json"))
            .map_err(|e| anyhow!("Unable to load vocabulary file: {}", e))?;

        // Load trained model weights
        let record = CompactRecorder::new()
            .load(format!("{artifact_dir}/model").into(), &device)
            .map_err(|e| anyhow!("Unable to load trained model weights: {}", e))?;

        // Create model using loaded weights
        let model = model_config.init::<B>(&device).load_record(record);

        debug!("Loaded {} from {}", rnn::MODEL, artifact_dir);

        Ok(Self::new(
            Reader::default(),
            model,
            Arc::new(vocabulary),
            device,
        ))
    }
}

/// Predictor Error
#[derive(thiserror::Error, Debug)]
pub enum PredictorError {
    /// The input was not a list of names
    #[error("expected a list of names: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// An instance could not be built from the input
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A predicted class id has no label
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}
