use std::sync::Arc;

use burn::{
    config::Config as _,
    data::{
        dataloader::{batcher::Batcher as _, DataLoaderBuilder},
        dataset::Dataset as _,
    },
    module::{AutodiffModule, Module},
    optim::AdamWConfig,
    record::{CompactRecorder, Recorder},
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion,
    },
    train::{
        metric::{AccuracyMetric, LossMetric},
        LearnerBuilder,
    },
    LearningRate,
};

use crate::{
    data::{Instance, Vocabulary, LABELS, TOKENS, TOKEN_CHARACTERS},
    datasets::{
        names::{self, ReaderConfig},
        LoadableDataset,
    },
    models::rnn,
    utils::renderer,
};

use super::{Batcher, CategoricalAccuracy, Model, PIPELINE};

/// Define configuration struct for the experiment
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Glob pattern of per-category training files
    pub train_data_path: String,

    /// Glob pattern of per-category validation files. When absent, a fraction of the
    /// training instances is held out instead.
    pub validation_data_path: Option<String>,

    /// Fraction of training instances held out for validation
    #[config(default = 0.1)]
    pub validation_split: f64,

    /// Reader configuration
    pub reader: ReaderConfig,

    /// Batch size, counted in instances
    #[config(default = 32)]
    pub batch_size: usize,

    /// Number of epochs
    #[config(default = 10)]
    pub num_epochs: usize,

    /// Adam epsilon
    #[config(default = 1e-8)]
    pub adam_epsilon: f32,

    /// Initial learning rate
    #[config(default = 1e-3)]
    pub learning_rate: LearningRate,

    /// Size of the whole-name embedding
    #[config(default = 64)]
    pub word_embedding_dim: usize,

    /// Size of each character embedding
    #[config(default = 16)]
    pub char_embedding_dim: usize,

    /// Size of the per-name character encoding
    #[config(default = 32)]
    pub char_hidden_size: usize,

    /// Size of the sequence LSTM state
    #[config(default = 128)]
    pub hidden_size: usize,

    /// Dropout rate
    #[config(default = 0.1)]
    pub dropout: f64,

    /// Directory to save the model, config, and vocabulary files
    #[config(default = "\"data/model\".to_string()")]
    pub artifact_dir: String,

    /// Render training progress with the TUI rather than the log
    #[config(default = true)]
    pub use_tui: bool,
}

impl Config {
    /// Build the model configuration for a vocabulary
    pub fn model_config(&self, vocabulary: &Vocabulary) -> rnn::Config {
        rnn::Config::new(
            vocabulary.get_vocab_size(TOKENS),
            vocabulary.get_vocab_size(TOKEN_CHARACTERS),
            vocabulary.get_vocab_size(LABELS),
        )
        .with_word_embedding_dim(self.word_embedding_dim)
        .with_char_embedding_dim(self.char_embedding_dim)
        .with_char_hidden_size(self.char_hidden_size)
        .with_hidden_size(self.hidden_size)
        .with_dropout(self.dropout)
    }
}

/// Define train function
pub async fn train<B: AutodiffBackend>(
    device: B::Device, // Device on which to perform computation (e.g., CPU or CUDA device)
    config: Config,    // Experiment configuration
) -> anyhow::Result<()> {
    let artifact_dir = config.artifact_dir.clone();
    tokio::fs::create_dir_all(&artifact_dir).await?;

    if let Some(seed) = config.reader.seed {
        B::seed(seed);
    }

    info!(
        "Training {} on the {} dataset from {}",
        PIPELINE,
        names::DATASET,
        config.train_data_path
    );

    let dataset = names::Dataset::load(&config.train_data_path, &config.reader).await?;
    info!("Categories: {}", dataset.categories().join(", "));

    let (dataset_train, dataset_valid) = match &config.validation_data_path {
        Some(path) => (dataset, names::Dataset::load(path, &config.reader).await?),
        None => dataset.split(config.validation_split),
    };

    if dataset_train.is_empty() {
        return Err(anyhow!(
            "No training instances found for {}",
            config.train_data_path
        ));
    }

    info!(
        "Training on {} names, validating on {} names",
        dataset_train.num_names(),
        dataset_valid.num_names()
    );

    let vocabulary = Vocabulary::from_instances(
        dataset_train
            .instances()
            .iter()
            .chain(dataset_valid.instances()),
    );

    let n_classes = vocabulary.get_vocab_size(LABELS);
    if n_classes == 0 {
        return Err(anyhow!("Classes are not defined in the vocabulary"));
    }

    let model_config = config.model_config(&vocabulary);
    let model = model_config.init::<B>(&device);

    let vocabulary = Arc::new(vocabulary);

    // Initialize batchers for training and validation data
    let batcher_train = Batcher::<B>::new(vocabulary.clone(), device.clone());
    let batcher_valid = Batcher::<B::InnerBackend>::new(vocabulary.clone(), device.clone());

    let workers = std::thread::available_parallelism()?;
    let shuffle_seed = config.reader.seed.unwrap_or_else(rand::random);

    // Initialize data loaders for training and validation data
    let dataloader_train = DataLoaderBuilder::new(batcher_train)
        .batch_size(config.batch_size)
        .shuffle(shuffle_seed)
        .num_workers(workers.into())
        .build(dataset_train);

    let dataloader_valid = DataLoaderBuilder::new(batcher_valid.clone())
        .batch_size(config.batch_size)
        .num_workers(workers.into())
        .build(dataset_valid.clone());

    // Initialize optimizer
    let optimizer = AdamWConfig::new().with_epsilon(config.adam_epsilon).init();

    // Initialize learner
    let mut builder = LearnerBuilder::new(&artifact_dir)
        .metric_train_numeric(AccuracyMetric::new().with_pad_token(n_classes))
        .metric_valid_numeric(AccuracyMetric::new().with_pad_token(n_classes))
        .metric_train_numeric(LossMetric::new())
        .metric_valid_numeric(LossMetric::new())
        .with_file_checkpointer(CompactRecorder::new())
        .devices(vec![device.clone()])
        .num_epochs(config.num_epochs)
        .summary();

    if !config.use_tui {
        builder = builder.renderer(renderer::Log::new());
    }

    let learner = builder.build(model, optimizer, config.learning_rate);

    // Train the model
    let model_trained = learner.fit(dataloader_train, dataloader_valid);

    // Evaluate with a fresh accumulator, so the reported accuracy covers exactly one pass
    let mut accuracy = CategoricalAccuracy::new();
    let loss = evaluate(
        &model_trained.valid(),
        &batcher_valid,
        dataset_valid.instances(),
        config.batch_size,
        &mut accuracy,
    );
    info!(
        "Validation loss: {:.4}, accuracy: {:.4}",
        loss,
        accuracy.get_metric(true)
    );

    // Save the configuration, the vocabulary, and the trained model
    config.save(format!("{artifact_dir}/training.json"))?;
    model_config.save(format!("{artifact_dir}/config.json"))?;
    vocabulary.save(format!("{artifact_dir}/vocabulary.json"))?;

    CompactRecorder::new()
        .record(
            model_trained.into_record(),
            format!("{artifact_dir}/model").into(),
        )
        .map_err(|e| anyhow!("Unable to save trained model weights: {}", e))?;

    info!("Saved model artifacts to {}", artifact_dir);

    Ok(())
}

/// Run the model over instances in batches, returning the mean loss. Accuracy is added to
/// the caller's accumulator, which is not reset here.
pub fn evaluate<B: Backend, M: Model<B>>(
    model: &M,
    batcher: &Batcher<B>,
    instances: &[Instance],
    batch_size: usize,
    accuracy: &mut CategoricalAccuracy,
) -> f64 {
    let mut total_loss = 0.0;
    let mut n_batches = 0;

    for chunk in instances.chunks(batch_size.max(1)) {
        let output = model.forward(batcher.batch(chunk.to_vec()));

        accuracy.update(output.output, output.targets, output.mask_pad);
        total_loss += output.loss.into_scalar().elem::<f64>();
        n_batches += 1;
    }

    if n_batches == 0 {
        return 0.0;
    }

    total_loss / n_batches as f64
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;

    use super::*;

    type TestBackend = NdArray;

    fn instances() -> Vec<Instance> {
        vec![
            Instance::new(
                vec!["Dubois".into(), "Muller".into(), "Rossi".into()],
                Some(vec!["French".into(), "German".into(), "Italian".into()]),
            )
            .unwrap(),
            Instance::new(vec!["Lefebvre".into()], Some(vec!["French".into()])).unwrap(),
            Instance::new(vec!["Schmidt".into()], Some(vec!["German".into()])).unwrap(),
        ]
    }

    #[test]
    fn test_model_config_uses_vocabulary_sizes() {
        let vocabulary = Vocabulary::from_instances(&instances());
        let config = Config::new("data/*.txt".into(), ReaderConfig::new()).with_hidden_size(16);

        let model_config = config.model_config(&vocabulary);

        assert_eq!(model_config.token_vocab_size, 7);
        assert_eq!(model_config.n_classes, 3);
        assert_eq!(model_config.hidden_size, 16);
    }

    #[test]
    fn test_evaluate_counts_every_name() {
        let device = Default::default();
        let items = instances();
        let vocabulary = Vocabulary::from_instances(&items);
        let config = Config::new("data/*.txt".into(), ReaderConfig::new())
            .with_hidden_size(8)
            .with_char_hidden_size(4);

        let model = config.model_config(&vocabulary).init::<TestBackend>(&device);
        let batcher = Batcher::<TestBackend>::new(Arc::new(vocabulary), device);

        let mut accuracy = CategoricalAccuracy::new();
        let loss = evaluate(&model, &batcher, &items, 2, &mut accuracy);

        assert!(loss.is_finite() && loss > 0.0);
        assert_eq!(accuracy.total(), 5);
    }
}
