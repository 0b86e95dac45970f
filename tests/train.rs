use std::fs;

use burn::backend::{Autodiff, NdArray};
use burn_names::{
    datasets::names::{Reader, ReaderConfig},
    models::rnn,
    pipelines::name_classification::{training, Predictor},
};
use pretty_assertions::assert_eq;
use serde_json::json;

type TestBackend = NdArray;

#[tokio::test]
async fn test_train_then_predict_round_trip() {
    let data = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();

    fs::write(
        data.path().join("French.txt"),
        "Dubois\nLefèvre\nMoreau\nLaurent\nGirard\nBonnet\n",
    )
    .unwrap();
    fs::write(
        data.path().join("German.txt"),
        "Müller\nSchmidt\nSchneider\nFischer\nWeber\nBecker\n",
    )
    .unwrap();

    let pattern = format!("{}/*.txt", data.path().display());
    let artifact_dir = artifacts.path().display().to_string();

    let config = training::Config::new(
        pattern.clone(),
        ReaderConfig::new().with_chunk_size(3).with_seed(Some(11)),
    )
    .with_num_epochs(1)
    .with_batch_size(2)
    .with_hidden_size(8)
    .with_char_hidden_size(4)
    .with_word_embedding_dim(8)
    .with_artifact_dir(artifact_dir.clone())
    .with_use_tui(false);

    training::train::<Autodiff<TestBackend>>(Default::default(), config)
        .await
        .unwrap();

    for file in ["config.json", "training.json", "vocabulary.json", "model.mpk"] {
        assert!(artifacts.path().join(file).exists(), "missing {}", file);
    }

    let predictor =
        Predictor::<TestBackend, rnn::Model<TestBackend>>::load(&artifact_dir, Default::default())
            .unwrap();

    // Names produced by the reader go back through the predictor, one label each
    let mut reader = Reader::new(ReaderConfig::new().with_seed(Some(11))).unwrap();
    for instance in reader.read(&pattern).await.unwrap() {
        let names: Vec<String> = instance
            .unwrap()
            .tokens
            .texts()
            .map(str::to_string)
            .collect();

        let labels = predictor.predict_json(&json!(names)).unwrap();

        assert_eq!(labels.len(), names.len());
        assert!(labels
            .iter()
            .all(|label| label == "French" || label == "German"));
    }
}
