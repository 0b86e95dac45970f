use async_trait::async_trait;

/// The per-category names dataset
pub mod names;

/// A dataset which can be loaded from a file pattern
#[async_trait]
pub trait LoadableDataset<I>: burn::data::dataset::Dataset<I> {
    /// The error returned when loading fails
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the dataset from the files matching a pattern
    async fn load(file_path: &str, config: &names::ReaderConfig) -> Result<Self, Self::Error>
    where
        Self: std::marker::Sized;
}
