use async_trait::async_trait;
use burn::data::dataset;

use crate::{data::Instance, datasets::LoadableDataset};

use super::{Reader, ReaderConfig, ReaderError};

/// The name of the names dataset
pub static DATASET: &str = "names";

/// Struct for the names dataset
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Instances in read order
    instances: Vec<Instance>,

    /// Categories seen while reading
    categories: Vec<String>,
}

/// Implement the Dataset trait for the names dataset
impl dataset::Dataset<Instance> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Instance> {
        self.instances.get(index).cloned()
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.instances.len()
    }
}

#[async_trait]
impl LoadableDataset<Instance> for Dataset {
    type Error = ReaderError;

    /// Read every instance from the files matching the pattern
    async fn load(file_path: &str, config: &ReaderConfig) -> Result<Self, Self::Error> {
        let mut reader = Reader::new(config.clone())?;
        let instances = reader.read(file_path).await?.collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(instances, reader.categories().to_vec()))
    }
}

impl Dataset {
    /// Construct a dataset from instances that were already read
    pub fn new(instances: Vec<Instance>, categories: Vec<String>) -> Self {
        Self {
            instances,
            categories,
        }
    }

    /// The instances held by the dataset
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// The categories seen while reading
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The total number of names across every instance
    pub fn num_names(&self) -> usize {
        self.instances.iter().map(Instance::len).sum()
    }

    /// Hold out the trailing fraction of instances for validation. The instances are
    /// already shuffled, so the tail is a random sample.
    pub fn split(mut self, validation_fraction: f64) -> (Self, Self) {
        let total = self.instances.len();
        let n_valid = ((total as f64) * validation_fraction.clamp(0.0, 1.0)).round() as usize;

        // Keep at least one instance on each side when there are enough to go around
        let n_valid = if total > 1 {
            n_valid.clamp(1, total - 1)
        } else {
            n_valid.min(total)
        };

        let valid = self.instances.split_off(total - n_valid);

        (
            Self::new(self.instances, self.categories.clone()),
            Self::new(valid, self.categories),
        )
    }
}
