use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    data::{FieldError, Instance},
    utils::files::read_file,
};

use super::unicode_to_ascii;

/// The registration name of the reader
pub static READER: &str = "name-reader";

/// Reader configuration
#[derive(burn::config::Config, Debug, PartialEq)]
pub struct ReaderConfig {
    /// The number of names per instance
    #[config(default = 10)]
    pub chunk_size: usize,

    /// Seed for the global shuffle, drawn from OS entropy when absent
    pub seed: Option<u64>,
}

/// Reads per-category name files into labeled instances
#[derive(Debug, Clone)]
pub struct Reader {
    config: ReaderConfig,

    /// The lines read for each category during the last `read`
    category_lines: BTreeMap<String, Vec<String>>,

    /// The categories seen during the last `read`, in file order
    all_categories: Vec<String>,
}

impl Default for Reader {
    fn default() -> Self {
        Self {
            config: ReaderConfig::new(),
            category_lines: BTreeMap::new(),
            all_categories: Vec::new(),
        }
    }
}

impl Reader {
    /// Create a new reader
    pub fn new(config: ReaderConfig) -> Result<Self, ReaderError> {
        if config.chunk_size == 0 {
            return Err(ReaderError::InvalidChunkSize);
        }

        Ok(Self {
            config,
            ..Default::default()
        })
    }

    /// The categories seen during the last `read`
    pub fn categories(&self) -> &[String] {
        &self.all_categories
    }

    /// The normalized lines read for each category during the last `read`
    pub fn category_lines(&self) -> &BTreeMap<String, Vec<String>> {
        &self.category_lines
    }

    /// Expand a glob pattern of per-category files, and return a lazy sequence of instances
    /// over all of their names, shuffled together.
    ///
    /// Each call re-reads the files and re-shuffles. A pattern with no matches yields an
    /// empty sequence.
    pub async fn read(&mut self, file_path: &str) -> Result<Instances, ReaderError> {
        let mut filenames = glob::glob(file_path)?.collect::<Result<Vec<_>, _>>()?;
        filenames.sort();

        self.category_lines.clear();
        self.all_categories.clear();

        let mut name_cats = Vec::new();

        for filename in filenames {
            let category = category_from_path(&filename);
            let lines = read_lines(&filename).await?;

            debug!("Read {} names for {}", lines.len(), category);

            name_cats.extend(lines.iter().map(|line| (line.clone(), category.clone())));

            if !self.category_lines.contains_key(&category) {
                self.all_categories.push(category.clone());
            }
            self.category_lines.entry(category).or_default().extend(lines);
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        name_cats.shuffle(&mut rng);

        info!(
            "Read {} names across {} categories from {}",
            name_cats.len(),
            self.all_categories.len(),
            file_path
        );

        Ok(Instances::new(name_cats, self.config.chunk_size))
    }

    /// Wrap names as tokens, adding a per-token label field if categories are supplied
    pub fn text_to_instance(
        &self,
        names: Vec<String>,
        categories: Option<Vec<String>>,
    ) -> Result<Instance, FieldError> {
        Instance::new(names, categories)
    }
}

/// Read a file of names, one per line, normalizing each.
///
/// Only whitespace around the file's contents as a whole is stripped. Every line between
/// the first and last non-blank lines becomes a name, even when it normalizes to "".
pub async fn read_lines(filename: &Path) -> Result<Vec<String>, ReaderError> {
    let lines = read_file(filename)
        .await
        .map_err(|source| ReaderError::Io {
            path: filename.to_path_buf(),
            source,
        })?;

    let is_blank = |line: &String| line.trim().is_empty();

    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return Ok(Vec::new());
    };
    let last = lines.iter().rposition(|line| !is_blank(line)).unwrap_or(first);

    let mut contents: Vec<&str> = lines[first..=last].iter().map(String::as_str).collect();

    let end = contents.len() - 1;
    contents[0] = contents[0].trim_start();
    contents[end] = contents[end].trim_end();

    Ok(contents.into_iter().map(unicode_to_ascii).collect())
}

/// The category is the file name up to its first '.'
pub fn category_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    name.split('.').next().unwrap_or_default().to_string()
}

/// A lazy, finite sequence of instances built from consecutive chunks of shuffled pairs
#[derive(Debug)]
pub struct Instances {
    pairs: std::vec::IntoIter<(String, String)>,
    chunk_size: usize,
}

impl Instances {
    fn new(pairs: Vec<(String, String)>, chunk_size: usize) -> Self {
        Self {
            pairs: pairs.into_iter(),
            chunk_size,
        }
    }
}

impl Iterator for Instances {
    type Item = Result<Instance, FieldError>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<_> = self.pairs.by_ref().take(self.chunk_size).collect();

        if chunk.is_empty() {
            return None;
        }

        let (names, categories): (Vec<_>, Vec<_>) = chunk.into_iter().unzip();

        Some(Instance::new(names, Some(categories)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pairs.len().div_ceil(self.chunk_size);

        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Instances {}

/// Reader Error
#[derive(thiserror::Error, Debug)]
pub enum ReaderError {
    /// The glob pattern could not be parsed
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A matched path could not be inspected
    #[error("unable to expand file pattern: {0}")]
    Glob(#[from] glob::GlobError),

    /// A matched file could not be read
    #[error("unable to read {path}: {source}")]
    Io {
        /// The file being read
        path: PathBuf,

        /// The underlying error
        source: std::io::Error,
    },

    /// Instances can't be built from empty chunks
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// An instance could not be built
    #[error(transparent)]
    Field(#[from] FieldError),
}
