use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Labeled news articles
pub mod news;

/// Merging the fake and real article sources into one training set
pub mod merge;

/// A dataset which can be loaded from a file
#[async_trait]
pub trait LoadableDataset<I>: burn::data::dataset::Dataset<I> {
    /// Load the dataset
    async fn load(path: &Path) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// A CSV file could not be read or parsed
    #[error("unable to read {}: {source}", .path.display())]
    Read {
        /// The file being read
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// A source file has no rows
    #[error("{} contains no rows", .0.display())]
    Empty(PathBuf),

    /// Writing CSV output failed
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Other I/O failures
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
