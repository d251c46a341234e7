use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

/// A fitted object that is persisted as a JSON file inside an artifact directory
pub trait Artifact: Serialize + DeserializeOwned {
    /// The file name used within the artifact directory
    const FILE_NAME: &'static str;

    /// The full path of this artifact within the given directory
    fn path(dir: &Path) -> PathBuf {
        dir.join(Self::FILE_NAME)
    }

    /// Write the artifact into the given directory, returning the file path
    fn save(&self, dir: &Path) -> Result<PathBuf, ArtifactError> {
        let path = Self::path(dir);

        let file = File::create(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, self).map_err(|source| ArtifactError::Json {
            path: path.clone(),
            source,
        })?;

        writer.flush().map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Read the artifact back from the given directory
    fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let path = Self::path(dir);

        let file = File::open(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ArtifactError::Json { path, source })
    }
}

/// Artifact Error
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    /// The artifact file could not be read or written
    #[error("unable to access {}: {source}", .path.display())]
    Io {
        /// The artifact path
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The artifact file could not be encoded or decoded
    #[error("unable to decode {}: {source}", .path.display())]
    Json {
        /// The artifact path
        path: PathBuf,
        /// The underlying JSON error
        source: serde_json::Error,
    },

    /// The artifacts decoded but do not belong together
    #[error("inconsistent artifacts in {}: {source}", .dir.display())]
    Inconsistent {
        /// The artifact directory
        dir: PathBuf,
        /// The reason the bundle was rejected
        source: super::ModelError,
    },
}
