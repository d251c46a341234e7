use std::{fs, path::Path};

use burn::data::dataset::{transform::ShuffledDataset, Dataset as _, InMemDataset};
use derive_new::new;
use log::info;
use serde::Deserialize;

use super::{
    news::{Item, Label},
    DatasetError,
};

/// Default source of fake articles
pub static DEFAULT_FAKE: &str = "data/Fake.csv";

/// Default source of real articles
pub static DEFAULT_REAL: &str = "data/True.csv";

/// Default merged output
pub static DEFAULT_OUTPUT: &str = "data/train.csv";

/// Default shuffle seed
pub const DEFAULT_SEED: u64 = 42;

/// A row of a source file. Columns other than `text` are ignored.
#[derive(Clone, Debug, Deserialize)]
struct SourceRow {
    text: String,
}

/// Row counts of a merge
#[derive(Clone, Copy, Debug, Eq, PartialEq, new)]
pub struct Summary {
    /// Rows taken from the fake source
    pub fake: usize,

    /// Rows taken from the real source
    pub real: usize,
}

impl Summary {
    /// Total number of merged rows
    pub fn total(&self) -> usize {
        self.fake + self.real
    }
}

/// Read a source file and tag every row with the label of its provenance
pub fn tag(path: &Path, label: Label) -> Result<Vec<Item>, DatasetError> {
    let reader = csv::ReaderBuilder::new();

    let source: InMemDataset<SourceRow> =
        InMemDataset::from_csv(path, &reader).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    if source.is_empty() {
        return Err(DatasetError::Empty(path.to_path_buf()));
    }

    info!("Read {} {} rows from {}", source.len(), label, path.display());

    Ok(source
        .iter()
        .map(|row| Item::new(row.text, label))
        .collect())
}

/// Combine both sources and shuffle them deterministically with the given seed
pub fn merge(fake: &Path, real: &Path, seed: u64) -> Result<(Vec<Item>, Summary), DatasetError> {
    let fake_items = tag(fake, Label::Fake)?;
    let real_items = tag(real, Label::Real)?;

    let summary = Summary::new(fake_items.len(), real_items.len());

    let combined = InMemDataset::new(fake_items.into_iter().chain(real_items).collect());
    let shuffled: ShuffledDataset<_, Item> = ShuffledDataset::with_seed(combined, seed);

    Ok((shuffled.iter().collect(), summary))
}

/// Write items as a CSV file with `text` and `label` columns
pub fn write_csv(path: &Path, items: &[Item]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;

    for item in items {
        writer.serialize(item)?;
    }

    writer.flush()?;

    Ok(())
}

/// Merge the sources and write the result, returning the row counts
pub fn run(fake: &Path, real: &Path, output: &Path, seed: u64) -> Result<Summary, DatasetError> {
    let (items, summary) = merge(fake, real, seed)?;

    write_csv(output, &items)?;

    info!("Wrote {} rows to {}", summary.total(), output.display());

    Ok(summary)
}
