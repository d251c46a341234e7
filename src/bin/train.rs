//! Command line tool to train the fake news classifier

use std::path::PathBuf;

use pico_args::Arguments;
use truthlens::{
    datasets::{news, LoadableDataset},
    pipelines::text_classification::{self, Config},
};

const HELP: &str = "\
Usage: train [OPTIONS]

Options:
  -h, --help           Print help
  -d, --data           The merged training CSV (defaults to 'data/train.csv')
  -a, --artifact-dir   Where to write the fitted artifacts (defaults to 'models')
  --max-features       Maximum vocabulary size (defaults to 50000)
  --max-iter           Maximum number of training epochs (defaults to 1000)
  --test-size          Fraction of each class held out for evaluation (defaults to 0.2)
  -s, --seed           Seed for the train/test split (defaults to 42)
";

#[derive(Debug)]
struct Args {
    data: Option<String>,
    artifact_dir: Option<String>,
    max_features: Option<usize>,
    max_iter: Option<usize>,
    test_size: Option<f64>,
    seed: Option<u64>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            data: pargs.opt_value_from_str(["-d", "--data"])?,
            artifact_dir: pargs.opt_value_from_str(["-a", "--artifact-dir"])?,
            max_features: pargs.opt_value_from_str("--max-features")?,
            max_iter: pargs.opt_value_from_str("--max-iter")?,
            test_size: pargs.opt_value_from_str("--test-size")?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
        };

        Ok(Some(args))
    }

    /// Apply the command line overrides to the default configuration
    fn config(&self) -> Config {
        let mut config = Config::new();

        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }

        if let Some(artifact_dir) = &self.artifact_dir {
            config.artifact_dir = artifact_dir.clone();
        }

        if let Some(max_features) = self.max_features {
            config.vectorizer.max_features = max_features;
        }

        if let Some(max_iter) = self.max_iter {
            config.classifier.max_iter = max_iter;
        }

        if let Some(test_size) = self.test_size {
            config.test_size = test_size;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.config();

    let dataset = news::Dataset::load(&PathBuf::from(&config.data_path)).await?;

    let output = text_classification::train(dataset, &config)?;

    println!("{}", output.evaluation);

    let artifact_dir = PathBuf::from(&config.artifact_dir);
    text_classification::save(&output.bundle, &config, &artifact_dir)?;

    println!("Models saved to {}", artifact_dir.display());

    Ok(())
}
