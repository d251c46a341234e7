//! Command line tool to merge the fake and real article sources into one training set

use std::path::PathBuf;

use pico_args::Arguments;
use truthlens::datasets::merge;

const HELP: &str = "\
Usage: merge [OPTIONS]

Options:
  -h, --help           Print help
  -f, --fake           CSV file of fake articles (defaults to 'data/Fake.csv')
  -r, --real           CSV file of real articles (defaults to 'data/True.csv')
  -o, --output         Where to write the merged CSV (defaults to 'data/train.csv')
  -s, --seed           Shuffle seed (defaults to 42)
";

#[derive(Debug)]
struct Args {
    fake: PathBuf,
    real: PathBuf,
    output: PathBuf,
    seed: u64,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            fake: pargs
                .opt_value_from_str(["-f", "--fake"])?
                .unwrap_or_else(|| PathBuf::from(merge::DEFAULT_FAKE)),
            real: pargs
                .opt_value_from_str(["-r", "--real"])?
                .unwrap_or_else(|| PathBuf::from(merge::DEFAULT_REAL)),
            output: pargs
                .opt_value_from_str(["-o", "--output"])?
                .unwrap_or_else(|| PathBuf::from(merge::DEFAULT_OUTPUT)),
            seed: pargs
                .opt_value_from_str(["-s", "--seed"])?
                .unwrap_or(merge::DEFAULT_SEED),
        };

        Ok(Some(args))
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let summary = merge::run(&args.fake, &args.real, &args.output, args.seed)?;

    println!(
        "Merged {} fake and {} real articles into {} ({} rows)",
        summary.fake,
        summary.real,
        args.output.display(),
        summary.total()
    );

    Ok(())
}
