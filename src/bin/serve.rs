//! Command line tool to serve the trained classifier over HTTP

use std::path::PathBuf;

use pico_args::Arguments;
use truthlens::service::{self, ServiceConfig};

const HELP: &str = "\
Usage: serve [OPTIONS]

Options:
  -h, --help           Print help
  -p, --port           Port to listen on (overrides PORT, defaults to 5000)
  -m, --models-dir     Directory holding the fitted artifacts (overrides MODELS_DIR, defaults to 'models')

Environment:
  HOST                 Address to bind (defaults to '0.0.0.0')
  PORT                 Port to listen on
  MODELS_DIR           Directory holding the fitted artifacts
";

#[derive(Debug)]
struct Args {
    port: Option<u16>,
    models_dir: Option<PathBuf>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            port: pargs.opt_value_from_str(["-p", "--port"])?,
            models_dir: pargs.opt_value_from_str(["-m", "--models-dir"])?,
        };

        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let mut config = ServiceConfig::from_env()?;

    if let Some(port) = args.port {
        config.port = port;
    }

    if let Some(models_dir) = args.models_dir {
        config.models_dir = models_dir;
    }

    service::serve(&config).await?;

    Ok(())
}
