//! Command line tool to train the name classifier

use anyhow::anyhow;
use burn::backend::Autodiff;
use burn_names::{
    cli::{backend, Component},
    datasets::names::ReaderConfig,
    pipelines::name_classification::training::{self, Config},
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: train TRAIN_PATTERN [OPTIONS]

Arguments:
  TRAIN_PATTERN          Glob pattern of per-category name files (e.g., 'data/names/*.txt')

Options:
  -h, --help             Print help
  -v, --validation       Glob pattern of validation files (defaults to holding out 10%)
  -o, --output           The directory to write model artifacts to (defaults to 'data/model')
  -n, --num-epochs       Number of epochs to train for
  -b, --batch-size       Batch size, counted in instances
  -c, --chunk-size       Names per instance (defaults to 10)
  -s, --seed             Seed for shuffling and initialization
  -r, --reader           The reader to use (defaults to 'name-reader')
  -m, --model            The model to use (defaults to 'name-classifier')
  --no-tui               Disable TUI
";

#[derive(Debug)]
struct Args {
    train_data_path: String,
    validation_data_path: Option<String>,
    artifact_dir: Option<String>,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    chunk_size: Option<usize>,
    seed: Option<u64>,
    reader: Option<String>,
    model: Option<String>,
    use_tui: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            validation_data_path: pargs.opt_value_from_str(["-v", "--validation"])?,
            artifact_dir: pargs.opt_value_from_str(["-o", "--output"])?,
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            chunk_size: pargs.opt_value_from_str(["-c", "--chunk-size"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            reader: pargs.opt_value_from_str(["-r", "--reader"])?,
            model: pargs.opt_value_from_str(["-m", "--model"])?,
            use_tui: !(pargs.contains("--no-tui")),
            train_data_path: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => {
                    anyhow!("Missing required argument: TRAIN_PATTERN")
                }
                _ => anyhow!("{}", e),
            })?,
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

    if let Some(reader) = &args.reader {
        Component::resolve(reader, Component::Reader)?;
    }

    if let Some(model) = &args.model {
        Component::resolve(model, Component::Classifier)?;
    }

    let mut reader = ReaderConfig::new();

    if let Some(chunk_size) = args.chunk_size {
        reader.chunk_size = chunk_size;
    }

    reader.seed = args.seed;

    let mut config = Config::new(args.train_data_path, reader);

    config.validation_data_path = args.validation_data_path;
    config.use_tui = args.use_tui;

    if let Some(num_epochs) = args.num_epochs {
        config.num_epochs = num_epochs;
    }

    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }

    if let Some(artifact_dir) = args.artifact_dir {
        config.artifact_dir = artifact_dir;
    }

    training::train::<Autodiff<backend::Backend>>(backend::device(), config).await
}
