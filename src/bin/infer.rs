//! Command line tool for inference

use anyhow::Result;
use burn_names::{
    cli::{backend, Component},
    models::rnn,
    pipelines::name_classification::Predictor,
};
use pico_args::Arguments;
use serde_json::Value;

const HELP: &str = "\
Usage: infer [OPTIONS] [NAME]...

Arguments:
  NAME                 Names to classify

Options:
  -h, --help           Print help
  -a, --artifacts      The directory containing model artifacts (defaults to 'data/model')
  -p, --predictor      The predictor to use (defaults to 'name-predictor')
  -j, --json           A JSON list of names to classify, instead of NAME arguments
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The directory containing model artifacts
    artifact_dir: Option<String>,

    /// The predictor to use
    predictor: Option<String>,

    /// A JSON list of names
    json: Option<String>,

    /// Names given as free arguments
    names: Vec<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let help = pargs.contains(["-h", "--help"]);
    let artifact_dir = pargs.opt_value_from_str(["-a", "--artifacts"])?;
    let predictor = pargs.opt_value_from_str(["-p", "--predictor"])?;
    let json = pargs.opt_value_from_str(["-j", "--json"])?;

    let names = pargs
        .finish()
        .into_iter()
        .map(|name| name.to_string_lossy().into_owned())
        .collect();

    Ok(Args {
        help,
        artifact_dir,
        predictor,
        json,
        names,
    })
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    if let Some(predictor) = &args.predictor {
        Component::resolve(predictor, Component::Predictor)?;
    }

    let input: Value = match &args.json {
        Some(json) => serde_json::from_str(json)?,
        None => Value::from(args.names.clone()),
    };

    let artifact_dir = args.artifact_dir.as_deref().unwrap_or("data/model");
    let predictor = Predictor::<backend::Backend, rnn::Model<backend::Backend>>::load(
        artifact_dir,
        backend::device(),
    )?;

    let labels = predictor.predict_json(&input)?;
    let names: Vec<String> = serde_json::from_value(input)?;

    for (name, label) in names.iter().zip(labels) {
        println!("{} -> {}", name, label);
    }

    Ok(())
}
