//! Command line tool for inference

use std::{io::BufRead, path::PathBuf};

use anyhow::Result;
use pico_args::Arguments;
use sms_spam::pipelines::text_classification::{self, training::artifact_path, Predictor};

const HELP: &str = "\
Usage: infer [OPTIONS] [TEXT ...]

Classifies each TEXT argument, or each line of standard input when none are given.

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -m, --model          The path to the model artifact (defaults to the trained model in the data directory)
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The top-level data directory
    data_dir: Option<String>,

    /// An explicit artifact path
    model: Option<String>,

    /// Messages to classify
    texts: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut pargs = Arguments::from_env();

    let help = pargs.contains(["-h", "--help"]);
    let data_dir = pargs.opt_value_from_str(["-d", "--data-dir"])?;
    let model = pargs.opt_value_from_str(["-m", "--model"])?;

    let texts = pargs
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    Ok(Args {
        help,
        data_dir,
        model,
        texts,
    })
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let model_path: PathBuf = match args.model {
        Some(model) => model.into(),
        None => artifact_path(
            args.data_dir.as_deref().unwrap_or("data"),
            text_classification::DEFAULT_MODEL,
        ),
    };

    let predictor = Predictor::load(&model_path)?;

    let texts = if args.texts.is_empty() {
        std::io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        args.texts
    };

    for text in texts {
        match predictor.classify(&text) {
            Ok(label) => println!("{}\t{}", label, text),
            Err(err) => println!("error\t{}", err),
        }
    }

    Ok(())
}
