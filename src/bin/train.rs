//! Command line tool for training

use anyhow::{anyhow, Context};
use log::{debug, info};
use pico_args::Arguments;
use sms_spam::{
    cli::{Dataset, Pipeline},
    datasets::{sms_spam as sms, LoadableDataset},
    pipelines::text_classification::{self, train, Config, StopWords},
};

const HELP: &str = "\
Usage: train [PIPELINE] [DATASET] [OPTIONS]

Arguments:
  PIPELINE             The pipeline to use (defaults to 'text-classification')
  DATASET              The dataset to use (defaults to 'sms-spam')

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -u, --url            Where to download the dataset from if it is not on disk
  -t, --test-size      Fraction of the dataset held out for evaluation (defaults to 0.2)
  -s, --seed           Seed for the train/test split (defaults to 42)
  -a, --alpha          Naive Bayes smoothing (defaults to 1.0)
  --stop-words         A file with one stop word per line, replacing the built-in English list
";

#[derive(Debug)]
struct Args {
    pipeline: Option<String>,
    dataset: Option<String>,
    data_dir: Option<String>,
    url: Option<String>,
    test_size: Option<f64>,
    seed: Option<u64>,
    alpha: Option<f64>,
    stop_words: Option<String>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            url: pargs.opt_value_from_str(["-u", "--url"])?,
            test_size: pargs.opt_value_from_str(["-t", "--test-size"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            alpha: pargs.opt_value_from_str(["-a", "--alpha"])?,
            stop_words: pargs.opt_value_from_str("--stop-words")?,
            pipeline: pargs.opt_free_from_str()?,
            dataset: pargs.opt_free_from_str()?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

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

    let pipeline = Pipeline::try_from(
        args.pipeline
            .as_deref()
            .unwrap_or(text_classification::PIPELINE),
    )?;

    let dataset = Dataset::try_from(args.dataset.as_deref().unwrap_or(sms::DATASET))?;

    match pipeline {
        Pipeline::TextClassification => handle_text_classification(pipeline, dataset, &args).await,
    }
}

async fn handle_text_classification(
    pipeline: Pipeline,
    dataset: Dataset,
    args: &Args,
) -> anyhow::Result<()> {
    let mut config = Config::new(pipeline.default_model().to_string(), dataset.to_string());

    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.to_string();
    }

    if let Some(test_size) = args.test_size {
        config.test_size = test_size;
    }

    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }

    if let Some(path) = &args.stop_words {
        config.stop_words = StopWords::from_file(path)
            .await
            .with_context(|| format!("Unable to read stop words from {}", path))?;
    }

    let url = args
        .url
        .clone()
        .unwrap_or_else(|| dataset.default_url().to_string());

    match dataset {
        Dataset::SmsSpam => {
            let data = sms::Dataset::load(&config.data_dir, &url)
                .await
                .context("Unable to load the training data")?;

            info!("Dataset size: {}", data.len());
            for item in data.items().iter().take(5) {
                debug!("{:>4}  {}", item.label.as_str(), item.message);
            }

            info!("Training model...");

            let trained = train::<sms::Item, _>(&data, &config).context("Training failed")?;

            println!(
                "Trained on {} examples, evaluated on {}",
                trained.n_train, trained.n_test
            );
            println!("Accuracy: {}", trained.report.accuracy);
            println!("{}", trained.report);
            println!("Model saved to {}", trained.artifact.display());
        }
    }

    Ok(())
}
