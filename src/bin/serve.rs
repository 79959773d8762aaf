//! Web server for the interactive predictor

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use log::info;
use pico_args::Arguments;
use sms_spam::{
    pipelines::text_classification::{self, training::artifact_path, Predictor},
    ui::{router, AppState},
};

const HELP: &str = "\
Usage: serve [OPTIONS]

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -m, --model          The path to the model artifact (defaults to the trained model in the data directory)
  -b, --bind           The address to listen on (defaults to 127.0.0.1:8501)
";

#[derive(Debug)]
struct Args {
    data_dir: Option<String>,
    model: Option<String>,
    bind: Option<SocketAddr>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        Ok(Some(Args {
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            model: pargs.opt_value_from_str(["-m", "--model"])?,
            bind: pargs.opt_value_from_str(["-b", "--bind"])?,
        }))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let model_path: PathBuf = match args.model {
        Some(model) => model.into(),
        None => artifact_path(
            args.data_dir.as_deref().unwrap_or("data"),
            text_classification::DEFAULT_MODEL,
        ),
    };

    // The model is loaded exactly once, here, and shared read-only with every request
    let predictor = Predictor::load(&model_path).context("Unable to load the model artifact")?;
    let state = Arc::new(AppState::new(predictor)?);

    let addr = args
        .bind
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8501)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Unable to listen on {}", addr))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
