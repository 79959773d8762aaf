//! Command line tool to check for (and fetch) the local resources used in training

use anyhow::anyhow;
use pico_args::Arguments;
use sms_spam::utils::resources::{default_resources, verify};

const HELP: &str = "\
Usage: verify [OPTIONS]

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let data_dir: String = pargs
        .opt_value_from_str(["-d", "--data-dir"])?
        .unwrap_or_else(|| "data".to_string());

    println!("Verifying resources...");

    let checks = verify(&data_dir, &default_resources()).await;

    for check in &checks {
        println!("{}", check);
    }

    println!("Verification complete.");

    let failed = checks.iter().filter(|check| !check.is_ok()).count();
    if failed > 0 {
        return Err(anyhow!("{} resource(s) still missing", failed));
    }

    Ok(())
}
