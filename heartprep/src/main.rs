//! heartprep CLI - download a CSV, clean it and add an age category
//!
//! ```bash
//! heartprep https://example.org/heart_failure_clinical_records_dataset.csv
//! ```
//!
//! Writes `heart_failure_dataset_procesado.csv` in the current directory.

use clap::error::ErrorKind;
use clap::Parser;
use heartprep::logs::{log_error, LOG_BROADCASTER};
use heartprep::{run, PipelineError, Settings};

const USAGE_HINT: &str = "Provide the URL of the dataset to process.";

#[derive(Parser)]
#[command(name = "heartprep", version)]
#[command(
    about = "Download a CSV dataset, drop duplicate rows and add an age category column",
    long_about = None
)]
struct Cli {
    /// URL of the CSV dataset
    url: String,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Wrong number of arguments: explain and stop without processing
            println!("{}", USAGE_HINT);
            eprintln!("{}", e.render());
            return;
        }
    };

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            log_error(PipelineError::from(e).user_message());
            std::process::exit(1);
        }
    };
    LOG_BROADCASTER.set_format(settings.log_format);

    match run(&cli.url, &settings).await {
        Ok(summary) => {
            println!(
                "Processed data saved to '{}'",
                summary.output_path.display()
            );
        }
        Err(e) => {
            log_error(e.user_message());
            std::process::exit(1);
        }
    }
}
