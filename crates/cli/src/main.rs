use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use paper_client::{CancellationToken, ClientConfig, DataClient, LoadOutcome, ViewLoader};
use paper_core::{partition, Partition, StructuredData};
use paper_observability::{init_tracing, AppMetrics};
use paper_render::{write_question_paper, OUTPUT_FILE_NAME};

#[derive(Debug, Parser)]
#[command(name = "question-paper")]
#[command(about = "Fetch question sets and export them as a two-part question paper")]
struct Cli {
    #[arg(long, env = "PAPER_BACKEND_URL", default_value = paper_client::config::DEFAULT_BACKEND_URL)]
    backend_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch structured data by id and write the PDF.
    Export {
        data_id: String,
        #[arg(long, short, default_value = OUTPUT_FILE_NAME)]
        output: PathBuf,
    },
    /// Write the PDF from a local JSON file.
    Render {
        #[arg(long, short)]
        input: PathBuf,
        #[arg(long, short, default_value = OUTPUT_FILE_NAME)]
        output: PathBuf,
    },
    /// Print Part A and Part B as JSON.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ShowArgs {
    data_id: Option<String>,
    #[arg(long, short)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("paper_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Export { data_id, output } => {
            let partition = fetch_partition(&cli.backend_url, &data_id).await?;
            export(&partition, &output)?;
        }
        Command::Render { input, output } => {
            let partition = read_partition(&input)?;
            export(&partition, &output)?;
        }
        Command::Show(ShowArgs { data_id, input }) => {
            let partition = match (data_id, input) {
                (_, Some(input)) => read_partition(&input)?,
                (Some(data_id), None) => fetch_partition(&cli.backend_url, &data_id).await?,
                (None, None) => bail!("either a data id or --input is required"),
            };
            println!("{}", serde_json::to_string_pretty(&partition)?);
        }
    }

    Ok(())
}

async fn fetch_partition(backend_url: &str, data_id: &str) -> Result<Partition> {
    let mut config = ClientConfig::from_env()?;
    config.backend_url = ClientConfig::new(backend_url)?.backend_url;

    let loader = ViewLoader::new(DataClient::new(config)?, AppMetrics::shared());
    let cancel = CancellationToken::new();

    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };
    let outcome = loader.load(data_id, &cancel).await;
    ctrl_c.abort();

    match outcome {
        LoadOutcome::Ready => loader
            .partition()
            .context("view finished loading without data"),
        LoadOutcome::Failed(view_error) => bail!("{view_error}"),
        LoadOutcome::Cancelled => bail!("interrupted while fetching {data_id}"),
    }
}

fn read_partition(input: &Path) -> Result<Partition> {
    let bytes = fs::read(input).with_context(|| format!("failed reading {}", input.display()))?;
    let units = StructuredData::from_json_slice(&bytes)
        .with_context(|| format!("{} does not hold structured data", input.display()))?;
    Ok(partition(&units))
}

fn export(partition: &Partition, output: &Path) -> Result<()> {
    let pages = write_question_paper(partition, output)?;
    tracing::info!(output = %output.display(), pages, "question paper written");
    println!(
        "wrote {} ({} questions in Part A, {} in Part B, {} pages)",
        output.display(),
        partition.part_a.len(),
        partition.part_b.len(),
        pages
    );
    Ok(())
}
