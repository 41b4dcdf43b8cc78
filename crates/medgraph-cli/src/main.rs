//! `medgraph` — medical GraphRAG assistant.
//!
//! `medgraph ask "<question>"` runs the pipeline once and prints the report;
//! `medgraph chat` loops on stdin, polishing each answer for presentation.

mod report;
mod tracing_setup;
mod user_config;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Result};
use medgraph_embed::HuggingFaceBackend;
use medgraph_graph::DgraphClient;
use medgraph_llm::GeminiClient;
use medgraph_rag::{PineconeStore, RagPipeline};
use tracing::info;

use user_config::UserConfig;

#[derive(Parser)]
#[command(name = "medgraph", version, about = "Medical GraphRAG assistant")]
struct Cli {
    /// Config file override (default: <config_dir>/medgraph/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of snippets to retrieve per query
    #[arg(long, global = true)]
    top_k: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question and exit
    Ask {
        /// The question; multiple words are joined with spaces
        question: Vec<String>,
    },
    /// Interactive question loop (answers are polished for presentation)
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    tracing_setup::init_tracing();

    let cli = Cli::parse();
    let mut config = UserConfig::load(cli.config.as_deref())?;
    config.resolve_env();
    config.validate()?;
    if let Some(top_k) = cli.top_k {
        config.pinecone.top_k = top_k;
    }

    let pipeline = build_pipeline(&config)?;

    match cli.command {
        Command::Ask { question } => {
            let question = question.join(" ");
            if question.trim().is_empty() {
                bail!("no question given");
            }
            let report = pipeline.answer(&question, false).await?;
            print!("{}", report::render(&report));
        }
        Command::Chat => chat_loop(&pipeline).await?,
    }
    Ok(())
}

fn build_pipeline(config: &UserConfig) -> Result<RagPipeline> {
    let embedder = HuggingFaceBackend::new(&config.huggingface)?;
    let store = PineconeStore::new(&config.pinecone)?;
    let graph_client = DgraphClient::new(&config.dgraph)?;
    let llm = GeminiClient::new(&config.gemini)?;
    Ok(RagPipeline::new(
        embedder,
        store,
        graph_client,
        llm,
        config.reasoning.clone(),
        config.pinecone.top_k,
    ))
}

/// One question per line; `quit` or EOF ends the session. Each query is
/// processed start-to-finish before the next prompt appears.
async fn chat_loop(pipeline: &RagPipeline) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    info!("starting interactive session");
    loop {
        write!(stdout, "question> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question, "quit" | "exit") {
            break;
        }

        match pipeline.answer(question, true).await {
            Ok(report) => {
                write!(stdout, "\n{}\n", report::render(&report))?;
            }
            Err(err) => {
                // mandatory-step failure aborts this query only
                writeln!(stdout, "query failed: {err}")?;
            }
        }
    }
    Ok(())
}
