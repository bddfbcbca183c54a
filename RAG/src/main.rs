// One-shot question answering from the command line. The HTTP server lives
// in the ../api crate.

use anyhow::Result;
use clap::Parser;
use rag_system::{build_default_pipeline, OpenAiConfig};

#[derive(Parser)]
#[command(name = "rag_system", about = "Answer a question against the seeded knowledge store")]
struct Cli {
    /// The question to answer
    question: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = OpenAiConfig::from_env()?;
    let pipeline = build_default_pipeline(&config).await?;

    let answer = pipeline.answer(&cli.question).await?;
    println!("{}", answer);

    Ok(())
}
