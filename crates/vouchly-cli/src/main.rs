mod query;
mod scrape;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "vouchly-cli")]
#[command(about = "Voucher aggregation command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run every configured source once and persist the results.
    Scrape,
    /// Rank the persisted corpus against a query and print the winner.
    Query {
        /// Free-text voucher name to look up.
        text: String,
        /// Minimum acceptable match score; defaults to the configured value.
        #[arg(long)]
        min_score: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape => scrape::run().await,
        Commands::Query { text, min_score } => query::run(&text, min_score),
    }
}
