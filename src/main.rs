use anyhow::Result;
use clap::Parser;

use nb_exec::cli::{execute_run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(error) = execute_run(cli.paths, cli.root).await {
        eprintln!("❌ エラー: {error}");
        std::process::exit(1);
    }

    Ok(())
}
