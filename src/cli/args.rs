use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nb_exec")]
#[command(about = "Execute Jupyter notebooks in parallel and write the results back in place")]
#[command(version)]
pub struct Cli {
    /// Notebook files to execute (defaults to scanning <ROOT>/examples recursively)
    pub paths: Vec<PathBuf>,

    /// Project root used for the default scan and relative progress output
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}
