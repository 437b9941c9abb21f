use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Run a single poll cycle and exit.
    #[arg(long, default_value_t = false)]
    pub once: bool,
    /// Create the collection and its index, then exit.
    #[arg(long, default_value_t = false, conflicts_with = "once")]
    pub setup_only: bool,
}
