use std::path::PathBuf;

use clap::Parser;

/// AudioTech Pro support assistant: Apple, DAW and plugin help in the terminal.
#[derive(Parser, Debug)]
#[command(name = "audiotech", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `audiotech=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Ask a single question, print the reply and exit.
    #[arg(long, value_name = "TEXT")]
    pub ask: Option<String>,

    /// Image to attach to `--ask`.
    #[arg(long, value_name = "PATH", requires = "ask")]
    pub image: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
