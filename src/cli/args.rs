//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Keep a live mirror of a directory tree and push it to a websocket observer
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Directory to watch
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub root: PathBuf,

    /// Display name of the root directory (default: final segment of ROOT)
    pub name: Option<String>,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: dirmirror.toml, optional)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long)]
    pub interface: Option<std::net::IpAddr>,

    /// Websocket port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Coalescing interval for filesystem events, in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
