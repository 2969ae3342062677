use crate::init_config::CmdConfig;
use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use clap_verbosity_flag::InfoLevel;
use directories::ProjectDirs;
use std::path::PathBuf;

mod cmd;
mod config;
mod init_config;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default one
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bucket to browse, overrides the one in the config
    #[arg(short, long, value_name = "NAME")]
    bucket: Option<String>,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity<InfoLevel>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Modify the config file
    Config {
        #[command(subcommand)]
        cmd: CmdConfig,
    },
    /// List a directory
    Ls {
        #[arg(default_value = ".")]
        path: String,
        /// Show mode, size and modification time
        #[arg(short, long, action = ArgAction::SetTrue)]
        long: bool,
    },
    /// Print a file to stdout
    Cat { path: String },
    /// Show metadata of a file or directory
    Stat { path: String },
    /// Print everything below a directory
    Tree {
        #[arg(default_value = ".")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .init();

    // Config under ~/.config/s3fs/config.toml, local buckets under ~/.local/share/s3fs/
    let dirs =
        ProjectDirs::from("", "", "s3fs").context("failed to determine config directory path")?;
    let config_file = cli
        .config
        .unwrap_or_else(|| dirs.config_dir().join("config.toml"));

    cmd::run_command(&dirs, config_file, cli.bucket.as_deref(), cli.cmd).await
}
