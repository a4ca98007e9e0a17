use anyhow::Result;
use clap::{Parser, Subcommand};

use minigit::commands;

/// minigit - a minimal content-addressed version control tool
#[derive(Parser)]
#[command(name = "minigit")]
#[command(version = "0.1.0")]
#[command(about = "A minimal content-addressed version control tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new minigit repository
    Init,

    /// Stage files for the next commit
    Add {
        /// Files or directories to stage
        paths: Vec<String>,
    },

    /// Snapshot staged files into a new commit
    Commit {
        /// The commit message
        #[arg(short, long)]
        message: String,
    },

    /// Show commit history from HEAD
    Log {
        /// Show one commit per line
        #[arg(long = "oneline")]
        oneline: bool,
    },

    /// List branches, or create one at HEAD
    Branch {
        /// Branch name to create
        name: Option<String>,
    },

    /// Switch HEAD to a branch or commit
    Checkout {
        /// Branch name or commit fingerprint
        target: String,
    },

    /// Three-way merge a branch into HEAD
    Merge {
        /// Branch to merge in
        branch: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init => commands::init::run(None),
        Commands::Add { paths } => commands::add::run(paths.clone()),
        Commands::Commit { message } => commands::commit::run(message),
        Commands::Log { oneline } => commands::log::run(*oneline),
        Commands::Branch { name } => commands::branch::run(name.clone()),
        Commands::Checkout { target } => commands::checkout::run(target),
        Commands::Merge { branch } => commands::merge::run(branch),
    }
}
