use clap::{Parser, Subcommand};
use git_browse::commands::*;
use git_browse::core::{error::Result, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-browse")]
#[command(about = "Browse any branch of a Git repository as a folder tree")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List branches, checked-out branch first marked with *
    Branches,
    /// List a folder with the status of each entry
    Ls {
        /// Branch to browse (defaults to the checked-out branch)
        #[arg(short, long)]
        branch: Option<String>,
        /// Folder relative to the repository root
        path: Option<PathBuf>,
    },
    /// Print the content of a file
    Show {
        /// Branch to read from (defaults to the checked-out branch)
        #[arg(short, long)]
        branch: Option<String>,
        /// File relative to the repository root
        path: PathBuf,
    },
    /// Summarize the working tree and branches
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let result = match cli.command {
        Commands::Branches => execute_branches(),
        Commands::Ls { branch, path } => execute_ls(branch, path),
        Commands::Show { branch, path } => execute_show(branch, path),
        Commands::Summary { json } => execute_summary(json),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
