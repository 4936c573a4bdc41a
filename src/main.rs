use changetrail::commands::*;
use changetrail::core::{
    error::{ChangetrailError, Result},
    print_error,
    validation::OverallStatus,
};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "changetrail")]
#[command(about = "Track workspace changes and keep a numbered changelog")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .changetrail.json and record the first baseline
    Init {
        /// Overwrite an existing workspace config
        #[arg(long)]
        force: bool,
    },
    /// Show the current workspace snapshot
    Status,
    /// List changes since the last baseline and advance it
    Changes {
        /// Print the change events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Append a numbered entry to the changelog
    Log {
        /// One-line summary of the work
        summary: String,
        /// Description of the state before the work
        #[arg(long)]
        previous: Option<String>,
        /// Description of the state after the work
        #[arg(long)]
        current: Option<String>,
    },
    /// Show a workspace report without moving the baseline
    Report {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the self-validation suite
    Validate {
        /// Write a markdown report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Pre/post hooks around a unit of work
    Hook {
        #[command(subcommand)]
        stage: HookStage,
    },
    /// Forget the persisted baseline
    Reset,
}

#[derive(Subcommand)]
enum HookStage {
    /// Record a fresh baseline
    Pre,
    /// Log everything changed since `hook pre`
    Post {
        /// One-line summary of the work
        #[arg(short, long)]
        summary: String,
    },
    /// Check integrity and recover if needed
    Session,
}

fn report_failure(e: ChangetrailError) -> ! {
    if e.is_bad_root() {
        print_error(&format!("Invalid workspace root: {e}"));
    } else {
        print_error(&e.to_string());
    }
    std::process::exit(1);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let root = cli.root;
    let result = match cli.command {
        Commands::Init { force } => execute_init(root, force),
        Commands::Status => execute_status(root),
        Commands::Changes { json } => execute_changes(root, json),
        Commands::Log {
            summary,
            previous,
            current,
        } => execute_log(root, &summary, previous.as_deref(), current.as_deref()),
        Commands::Report { json } => execute_report(root, json),
        Commands::Validate { output } => match execute_validate(root, output) {
            Ok(OverallStatus::SystemFailure) => std::process::exit(1),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        },
        Commands::Hook { stage } => match stage {
            HookStage::Pre => execute_hook_pre(root),
            HookStage::Post { summary } => execute_hook_post(root, &summary),
            HookStage::Session => execute_hook_session(root),
        },
        Commands::Reset => execute_reset(root),
    };

    if let Err(e) = result {
        report_failure(e);
    }

    Ok(())
}
