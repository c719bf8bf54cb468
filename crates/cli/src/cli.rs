//! Command-line definition and top-level execution.

use clap::{Parser, Subcommand};
use groupsweep_state::{FileStateStore, KeyValueStore, TriggerRegistry};

use crate::commands::{dispatch, Command, Outcome};
use crate::config::AppConfig;
use crate::engine::{run_scan, ScanSummary, PAGE_TOKEN_KEY};
use crate::error::AppResult;
use crate::prompt::{AssumeYes, Prompter, TerminalPrompter};
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "groupsweep",
    version,
    about = "Find Google Workspace groups with no members and no owners"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start Listing Empty Groups: rebuild the report from a full scan.
    Scan {
        /// Keep the report in memory and print it; send no email.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Reset and Start Over: clear the saved cursor and triggers, then scan.
    Reset,
    /// Delete Found Empty Groups: delete every group listed in the report.
    Delete {
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// Pick one of the three commands above from a menu.
    Menu,
    /// Print the rows currently in the report.
    Show,
    /// Print the saved scan cursor and registered triggers.
    Status,
}

/// Execute a parsed command line.
pub async fn execute(cli: Cli, config: &AppConfig) -> AppResult<()> {
    match cli.command {
        Commands::Scan { dry_run: true } => {
            let (state, backend) = AppState::dry_run(config)?;
            let summary = run_scan(&state).await?;
            for row in backend.snapshot() {
                println!("{}", row.join("\t"));
            }
            print_outcome(&Outcome::Scanned(summary));
        }
        Commands::Scan { dry_run: false } => {
            run_command(Command::StartListing, config, &TerminalPrompter).await?
        }
        Commands::Reset => {
            run_command(Command::ResetAndStartOver, config, &TerminalPrompter).await?
        }
        Commands::Delete { yes } => {
            let prompter: &dyn Prompter = if yes { &AssumeYes } else { &TerminalPrompter };
            run_command(Command::DeleteFound, config, prompter).await?
        }
        Commands::Menu => {
            let Some(command) = TerminalPrompter.select_command()? else {
                return Ok(());
            };
            run_command(command, config, &TerminalPrompter).await?
        }
        Commands::Show => {
            let state = AppState::from_config(config)?;
            for listed in state.sheet.read_all_rows().await? {
                let row = listed.row;
                println!(
                    "{}\t{}\t{}\t{}",
                    row.name,
                    row.creation_date,
                    row.email,
                    row.status.as_deref().unwrap_or("")
                );
            }
        }
        Commands::Status => {
            let store = FileStateStore::new(config.state_file.clone());
            match store.get(PAGE_TOKEN_KEY)? {
                Some(cursor) => println!("Unfinished scan, cursor: {cursor}"),
                None => println!("No unfinished scan"),
            }
            let triggers = store.list_triggers()?;
            println!("{} trigger(s) registered", triggers.len());
            for trigger in triggers {
                println!(
                    "  {}\t{}\t{}",
                    trigger.id,
                    trigger.handler,
                    trigger.schedule.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

async fn run_command(
    command: Command,
    config: &AppConfig,
    prompter: &dyn Prompter,
) -> AppResult<()> {
    let state = AppState::from_config(config)?;
    let outcome = dispatch(command, &state, prompter).await?;
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Scanned(scan) => print_scan(scan),
        Outcome::ResetAndScanned(reset, scan) => {
            println!(
                "Reset: {} cursor, {} trigger(s) cancelled",
                if reset.cleared_cursor.is_some() { "cleared" } else { "no" },
                reset.cancelled_triggers.len()
            );
            print_scan(scan);
        }
        Outcome::Deleted(deletion) => println!(
            "Deleted {} of {} group(s), {} failed",
            deletion.deleted, deletion.attempted, deletion.failed
        ),
        Outcome::DeletionCancelled => println!("Deletion cancelled"),
    }
}

fn print_scan(scan: &ScanSummary) {
    println!(
        "Scanned {} group(s) on {} page(s), found {} empty",
        scan.groups_scanned, scan.pages, scan.empty_groups
    );
    if let Some(domain) = &scan.notified_domain {
        println!("Report sent for {domain}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
