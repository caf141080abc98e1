//! Terminal front end for the Fleetdesk back office.
//!
//! Every subcommand opens a session from the layered configuration, performs one
//! backend call and prints the result as text lines or, with `--json`, as JSON.

mod commands;
mod output;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use fdesk_logger::Logger;
use fleetdesk::Fleetdesk;
use fleetdesk::domain::{Id, JobCardStatus};
use fleetdesk::kernel::config::load_client_config;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

pub use crate::output::{Printer, Render};

/// Exit code for a rejected or missing session token.
pub const EXIT_UNAUTHORIZED: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "fleetdesk", version, about = "Fleetdesk back-office client")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON).
    #[arg(long, short = 'c', global = true, env = "FLEETDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print raw JSON instead of one line per record.
    #[arg(long, global = true)]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and keep the session token.
    Login(LoginArgs),
    /// Forget the stored session token.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Dashboard figures across every slice.
    Overview,
    /// Rental contracts.
    #[command(subcommand)]
    Contracts(ContractsCommand),
    /// Fleet vehicles.
    #[command(subcommand)]
    Vehicles(VehiclesCommand),
    /// Garage job cards.
    #[command(subcommand)]
    JobCards(JobCardsCommand),
    /// User accounts.
    #[command(subcommand)]
    Users(UsersCommand),
    /// Parts, equipment and vehicle stock.
    #[command(subcommand)]
    Inventory(InventoryCommand),
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long, short = 'u')]
    pub username: String,
    /// Read from stdin when omitted.
    #[arg(long, short = 'p', env = "FLEETDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginArgs")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Filters shared by the list subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub ordering: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ContractsCommand {
    List(ListArgs),
    /// Contract details with its financial summary.
    Show { id: Id },
    Payments { id: Id },
    Terminate {
        id: Id,
        #[arg(long)]
        reason: String,
    },
    Delete { id: Id },
}

#[derive(Debug, Subcommand)]
pub enum VehiclesCommand {
    List(ListArgs),
    /// Vehicle details with health figures.
    Show { id: Id },
    Maintenance { id: Id },
    Delete { id: Id },
}

#[derive(Debug, Subcommand)]
pub enum JobCardsCommand {
    List(ListArgs),
    Show { id: Id },
    /// Move a job card to another status (pending, in-progress, awaiting-parts, completed, cancelled).
    Status { id: Id, status: JobCardStatus },
    Assign { id: Id, technician: Id },
    Delete { id: Id },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List(ListArgs),
    Activate { id: Id },
    Deactivate { id: Id },
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    Parts {
        #[command(flatten)]
        list: ListArgs,
        /// Only parts at or below their reorder level, read across every page.
        #[arg(long, conflicts_with = "page")]
        low_stock: bool,
    },
    Equipment(ListArgs),
    Vehicles(ListArgs),
    Summary,
    /// Apply a signed stock change to a part.
    Adjust {
        part: Id,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
        #[arg(long)]
        reason: String,
    },
}

/// Runs one parsed command line against stdout.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config =
        load_client_config(cli.config.as_deref()).context("Configuration is malformed")?;
    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &config.log, cli.verbose)
        .context("Failed to initialize logging")?;

    let desk = Fleetdesk::open(&config).await.context("Failed to open session")?;
    let stdout = std::io::stdout();
    let mut printer = Printer::new(stdout.lock(), cli.json);

    commands::execute(&desk, cli.command, &mut printer).await?;
    printer.flush()?;
    Ok(())
}

/// Prints the error chain to stderr and picks the exit code.
pub fn report(err: &anyhow::Error) -> ExitCode {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "error: {err:#}");

    if is_unauthorized(err) {
        let _ = writeln!(stderr, "hint: run `fleetdesk login` to start a new session");
        return ExitCode::from(EXIT_UNAUTHORIZED);
    }
    ExitCode::FAILURE
}

fn is_unauthorized(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.downcast_ref::<fleetdesk::http::ApiError>().is_some_and(|e| e.is_unauthorized())
            || cause
                .downcast_ref::<fleetdesk::features::identity::IdentityError>()
                .is_some_and(|e| e.is_unauthorized())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fleetdesk", "vehicles", "list", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Vehicles(VehiclesCommand::List(_))));
    }

    #[test]
    fn test_parses_job_card_status() {
        let cli =
            Cli::try_parse_from(["fleetdesk", "job-cards", "status", "7", "in-progress"]).unwrap();
        let Command::JobCards(JobCardsCommand::Status { id, status }) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(id, 7);
        assert_eq!(status, JobCardStatus::InProgress);
    }

    #[test]
    fn test_rejects_unknown_job_card_status() {
        let err = Cli::try_parse_from(["fleetdesk", "job-cards", "status", "7", "lost"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_parses_negative_stock_delta() {
        let cli = Cli::try_parse_from([
            "fleetdesk", "inventory", "adjust", "3", "-2", "--reason", "damaged",
        ])
        .unwrap();
        let Command::Inventory(InventoryCommand::Adjust { part, delta, reason }) = cli.command
        else {
            panic!("unexpected command");
        };
        assert_eq!((part, delta, reason.as_str()), (3, -2, "damaged"));
    }

    #[test]
    fn test_low_stock_keeps_filters_but_not_page() {
        let cli = Cli::try_parse_from([
            "fleetdesk", "inventory", "parts", "--low-stock", "--search", "filter",
        ])
        .unwrap();
        let Command::Inventory(InventoryCommand::Parts { list, low_stock }) = cli.command else {
            panic!("unexpected command");
        };
        assert!(low_stock);
        assert_eq!(list.search.as_deref(), Some("filter"));

        let err = Cli::try_parse_from(["fleetdesk", "inventory", "parts", "--low-stock", "--page", "2"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_unauthorized_errors_are_detected_through_context() {
        let err = anyhow::Error::new(fleetdesk::http::ApiError::Unauthorized {
            message: "expired".into(),
            context: None,
        })
        .context("Failed to list vehicles");
        assert!(is_unauthorized(&err));
        assert!(!is_unauthorized(&anyhow::anyhow!("boom")));
    }
}
