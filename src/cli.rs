// ABOUTME: Command-line surface for ptlog: one subcommand per directory operation.
// ABOUTME: Validates raw arguments before touching storage and reports each outcome in one line.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ptlog_core::validation::{parse_date, parse_id, parse_name, parse_range};
use ptlog_core::{DateRange, EmployeeId, Outcome, ValidationError};
use ptlog_store::DirectoryService;

use crate::render;

#[derive(Debug, Parser)]
#[command(
    name = "ptlog",
    version,
    about = "Track a staff directory and the PT log entries recorded against it"
)]
pub struct Cli {
    /// Database file to use instead of PTLOG_DB (`:memory:` for a throwaway store)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print listings as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new staff member (starts as a team member)
    AddStaff { name: String },

    /// Add a PT log entry for a staff member
    AddLog {
        employee_id: String,
        details: String,
        /// Logged date, YYYY-MM-DD
        date: String,
    },

    /// Promote a team member to manager
    Promote { employee_id: String },

    /// Assign a manager to a team member
    Assign {
        employee_id: String,
        manager_id: String,
    },

    /// List all staff members
    ListStaff,

    /// List recorded supervisor links
    Links,

    /// List PT logs of a staff member
    Logs {
        employee_id: String,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// List PT logs of every team member under a manager, newest first
    TeamLogs {
        manager_id: String,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Delete PT logs of a staff member dated within a range
    DeleteLogs {
        employee_id: String,
        /// Range start, YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// Range end, YYYY-MM-DD
        #[arg(long)]
        to: String,
    },

    /// Print the storage engine version
    Version,
}

/// Optional inclusive date window for listings.
#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Range start, YYYY-MM-DD
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// Range end, YYYY-MM-DD
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

impl RangeArgs {
    fn parse(&self) -> Result<Option<DateRange>, ValidationError> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => parse_range(from, to).map(Some),
            _ => Ok(None),
        }
    }
}

/// How a command ended, for the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failed,
}

fn employee_id(raw: &str) -> Result<EmployeeId, ValidationError> {
    parse_id(raw).map(EmployeeId::new)
}

/// Which table layout a log listing uses.
enum LogView {
    Employee,
    Team,
}

/// Execute one command against the service, writing user-facing output to
/// `out`. Storage failures are returned as errors; invalid input and refused
/// operations are reported and yield `Status::Failed`.
pub fn run(cli: &Cli, service: &mut DirectoryService, out: &mut impl Write) -> anyhow::Result<Status> {
    match execute(cli, service, &mut *out) {
        Ok(status) => Ok(status),
        Err(err) => match err.downcast::<ValidationError>() {
            Ok(invalid) => {
                tracing::debug!("input rejected before storage: {invalid}");
                writeln!(out, "Invalid input: {invalid}.")?;
                Ok(Status::Failed)
            }
            Err(other) => Err(other),
        },
    }
}

fn execute(cli: &Cli, service: &mut DirectoryService, out: &mut impl Write) -> anyhow::Result<Status> {
    match &cli.command {
        Command::AddStaff { name } => {
            let name = parse_name(name)?;
            let outcome = service.add_staff(name).context("adding staff member")?;
            if let Outcome::Completed(id) = &outcome {
                writeln!(out, "Added staff member {id}.")?;
            }
            report(out, outcome)
        }

        Command::AddLog {
            employee_id: raw_id,
            details,
            date,
        } => {
            let id = employee_id(raw_id)?;
            let logged_date = parse_date(date)?;
            let outcome = service
                .add_log_entry(id, details, logged_date)
                .context("adding PT log entry")?;
            report(out, outcome)
        }

        Command::Promote {
            employee_id: raw_id,
        } => {
            let id = employee_id(raw_id)?;
            let outcome = service.promote(id).context("promoting staff member")?;
            report(out, outcome)
        }

        Command::Assign {
            employee_id: raw_employee,
            manager_id: raw_manager,
        } => {
            let employee = employee_id(raw_employee)?;
            let manager = employee_id(raw_manager)?;
            let outcome = service
                .assign_supervisor(employee, manager)
                .context("assigning supervisor")?;
            report(out, outcome)
        }

        Command::ListStaff => {
            let staff = service.list_staff().context("listing staff")?;
            if cli.json {
                out.write_all(render::json(&staff)?.as_bytes())?;
            } else {
                out.write_all(render::staff_table(&staff).as_bytes())?;
            }
            Ok(Status::Success)
        }

        Command::Links => {
            let links = service
                .list_supervisor_links()
                .context("listing supervisor links")?;
            if cli.json {
                out.write_all(render::json(&links)?.as_bytes())?;
            } else {
                out.write_all(render::link_table(&links).as_bytes())?;
            }
            Ok(Status::Success)
        }

        Command::Logs {
            employee_id: raw_id,
            range,
        } => {
            let id = employee_id(raw_id)?;
            let outcome = match range.parse()? {
                Some(range) => service.list_logs_of_employee_in_range(id, range),
                None => service.list_logs_of_employee(id),
            }
            .context("listing PT logs of employee")?;
            listing(cli, out, outcome, LogView::Employee)
        }

        Command::TeamLogs {
            manager_id: raw_id,
            range,
        } => {
            let id = employee_id(raw_id)?;
            let outcome = match range.parse()? {
                Some(range) => service.list_logs_under_manager_in_range(id, range),
                None => service.list_logs_under_manager(id),
            }
            .context("listing PT logs under manager")?;
            listing(cli, out, outcome, LogView::Team)
        }

        Command::DeleteLogs {
            employee_id: raw_id,
            from,
            to,
        } => {
            let id = employee_id(raw_id)?;
            let range = parse_range(from, to)?;
            let outcome = service
                .delete_logs_of_employee_in_range(id, range)
                .context("deleting PT logs")?;
            if let Outcome::Completed(removed) = &outcome {
                writeln!(out, "Deleted {removed} log(s).")?;
            }
            report(out, outcome)
        }

        Command::Version => {
            let version = service.session().version().context("reading storage version")?;
            writeln!(out, "ptlog {} (sqlite {version})", env!("CARGO_PKG_VERSION"))?;
            Ok(Status::Success)
        }
    }
}

fn report<T>(out: &mut impl Write, outcome: Outcome<T>) -> anyhow::Result<Status> {
    match outcome {
        Outcome::Completed(_) => {
            writeln!(out, "Command execution successful.")?;
            Ok(Status::Success)
        }
        Outcome::Rejected(reason) => {
            writeln!(out, "Command execution failed: {reason}.")?;
            Ok(Status::Failed)
        }
    }
}

fn listing(
    cli: &Cli,
    out: &mut impl Write,
    outcome: Outcome<Vec<ptlog_core::LogEntry>>,
    view: LogView,
) -> anyhow::Result<Status> {
    let logs = match outcome {
        Outcome::Completed(logs) => logs,
        rejected => return report(out, rejected),
    };

    let text = if cli.json {
        render::json(&logs)?
    } else {
        match view {
            LogView::Employee => render::log_table(&logs),
            LogView::Team => render::team_log_table(&logs),
        }
    };
    out.write_all(text.as_bytes())?;
    Ok(Status::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["ptlog"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn exec(service: &mut DirectoryService, args: &[&str]) -> (Status, String) {
        let mut out = Vec::new();
        let status = run(&cli(args), service, &mut out).unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_promote_assign_and_list() {
        let mut svc = DirectoryService::open_in_memory().unwrap();

        let (status, text) = exec(&mut svc, &["add-staff", "Alice"]);
        assert_eq!(status, Status::Success);
        assert!(text.contains("Added staff member 1."));
        assert!(text.contains("Command execution successful."));

        exec(&mut svc, &["add-staff", "Bob"]);
        assert_eq!(exec(&mut svc, &["promote", "1"]).0, Status::Success);
        assert_eq!(exec(&mut svc, &["assign", "2", "1"]).0, Status::Success);

        let (_, table) = exec(&mut svc, &["list-staff"]);
        assert!(table.contains("|1                    |Alice                |Manager"));
        assert!(table.contains("|2                    |Bob                  |Team Member"));

        let (_, links) = exec(&mut svc, &["links"]);
        assert_eq!(links.lines().nth(1), Some("|2                    |1                   |"));
    }

    #[test]
    fn rejected_operation_reports_reason() {
        let mut svc = DirectoryService::open_in_memory().unwrap();
        let (status, text) = exec(&mut svc, &["promote", "9"]);
        assert_eq!(status, Status::Failed);
        assert_eq!(text, "Command execution failed: employee 9 not found.\n");
    }

    #[test]
    fn invalid_input_never_reaches_storage() {
        let mut svc = DirectoryService::open_in_memory().unwrap();
        exec(&mut svc, &["add-staff", "Alice"]);

        let (status, text) = exec(&mut svc, &["add-log", "1", "bad date", "2024-13-01"]);
        assert_eq!(status, Status::Failed);
        assert!(text.starts_with("Invalid input:"), "{text}");

        let (status, text) = exec(&mut svc, &["promote", "one"]);
        assert_eq!(status, Status::Failed);
        assert!(text.contains("'one' is not a valid id"));

        let (status, _) = exec(
            &mut svc,
            &["delete-logs", "1", "--from", "2024-02-01", "--to", "2024-01-01"],
        );
        assert_eq!(status, Status::Failed);

        let (status, _) = exec(&mut svc, &["add-staff", "   "]);
        assert_eq!(status, Status::Failed);
        assert_eq!(svc.list_staff().unwrap().len(), 1);
    }

    #[test]
    fn logs_listing_with_and_without_range() {
        let mut svc = DirectoryService::open_in_memory().unwrap();
        exec(&mut svc, &["add-staff", "Bob"]);
        exec(&mut svc, &["add-log", "1", "older", "2024-01-01"]);
        exec(&mut svc, &["add-log", "1", "newer", "2024-02-01"]);

        let (_, all) = exec(&mut svc, &["logs", "1"]);
        let older = all.find("older").unwrap();
        let newer = all.find("newer").unwrap();
        assert!(older < newer, "full listing should be ascending");

        let (_, ranged) = exec(
            &mut svc,
            &["logs", "1", "--from", "2024-01-01", "--to", "2024-12-31"],
        );
        assert!(ranged.find("newer").unwrap() < ranged.find("older").unwrap());
    }

    #[test]
    fn range_flags_must_come_together() {
        let parsed = Cli::try_parse_from(["ptlog", "logs", "1", "--from", "2024-01-01"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn team_logs_as_json() {
        let mut svc = DirectoryService::open_in_memory().unwrap();
        exec(&mut svc, &["add-staff", "Alice"]);
        exec(&mut svc, &["add-staff", "Bob"]);
        exec(&mut svc, &["promote", "1"]);
        exec(&mut svc, &["assign", "2", "1"]);
        exec(&mut svc, &["add-log", "2", "sprint review", "2024-01-10"]);

        let (status, text) = exec(&mut svc, &["--json", "team-logs", "1"]);
        assert_eq!(status, Status::Success);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["employee_id"], 2);
        assert_eq!(value[0]["details"], "sprint review");
    }

    #[test]
    fn delete_logs_reports_count() {
        let mut svc = DirectoryService::open_in_memory().unwrap();
        exec(&mut svc, &["add-staff", "Bob"]);
        exec(&mut svc, &["add-log", "1", "gone", "2024-03-03"]);

        let (status, text) = exec(
            &mut svc,
            &["delete-logs", "1", "--from", "2024-03-01", "--to", "2024-03-31"],
        );
        assert_eq!(status, Status::Success);
        assert!(text.contains("Deleted 1 log(s)."));
    }

    #[test]
    fn version_mentions_sqlite() {
        let mut svc = DirectoryService::open_in_memory().unwrap();
        let (_, text) = exec(&mut svc, &["version"]);
        assert!(text.contains("sqlite 3"));
    }
}
