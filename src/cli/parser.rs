use crate::export::ExportFormat;
use crate::models::EntryType;
use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for rShiftlog
/// CLI application to track shifts, revenue and shared commission with SQLite
#[derive(Parser)]
#[command(
    name = "rshiftlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track employee shifts and daily revenue, and split the commission pool using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, value_name = "NAME", help = "Only lines of this operation (e.g. entry_set)")]
        operation: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeCmd,
    },

    /// Record work, vacation and sick days
    Entry {
        #[command(subcommand)]
        action: EntryCmd,
    },

    /// Record daily revenue
    Revenue {
        #[command(subcommand)]
        action: RevenueCmd,
    },

    /// Commission settings, thresholds and recomputation
    Commission {
        #[command(subcommand)]
        action: CommissionCmd,
    },

    /// Show the monthly report of one employee or all active employees
    Report {
        #[arg(long, value_name = "YYYY-MM")]
        month: String,

        #[arg(long, value_name = "ID", help = "Only this employee")]
        employee: Option<i64>,

        #[arg(long, help = "List every entry below the summary")]
        details: bool,
    },

    /// Export the monthly overview
    Export {
        #[arg(long, value_name = "YYYY-MM")]
        month: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[arg(long, short = 'd', help = "Include one row per entry")]
        details: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Add an employee
    Add {
        #[arg(long)]
        name: String,

        #[arg(long = "contract-hours", default_value_t = 0.0, help = "Contracted hours per week")]
        contract_hours: f64,

        #[arg(long = "commission", help = "Employee takes part in the commission pool")]
        has_commission: bool,

        #[arg(long, help = "Create the employee as inactive")]
        inactive: bool,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Employment start (default: today)")]
        start: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Employment end")]
        end: Option<String>,
    },

    /// Change an employee
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "contract-hours")]
        contract_hours: Option<f64>,

        #[arg(long = "commission", action = ArgAction::Set, value_name = "true|false")]
        has_commission: Option<bool>,

        #[arg(long = "active", action = ArgAction::Set, value_name = "true|false")]
        is_active: Option<bool>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        start: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "clear_end")]
        end: Option<String>,

        #[arg(long = "clear-end", help = "Remove the employment end date")]
        clear_end: bool,
    },

    /// List employees ordered by name
    List {
        #[arg(long, help = "Include inactive employees")]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum EntryCmd {
    /// Create or replace the entry of an employee for a day
    Set {
        #[arg(long, value_name = "ID")]
        employee: i64,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,

        #[arg(long = "type", value_enum, default_value = "work")]
        entry_type: EntryType,

        #[arg(long, value_name = "HH:MM")]
        start: Option<String>,

        #[arg(long, value_name = "HH:MM")]
        end: Option<String>,

        #[arg(long, default_value_t = 0, help = "Pause in minutes")]
        pause: i64,

        #[arg(long = "tours-before-18", default_value_t = 0)]
        tours_before_18: i64,

        #[arg(long = "tours-after-18", default_value_t = 0)]
        tours_after_18: i64,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Change an entry by id
    Update {
        id: i64,

        #[arg(long, value_name = "ID")]
        employee: Option<i64>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long = "type", value_enum)]
        entry_type: Option<EntryType>,

        #[arg(long, value_name = "HH:MM")]
        start: Option<String>,

        #[arg(long, value_name = "HH:MM")]
        end: Option<String>,

        #[arg(long)]
        pause: Option<i64>,

        #[arg(long = "tours-before-18")]
        tours_before_18: Option<i64>,

        #[arg(long = "tours-after-18")]
        tours_after_18: Option<i64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an entry by id
    Del { id: i64 },

    /// List entries, newest first
    List {
        #[arg(long, value_name = "ID")]
        employee: Option<i64>,

        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RevenueCmd {
    /// Record the revenue of a day (replaces an earlier value)
    Set {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,

        #[arg(long)]
        amount: f64,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List recorded revenue, newest first
    List {
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CommissionCmd {
    /// Show the commission settings
    Show,

    /// Change percentage and/or monthly cap
    Set {
        #[arg(long, help = "Share of daily revenue in percent")]
        percentage: Option<f64>,

        #[arg(long = "max", help = "Cap per employee and month")]
        monthly_max: Option<f64>,
    },

    /// Add or replace a threshold rule
    Threshold {
        #[arg(long, help = "0 = Monday .. 6 = Sunday")]
        weekday: u32,

        #[arg(long = "employees", help = "Number of employees working that day")]
        employee_count: u32,

        #[arg(long, help = "Minimum revenue")]
        amount: f64,

        #[arg(long = "valid-from", value_name = "YYYY-MM-DD")]
        valid_from: Option<String>,
    },

    /// List threshold rules
    Thresholds,

    /// Recompute stored commissions for a day or a whole month
    Recompute {
        #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "month", required_unless_present = "month")]
        date: Option<String>,

        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },
}
