use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for habitlog
/// CLI application to log daily habits with SQLite
#[derive(Parser)]
#[command(
    name = "habitlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small habit tracker: log daily habits, import spreadsheets and review monthly trends using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user instead of `default_user` from the configuration
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

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
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "habits", help = "List the known habits and their aliases")]
        habits: bool,

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

    /// Manage the database (migrations, integrity checks, bulk clear)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "clear", help = "Delete every daily log of the current user")]
        clear: bool,

        #[arg(long = "all-users", requires = "clear", help = "With --clear: delete logs of every user")]
        all_users: bool,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "last", value_name = "N", help = "Only the last N rows")]
        last: Option<usize>,
    },

    /// Log habits for a day (insert or update)
    Add {
        /// Date of the log (YYYY-MM-DD, today, yesterday)
        date: String,

        /// Habit values as key=value (e.g. coffee=yes water=5 mood=good); key= removes
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// Delete the log of a day
    Del {
        date: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List daily logs
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range (default: current month)")]
        period: Option<String>,

        #[arg(long = "all-users", help = "Show logs of every user")]
        all_users: bool,

        #[arg(long = "last", value_name = "N", conflicts_with = "period", help = "Only the N most recent days")]
        last: Option<usize>,
    },

    /// Monthly report: per-day series of one habit or a summary of all habits
    Month {
        /// Month to report (YYYY-MM, default: current month)
        month: Option<String>,

        #[arg(long, short, help = "Habit to show day by day")]
        field: Option<String>,

        #[arg(long, help = "Print the series as JSON")]
        json: bool,
    },

    /// Import a spreadsheet CSV export
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "dry-run", help = "Parse and report without writing")]
        dry_run: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Restore daily logs from a JSON export
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Export daily logs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long = "all-users", help = "Export logs of every user")]
        all_users: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
