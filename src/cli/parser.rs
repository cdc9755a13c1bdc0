use crate::export::ExportFormat;
use crate::models::frequency::WateringFrequency;
use clap::{Parser, Subcommand};

/// Command-line interface definition for ecopot
/// Plant care from the terminal: watering schedules, reminders, sensors
#[derive(Parser)]
#[command(
    name = "ecopot",
    version = env!("CARGO_PKG_VERSION"),
    about = "Plant care CLI: track watering, get reminders and read your plant sensors",
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

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

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
    },

    /// Add a plant to the collection
    Add {
        /// Plant name (can be filled in by --identify)
        #[arg(long)]
        name: Option<String>,

        /// Species (can be filled in by --identify)
        #[arg(long)]
        species: Option<String>,

        /// Watering frequency (defaults to the configured one)
        #[arg(long, value_enum)]
        frequency: Option<WateringFrequency>,

        /// Path to a photo of the plant
        #[arg(long)]
        image: Option<String>,

        /// Free-form care notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Identify the plant from --image before saving
        #[arg(long)]
        identify: bool,
    },

    /// List plants with their watering schedule and health
    List {
        /// Show only plants that need watering now
        #[arg(long)]
        due: bool,

        /// Keep running and redraw the list whenever it changes
        #[arg(long)]
        follow: bool,
    },

    /// Mark a plant as watered
    Water {
        /// Plant ID
        id: i64,

        /// When it was watered (YYYY-MM-DD or RFC 3339, default: now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Create watering reminders for every plant that is due
    Notify,

    /// Create watering reminders periodically
    Watch {
        /// Minutes between checks (default: notify_interval_minutes)
        #[arg(long)]
        interval: Option<u64>,

        /// Stop after this many checks
        #[arg(long)]
        runs: Option<usize>,
    },

    /// Show and manage notifications
    Notifications {
        /// Show unread notifications only
        #[arg(long)]
        unread: bool,

        /// Mark a notification as read
        #[arg(long, value_name = "ID")]
        read: Option<i64>,

        /// Delete all notifications
        #[arg(long)]
        clear: bool,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,

        /// Keep running and redraw the list whenever it changes
        #[arg(long)]
        follow: bool,
    },

    /// Live sensor dashboard (MQTT, or "<topic> <value>" lines on stdin)
    Sensors {
        #[arg(long)]
        stdin: bool,
    },

    /// Look for diseases in a plant photo
    Diagnose {
        #[arg(long)]
        image: String,
    },

    /// Ask the plant-care assistant a question
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Plant care guides and the tip of the day
    Care,

    /// Backup the database
    Backup {
        #[arg(long, help = "Destination backup file (absolute path)")]
        file: String,

        #[arg(long, help = "Compress the backup (zip on Windows, tar.gz elsewhere)")]
        compress: bool,
    },

    /// Export the plant list
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, help = "Output file (absolute path)")]
        file: String,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },
}
