use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rDashboard
#[derive(Parser)]
#[command(
    name = "rdashboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small dashboard CLI: moon phase, clock, weather and persistent counters, notes and stopwatches",
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CounterAction {
    /// Add one
    Inc,
    /// Remove one (never below zero)
    Dec,
    /// Back to zero
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StopwatchAction {
    Start,
    Stop,
    Reset,
    Lap,
    /// Print elapsed time and laps
    Show,
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
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show the dashboard: weather, clock, moon and all widgets
    Show,

    /// Add a widget
    Add {
        /// Widget type: notes, counter, stopwatch, basic
        kind: String,

        /// Title (defaults to a per-type title)
        #[arg(long)]
        title: Option<String>,

        /// Initial text (notes and basic widgets only)
        #[arg(long)]
        content: Option<String>,
    },

    /// List widgets
    List,

    /// Delete a widget by ID
    Del {
        /// Widget id (see `list`)
        id: String,

        /// Delete without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Change a counter widget
    Counter {
        id: String,

        #[arg(value_enum)]
        action: CounterAction,
    },

    /// Drive a stopwatch widget
    Stopwatch {
        id: String,

        #[arg(value_enum)]
        action: StopwatchAction,
    },

    /// Replace the text of a notes or basic widget
    Note { id: String, content: String },

    /// Print the moon phase
    Moon {
        /// Instant to compute the phase for (RFC 3339 or YYYY-MM-DD, default: now)
        #[arg(long)]
        date: Option<String>,

        /// Print the reading as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the weather tile
    Weather,

    /// Keep the dashboard live: refresh the clock and running stopwatches
    Watch {
        /// How long to run before exiting
        #[arg(long, default_value_t = 10)]
        seconds: u64,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
