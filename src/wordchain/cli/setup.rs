use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "wordchain", bin_name = "wordchain", version = get_version())]
#[command(about = "Vocabulary flashcards with dictionary lookup and spaced review", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Review(ReviewCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Look up a word and add it to your list
    #[command(alias = "a", display_order = 1)]
    Add {
        /// The word (multiple arguments are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        word: Vec<String>,

        /// Definition to use instead of the looked-up one
        #[arg(short, long)]
        definition: Option<String>,

        /// Pronunciation to use instead of the looked-up one
        #[arg(short, long)]
        pronunciation: Option<String>,

        /// Part of speech (noun, verb, adjective, ...)
        #[arg(long)]
        pos: Option<String>,

        /// Skip the dictionary lookup
        #[arg(long)]
        offline: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Look up a word without saving it
    #[command(display_order = 2)]
    Lookup {
        #[arg(required = true, num_args = 1..)]
        word: Vec<String>,

        /// Print the raw {success, data | error} response
        #[arg(long)]
        json: bool,
    },

    /// List entries
    #[command(alias = "ls", display_order = 3)]
    List {
        /// all, new, consolidating, long-term or due
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Only entries whose word or definition contains this
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show entries in full
    #[command(alias = "v", display_order = 4)]
    View {
        /// Indexes (e.g. 1 3-5) or a word
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// List entries due today
    #[command(display_order = 10)]
    Due,

    /// Walk through due entries and grade them
    #[command(display_order = 11)]
    Study {
        /// Show definitions straight away
        #[arg(long)]
        reveal: bool,
    },

    /// Mark entries as remembered
    #[command(display_order = 12)]
    Pass {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Mark entries as forgotten
    #[command(display_order = 13)]
    Fail {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Move entries to tomorrow
    #[command(display_order = 14)]
    Postpone {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Delete entries
    #[command(alias = "rm", display_order = 20)]
    Delete {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Show progress counts
    #[command(display_order = 21)]
    Stats,

    /// Write a JSON backup (stdout when no file is given)
    #[command(display_order = 22)]
    Export { file: Option<PathBuf> },

    /// Replace all data with a JSON backup
    #[command(alias = "import", display_order = 23)]
    Restore { file: PathBuf },

    /// Delete all entries and settings
    #[command(display_order = 24)]
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show or change settings (hide-meanings, user-name)
    #[command(display_order = 30)]
    Settings {
        key: Option<String>,
        value: Option<String>,
    },

    /// Show the effective configuration
    #[command(display_order = 31)]
    Config {
        /// Print a commented wordchain.toml instead
        #[arg(long)]
        template: bool,
    },
}
