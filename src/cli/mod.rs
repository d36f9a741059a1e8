pub mod context;
pub mod graph_commands;
pub mod intersect_command;
pub mod snapshot_commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "chatgraph",
    author,
    version,
    about = "Social graph and group overlap analysis for a messaging account",
    long_about = None
)]
pub struct Cli {
    /// Snapshot database path
    #[arg(long, env = "CHATGRAPH_DB", default_value = ".data/chatgraph.db", global = true)]
    pub db: PathBuf,

    /// Read live from a messaging bridge instead of the snapshot database
    #[arg(long, env = "CHATGRAPH_BRIDGE_URL", global = true)]
    pub bridge: Option<String>,

    /// Per-request timeout for the bridge, in seconds
    #[arg(long, env = "CHATGRAPH_BRIDGE_TIMEOUT", default_value_t = 10, global = true)]
    pub bridge_timeout_secs: u64,

    /// How often to poll the bridge for a ready session
    #[arg(long, default_value_t = 30, global = true)]
    pub ready_attempts: u32,

    /// Pause between readiness polls, in milliseconds
    #[arg(long, default_value_t = 1000, global = true)]
    pub ready_interval_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a snapshot JSON file into the database
    Import {
        /// Snapshot document ({ account, contacts, chats })
        json: PathBuf,
    },

    /// Store what the bridge currently serves as a new snapshot
    Capture,

    /// Build the social graph and write node/edge CSV files
    Graph {
        /// Only include contacts saved in the address book
        #[arg(long)]
        saved_only: bool,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// List members a group shares with every other group
    Intersect {
        /// Group name (substring) or group id ending in @g.us
        #[arg(long)]
        group: Option<String>,

        /// Match the group name exactly instead of by substring
        #[arg(long)]
        exact: bool,

        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count shared groups for every pair of saved contacts
    CoMembership {
        #[arg(long, default_value = "co_membership.csv")]
        out: PathBuf,
    },

    /// Write contacts.json and groups.json
    ExportContacts {
        #[arg(long, default_value = "export")]
        out_dir: PathBuf,

        /// Also request profile picture URLs
        #[arg(long)]
        pictures: bool,
    },

    /// Download the profile pictures listed in an exported contacts.json
    DownloadPictures {
        /// Folder holding contacts.json from export-contacts
        #[arg(long, default_value = "export")]
        export_dir: PathBuf,

        #[arg(long, default_value = "images")]
        images_dir: PathBuf,

        /// Download again even if a picture is already saved
        #[arg(short, long)]
        renew: bool,
    },
}

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> ExitCode {
    match &cli.command {
        Commands::Import { json } => snapshot_commands::import(cli, json),
        Commands::Capture => snapshot_commands::capture(cli),
        Commands::Graph { saved_only, out_dir } => graph_commands::graph(cli, *saved_only, out_dir),
        Commands::Intersect { group, exact, json } => {
            intersect_command::run(cli, group.as_deref(), *exact, *json)
        }
        Commands::CoMembership { out } => graph_commands::co_membership_graph(cli, out),
        Commands::ExportContacts { out_dir, pictures } => {
            snapshot_commands::export_contacts(cli, out_dir, *pictures)
        }
        Commands::DownloadPictures {
            export_dir,
            images_dir,
            renew,
        } => snapshot_commands::download_pictures(export_dir, images_dir, *renew),
    }
}
