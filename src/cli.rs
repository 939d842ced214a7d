use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "vnetctl")]
#[command(version)]
#[command(about = "Reconcile SDN backend networks against control-plane mappings", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect and reconcile backend networks
    #[command(subcommand)]
    Networks(NetworksCommand),

    /// Manage distributed virtual adapters
    #[command(subcommand)]
    Adapters(AdaptersCommand),

    /// Resolve logical QoS policies into backend shaping configs
    #[command(subcommand)]
    Qos(QosCommand),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Networks Commands
// ============================================================================

#[derive(Subcommand)]
pub enum NetworksCommand {
    /// List all backend network objects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List mapped networks whose backend object is missing or mismatched
    Missing {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List backend networks the control plane does not account for
    Orphaned {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one backend network by its backend id
    Delete {
        /// Backend id of the network to delete
        backend_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

// ============================================================================
// Adapters Commands
// ============================================================================

#[derive(Subcommand)]
pub enum AdaptersCommand {
    /// Update an adapter's uplink teaming policy
    SetTeaming {
        /// Adapter id, e.g. adapter-12
        adapter_id: String,

        /// Teaming policy name (one of the backend's fixed set)
        policy: String,
    },
}

// ============================================================================
// QoS Commands
// ============================================================================

#[derive(Subcommand)]
pub enum QosCommand {
    /// Resolve a policy into the backend shaping configuration
    Resolve {
        /// Logical policy id
        policy_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show config file location and resolved settings
    Show,
}
