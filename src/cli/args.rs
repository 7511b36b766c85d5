// file: src/cli/args.rs
// version: 1.0.0
// guid: a3b4c5d6-e6f7-4081-92a3-3a4b5c6d7e85

//! Command line argument definitions

use crate::module::LogType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "host-admin-agent")]
#[command(about = "Manage custom system modules and SSH access on this host")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(short, long, global = true, env = "HOST_ADMIN_CONFIG", help = "Configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the custom system module registry
    #[command(subcommand)]
    Module(ModuleCommand),

    /// Manage SSH access of local accounts
    #[command(subcommand)]
    Ssh(SshCommand),
}

#[derive(Subcommand)]
pub enum ModuleCommand {
    /// Add a custom system module
    Add(ModuleAddArgs),

    /// Remove a custom system module
    Remove { name: String },

    /// List registered modules
    List {
        #[arg(short, long)]
        json: bool,
    },

    /// Show one registered module
    Info { name: String },
}

#[derive(Args)]
pub struct ModuleAddArgs {
    /// Module name to add
    pub name: String,

    #[arg(short, long, help = "Description of the module")]
    pub description: Option<String>,

    #[arg(short, long, num_args = 1.., help = "Absolute path to log file to display")]
    pub log: Option<Vec<String>>,

    #[arg(
        short = 't',
        long,
        value_enum,
        num_args = 1..,
        default_values_t = vec![LogTypeArg::File],
        help = "Whether each log is a file or a systemd log"
    )]
    pub log_type: Vec<LogTypeArg>,

    #[arg(long, help = "Custom command checking the status of the service")]
    pub test_status: Option<String>,

    #[arg(long, help = "Custom command checking the configuration of the module")]
    pub test_conf: Option<String>,

    #[arg(long, num_args = 1.., help = "Ports that must be publicly exposed")]
    pub needs_exposed_ports: Vec<u16>,

    #[arg(long, help = "The module itself invokes administration commands")]
    pub need_lock: bool,

    #[arg(long, hide = true, help = "Deprecated, use --test-status")]
    pub status: Option<String>,
}

#[derive(Subcommand)]
pub enum SshCommand {
    /// Allow the user to log in over SSH
    Allow { username: String },

    /// Disallow the user to log in over SSH
    Disallow { username: String },

    /// Show the account as seen by SSH management
    Info {
        username: String,
        #[arg(short, long)]
        json: bool,
    },

    /// List the user's authorized keys
    ListKeys {
        username: String,
        #[arg(short, long)]
        json: bool,
    },

    /// Add an authorized key
    AddKey {
        username: String,
        key: String,
        #[arg(long)]
        comment: Option<String>,
    },

    /// Remove an authorized key
    RemoveKey { username: String, key: String },
}

/// Log type argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTypeArg {
    File,
    Systemd,
}

impl From<LogTypeArg> for LogType {
    fn from(arg: LogTypeArg) -> Self {
        match arg {
            LogTypeArg::File => LogType::File,
            LogTypeArg::Systemd => LogType::Systemd,
        }
    }
}
