// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use ringer_core::ports::Platform;
use ringer_fs::BackendKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ringer", author, version, about = "Assign ringtones to contacts and SIM cards")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,
    #[command(subcommand)]
    pub command: Command,
}

/// Where state lives and which platform capabilities to use.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Root of the private data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "RINGER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
    /// Key-value storage backend
    #[arg(long, global = true, env = "RINGER_BACKEND", value_enum, default_value_t = BackendArg::Auto)]
    pub backend: BackendArg,
    /// JSON file standing in for the device contact directory
    #[arg(long, global = true, env = "RINGER_CONTACTS")]
    pub contacts: Option<PathBuf>,
    /// JSON file listing SIM slots (overrides --platform)
    #[arg(long, global = true, env = "RINGER_SIMS")]
    pub sims: Option<PathBuf>,
    /// Platform family used for the default SIM layout
    #[arg(long, global = true, env = "RINGER_PLATFORM", value_enum, default_value_t = PlatformArg::Other)]
    pub platform: PlatformArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    Auto,
    Secure,
    Local,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => Self::Auto,
            BackendArg::Secure => Self::Secure,
            BackendArg::Local => Self::Local,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformArg {
    Android,
    Other,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Android => Self::Android,
            PlatformArg::Other => Self::Other,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse and manage the ringtone library
    #[command(subcommand)]
    Ringtones(RingtonesCmd),
    /// Browse contacts with their assigned ringtones
    #[command(subcommand)]
    Contacts(ContactsCmd),
    /// Per-contact ringtone assignment
    #[command(subcommand)]
    Contact(MappingCmd),
    /// Per-SIM ringtone assignment
    #[command(subcommand)]
    Sim(SimCmd),
    /// Fallback ringtone
    #[command(subcommand)]
    Default(DefaultCmd),
    /// Raw settings document
    #[command(subcommand)]
    Settings(SettingsCmd),
}

#[derive(Subcommand, Debug)]
pub enum RingtonesCmd {
    /// List system and custom ringtones
    List {
        /// Only user-imported ringtones
        #[arg(long, conflicts_with = "system")]
        custom: bool,
        /// Only built-in ringtones
        #[arg(long)]
        system: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Copy an audio file into the ringtone library
    Import {
        /// Audio file to import
        file: PathBuf,
        /// Store under this file name instead of the source's
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a custom ringtone
    Delete {
        /// Ringtone id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContactsCmd {
    /// List contacts and their ringtones
    List {
        /// Filter by name or phone number
        #[arg(long)]
        query: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MappingCmd {
    /// Assign a ringtone
    Set {
        /// Contact id
        id: String,
        /// Ringtone id
        ringtone: String,
    },
    /// Show the assigned ringtone
    Get {
        /// Contact id
        id: String,
    },
    /// Remove the assignment
    Clear {
        /// Contact id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SimCmd {
    /// List SIM slots and their ringtones
    List,
    /// Assign a ringtone
    Set {
        /// SIM id
        id: String,
        /// Ringtone id
        ringtone: String,
    },
    /// Show the assigned ringtone
    Get {
        /// SIM id
        id: String,
    },
    /// Remove the assignment
    Clear {
        /// SIM id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DefaultCmd {
    /// Choose the fallback ringtone
    Set {
        /// Ringtone id
        ringtone: String,
    },
    /// Show the fallback ringtone
    Get,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCmd {
    /// Print the settings document as JSON
    Show,
    /// Delete every assignment
    Reset,
}
