// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Application-private directories.

use directories::ProjectDirs;
use ringer_core::StoreError;
use std::path::{Path, PathBuf};

/// Root of Ringer's private storage and the directories below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingerDirs {
    data: PathBuf,
}

impl RingerDirs {
    /// Use the platform data directory (e.g. `~/.local/share/ringer`).
    pub fn from_platform() -> Result<Self, StoreError> {
        let proj = ProjectDirs::from("dev", "ringer", "Ringer")
            .ok_or_else(|| StoreError::Unavailable("could not resolve data dir".into()))?;
        Ok(Self::at(proj.data_dir()))
    }

    /// Root everything at `data`.
    pub fn at(data: impl AsRef<Path>) -> Self {
        Self {
            data: data.as_ref().to_path_buf(),
        }
    }

    /// Root directory.
    pub fn data_dir(&self) -> &Path {
        &self.data
    }

    /// Where the key-value store keeps its files.
    pub fn store_dir(&self) -> PathBuf {
        self.data.join("store")
    }

    /// The managed directory holding imported ringtones.
    pub fn ringtone_dir(&self) -> PathBuf {
        self.data.join("ringtones")
    }
}
