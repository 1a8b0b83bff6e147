// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line stand-ins for the device's contact directory, SIM list and
//! file picker.

use ringer_core::model::{Contact, SimCard};
use ringer_core::ports::{AudioPicker, ContactDirectory, PickedFile, SimDirectory};
use ringer_core::RingerError;
use std::fs;
use std::path::{Path, PathBuf};

/// Contacts read from a JSON array on disk.
///
/// Without a file there is nothing to grant access to, so access is denied.
pub struct JsonContactDirectory {
    path: Option<PathBuf>,
}

impl JsonContactDirectory {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ContactDirectory for JsonContactDirectory {
    fn has_access(&self) -> bool {
        self.path.is_some()
    }

    fn request_access(&self) -> bool {
        self.has_access()
    }

    fn list_contacts(&self) -> Result<Vec<Contact>, RingerError> {
        let Some(path) = &self.path else {
            return Err(RingerError::PermissionDenied(
                "no contact source configured (use --contacts)".into(),
            ));
        };
        let raw = fs::read_to_string(path)?;
        let mut contacts: Vec<Contact> =
            serde_json::from_str(&raw).map_err(|source| RingerError::Malformed {
                what: format!("contact list {}", path.display()),
                source,
            })?;
        contacts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(contacts)
    }
}

/// SIM slots read from a JSON array on disk.
pub fn read_sims(path: &Path) -> anyhow::Result<Vec<SimCard>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Picker that "selects" a path given on the command line.
pub struct PathPicker {
    path: PathBuf,
    name: Option<String>,
}

impl PathPicker {
    pub fn new(path: PathBuf, name: Option<String>) -> Self {
        Self { path, name }
    }
}

impl AudioPicker for PathPicker {
    fn pick_audio_file(&self) -> Result<Option<PickedFile>, RingerError> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => self
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_owned)
                .ok_or_else(|| {
                    RingerError::import(format!("{} has no usable file name", self.path.display()))
                })?,
        };
        Ok(Some(PickedFile {
            name,
            source: self.path.clone(),
        }))
    }
}

/// SIM directory backed by a fixed list loaded at startup.
pub struct ListedSims(pub Vec<SimCard>);

impl SimDirectory for ListedSims {
    fn list_sims(&self) -> Vec<SimCard> {
        self.0.clone()
    }
}
