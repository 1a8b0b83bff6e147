// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ringtone catalog over the managed directory.
//!
//! The directory listing is the only record of which custom ringtones
//! exist. Ids are derived from the stored file name, so importing two
//! files with the same name overwrites the first.

use ringer_core::catalog::{custom_ringtone, system_ringtones, RingtoneList, CUSTOM_ID_PREFIX};
use ringer_core::ports::AudioPicker;
use ringer_core::{Fetched, RingerError, Ringtone};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Hex digits of the BLAKE3 digest kept in a custom id.
const ID_DIGEST_LEN: usize = 16;

/// Id of the custom ringtone stored as `file_name`.
pub fn custom_ringtone_id(file_name: &str) -> String {
    let hex = blake3::hash(file_name.as_bytes()).to_hex();
    format!("{CUSTOM_ID_PREFIX}{}", &hex.as_str()[..ID_DIGEST_LEN])
}

/// System ringtones plus the files in one managed directory.
///
/// Stateless: every call re-reads the directory.
#[derive(Debug, Clone)]
pub struct RingtoneCatalog {
    dir: PathBuf,
}

impl RingtoneCatalog {
    /// Catalog over `dir`. The directory is created on first import.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The managed directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Custom ringtones currently in the managed directory, by file name.
    ///
    /// A missing directory is `Empty`; an unreadable one is `Failed`.
    pub fn scan_custom(&self) -> Fetched<Vec<Ringtone>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Fetched::Empty,
            Err(err) => return Fetched::Failed(format!("{}: {err}", self.dir.display())),
        };

        let mut custom = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => return Fetched::Failed(err.to_string()),
            };
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                warn!(path = %entry.path().display(), "skipping non UTF-8 ringtone file name");
                continue;
            };
            // Dotfiles include in-flight import temporaries.
            if name.starts_with('.') {
                continue;
            }
            custom.push(self.entry_for(&name));
        }
        custom.sort_by(|a, b| a.uri.cmp(&b.uri));
        Fetched::Found(custom)
    }

    /// Every system ringtone followed by the custom ones.
    ///
    /// Never fails: an unreadable directory yields the system set only.
    pub fn list_all(&self) -> Vec<Ringtone> {
        let mut all = system_ringtones();
        all.extend(self.scan_custom().or_default_logged("custom ringtones"));
        all
    }

    /// [`list_all`](Self::list_all) as a searchable snapshot.
    pub fn load(&self) -> RingtoneList {
        RingtoneList::new(self.list_all())
    }

    /// Ask `picker` for an audio file and import it.
    ///
    /// Returns `Ok(None)` when the user cancels.
    pub fn import<P>(&self, picker: &P) -> Result<Option<Ringtone>, RingerError>
    where
        P: AudioPicker + ?Sized,
    {
        match picker.pick_audio_file()? {
            None => Ok(None),
            Some(file) => self.import_file(&file.name, &file.source).map(Some),
        }
    }

    /// Copy `source` into the managed directory as `name`.
    ///
    /// The copy goes through a hidden temporary and is renamed into place,
    /// so a failed import never shows up in a listing.
    pub fn import_file(&self, name: &str, source: &Path) -> Result<Ringtone, RingerError> {
        if name.is_empty()
            || name.starts_with('.')
            || Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name)
        {
            return Err(RingerError::import(format!("unusable file name {name:?}")));
        }
        match fs::metadata(source) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(RingerError::import(format!(
                    "{} is not a file",
                    source.display()
                )))
            }
            Err(err) => return Err(RingerError::import_io("source file does not exist", err)),
        }

        fs::create_dir_all(&self.dir)
            .map_err(|err| RingerError::import_io("could not create ringtone directory", err))?;

        let dest = self.dir.join(name);
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|err| RingerError::import_io("could not stage copy", err))?;
        let mut src =
            File::open(source).map_err(|err| RingerError::import_io("could not open source", err))?;
        io::copy(&mut src, &mut tmp).map_err(|err| RingerError::import_io("copy failed", err))?;
        tmp.persist(&dest)
            .map_err(|err| RingerError::import_io("could not move copy into place", err.error))?;

        let ringtone = self.entry_for(name);
        info!(id = %ringtone.id, name = %ringtone.name, "imported custom ringtone");
        Ok(ringtone)
    }

    /// Remove a custom ringtone's file.
    ///
    /// Returns `Ok(false)` for system ringtones, for files outside the
    /// managed directory, and when the file is already gone.
    pub fn delete_custom(&self, ringtone: &Ringtone) -> Result<bool, RingerError> {
        if !ringtone.is_custom {
            return Ok(false);
        }
        let path = Path::new(&ringtone.uri);
        if path.parent() != Some(self.dir.as_path()) {
            warn!(uri = %ringtone.uri, "refusing to delete a file outside the ringtone directory");
            return Ok(false);
        }
        match fs::remove_file(path) {
            Ok(()) => {
                info!(id = %ringtone.id, "deleted custom ringtone");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(RingerError::Io(err)),
        }
    }

    fn entry_for(&self, file_name: &str) -> Ringtone {
        custom_ringtone(
            custom_ringtone_id(file_name),
            file_name,
            self.dir.join(file_name).to_string_lossy().into_owned(),
        )
    }
}
