// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Built-in ringtones and the in-memory catalog snapshot.
//!
//! Scanning the managed directory lives in `ringer-fs`; this module only
//! knows the fixed system table, how custom ids are derived, and how to
//! search a snapshot once it is loaded.

use crate::model::Ringtone;

/// One row of the built-in ringtone table: `(id, name, slug)`.
pub type SystemTone = (&'static str, &'static str, &'static str);

/// The built-in ringtones, in display order. `default_1` is the default.
pub const SYSTEM_RINGTONES: &[SystemTone] = &[
    ("default_1", "Classic Ring", "classic"),
    ("default_2", "Digital", "digital"),
    ("default_3", "Melody", "melody"),
    ("default_4", "Pulse", "pulse"),
    ("default_5", "Echo", "echo"),
    ("default_6", "Chime", "chime"),
    ("default_7", "Ascending", "ascending"),
    ("default_8", "Bell", "bell"),
    ("default_9", "Piano", "piano"),
    ("default_10", "Guitar", "guitar"),
];

/// Prefix of every custom ringtone id.
pub const CUSTOM_ID_PREFIX: &str = "custom_";

/// Materialise [`SYSTEM_RINGTONES`].
pub fn system_ringtones() -> Vec<Ringtone> {
    SYSTEM_RINGTONES
        .iter()
        .enumerate()
        .map(|(idx, (id, name, slug))| Ringtone {
            id: (*id).to_owned(),
            name: (*name).to_owned(),
            uri: format!("system://ringtone/{slug}"),
            duration_seconds: None,
            is_custom: false,
            is_default: idx == 0,
        })
        .collect()
}

/// Display name for a stored file: the file name without its last extension.
///
/// A leading dot is not treated as an extension separator.
pub fn display_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => &file_name[..pos],
        _ => file_name,
    }
}

/// Build a custom ringtone entry from an id, its stored file name and location.
pub fn custom_ringtone(id: String, file_name: &str, uri: String) -> Ringtone {
    Ringtone {
        id,
        name: display_name(file_name).to_owned(),
        uri,
        duration_seconds: None,
        is_custom: true,
        is_default: false,
    }
}

/// A loaded catalog: system tones followed by custom tones.
///
/// Lookups are linear; the catalog holds tens of entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingtoneList {
    ringtones: Vec<Ringtone>,
}

impl RingtoneList {
    /// Wrap an already ordered list.
    pub fn new(ringtones: Vec<Ringtone>) -> Self {
        Self { ringtones }
    }

    /// All entries in catalog order.
    pub fn all(&self) -> &[Ringtone] {
        &self.ringtones
    }

    /// Entry with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Ringtone> {
        self.ringtones.iter().find(|r| r.id == id)
    }

    /// Built-in entries.
    pub fn system(&self) -> impl Iterator<Item = &Ringtone> {
        self.ringtones.iter().filter(|r| !r.is_custom)
    }

    /// User-imported entries.
    pub fn custom(&self) -> impl Iterator<Item = &Ringtone> {
        self.ringtones.iter().filter(|r| r.is_custom)
    }

    /// The entry flagged as default, if any.
    pub fn default_entry(&self) -> Option<&Ringtone> {
        self.ringtones.iter().find(|r| r.is_default)
    }

    /// Resolve a stored mapping against this snapshot.
    pub fn resolve(&self, ringtone_id: Option<&str>) -> Assignment<'_> {
        match ringtone_id {
            None => Assignment::Unassigned,
            Some(id) => self
                .find_by_id(id)
                .map_or(Assignment::Missing, Assignment::Ringtone),
        }
    }
}

/// What a contact or SIM currently rings with, as seen through a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Assignment<'a> {
    /// Mapped to a ringtone present in the catalog.
    Ringtone(&'a Ringtone),
    /// Mapped to a ringtone that no longer exists (e.g. a deleted import).
    Missing,
    /// No mapping.
    Unassigned,
}

impl Assignment<'_> {
    /// Label for display; anything not resolvable shows as `Default`.
    pub fn label(&self) -> &str {
        match self {
            Self::Ringtone(r) => &r.name,
            Self::Missing | Self::Unassigned => "Default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_table_has_one_default_and_stable_ids() {
        let list = RingtoneList::new(system_ringtones());
        assert_eq!(list.all().len(), 10);
        assert_eq!(list.system().count(), 10);
        assert_eq!(list.custom().count(), 0);
        assert_eq!(list.all().iter().filter(|r| r.is_default).count(), 1);
        assert_eq!(list.default_entry().map(|r| r.id.as_str()), Some("default_1"));
        let melody = list.find_by_id("default_3").unwrap();
        assert_eq!(melody.name, "Melody");
        assert_eq!(melody.uri, "system://ringtone/melody");
    }

    #[test]
    fn display_name_strips_only_the_last_extension() {
        assert_eq!(display_name("beep.mp3"), "beep");
        assert_eq!(display_name("my.song.ogg"), "my.song");
        assert_eq!(display_name("noext"), "noext");
        assert_eq!(display_name(".hidden"), ".hidden");
    }

    #[test]
    fn missing_ringtone_resolves_to_default_label() {
        let list = RingtoneList::new(system_ringtones());
        assert_eq!(list.resolve(Some("default_2")).label(), "Digital");
        assert_eq!(list.resolve(Some("custom_gone")), Assignment::Missing);
        assert_eq!(list.resolve(Some("custom_gone")).label(), "Default");
        assert_eq!(list.resolve(None).label(), "Default");
    }
}
