// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports for the platform capabilities Ringer consumes but does not own.

use crate::error::RingerError;
use crate::model::{Contact, SimCard};
use std::path::PathBuf;
use std::rc::Rc;

/// The device's contact store (read-only from Ringer's side).
pub trait ContactDirectory {
    /// Whether access has already been granted.
    fn has_access(&self) -> bool;
    /// Ask the user for access. Returns whether it was granted.
    fn request_access(&self) -> bool;
    /// All contacts, sorted the way the directory presents them.
    fn list_contacts(&self) -> Result<Vec<Contact>, RingerError>;
}

/// The telephony layer's view of SIM slots.
pub trait SimDirectory {
    /// SIM slots, fixed for the session.
    fn list_sims(&self) -> Vec<SimCard>;
}

/// A file the user chose in the audio picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    /// Original file name, extension included.
    pub name: String,
    /// Where the picker left the file.
    pub source: PathBuf,
}

/// External file-selection capability restricted to audio content.
pub trait AudioPicker {
    /// Let the user pick a file. `Ok(None)` means the user cancelled.
    fn pick_audio_file(&self) -> Result<Option<PickedFile>, RingerError>;
}

/// Native ringtone-assignment capability of the host OS.
///
/// Optional: where the platform has none, use [`UnavailableDevice`], which
/// answers `false`/`None` to everything.
pub trait DeviceRingtones {
    /// Write `ringtone_uri` into the OS contact record of `contact_id`.
    fn set_ringtone_for_contact(&self, contact_id: &str, ringtone_uri: &str) -> bool;
    /// Set the device-wide default ringtone.
    fn set_default_ringtone(&self, ringtone_uri: &str) -> bool;
    /// Ringtone URI currently stored on the OS contact record.
    fn ringtone_for_contact(&self, contact_id: &str) -> Option<String>;
    /// Whether the app may write system ringtone settings.
    fn is_permission_granted(&self) -> bool;
    /// Ask for the write-settings permission. Returns whether it was granted.
    fn request_permission(&self) -> bool;
}

impl<D> DeviceRingtones for Rc<D>
where
    D: DeviceRingtones + ?Sized,
{
    fn set_ringtone_for_contact(&self, contact_id: &str, ringtone_uri: &str) -> bool {
        (**self).set_ringtone_for_contact(contact_id, ringtone_uri)
    }

    fn set_default_ringtone(&self, ringtone_uri: &str) -> bool {
        (**self).set_default_ringtone(ringtone_uri)
    }

    fn ringtone_for_contact(&self, contact_id: &str) -> Option<String> {
        (**self).ringtone_for_contact(contact_id)
    }

    fn is_permission_granted(&self) -> bool {
        (**self).is_permission_granted()
    }

    fn request_permission(&self) -> bool {
        (**self).request_permission()
    }
}

/// Stand-in for platforms without a native ringtone capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableDevice;

impl DeviceRingtones for UnavailableDevice {
    fn set_ringtone_for_contact(&self, contact_id: &str, _ringtone_uri: &str) -> bool {
        tracing::warn!(contact_id, "native ringtone support not available on this platform");
        false
    }

    fn set_default_ringtone(&self, _ringtone_uri: &str) -> bool {
        tracing::warn!("native ringtone support not available on this platform");
        false
    }

    fn ringtone_for_contact(&self, _contact_id: &str) -> Option<String> {
        None
    }

    fn is_permission_granted(&self) -> bool {
        false
    }

    fn request_permission(&self) -> bool {
        false
    }
}

/// Host platform family, as far as SIM reporting is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Dual-SIM capable.
    Android,
    /// Everything else; exposes a single synthetic SIM.
    #[default]
    Other,
}

/// SIM directory with a fixed slot list chosen per platform.
#[derive(Debug, Clone)]
pub struct StaticSimDirectory {
    sims: Vec<SimCard>,
}

impl StaticSimDirectory {
    /// Use an explicit list.
    pub fn new(sims: Vec<SimCard>) -> Self {
        Self { sims }
    }

    /// Slots reported by default on `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        let sim = |id: &str, name: &str, slot: u32, carrier: &str| SimCard {
            id: id.to_owned(),
            display_name: name.to_owned(),
            slot_index: slot,
            carrier_name: Some(carrier.to_owned()),
        };
        let sims = match platform {
            Platform::Android => vec![
                sim("sim1", "SIM 1", 0, "Carrier 1"),
                sim("sim2", "SIM 2", 1, "Carrier 2"),
            ],
            Platform::Other => vec![sim("sim1", "Primary SIM", 0, "Carrier")],
        };
        Self { sims }
    }
}

impl SimDirectory for StaticSimDirectory {
    fn list_sims(&self) -> Vec<SimCard> {
        self.sims.clone()
    }
}
