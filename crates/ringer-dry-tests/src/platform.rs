// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scripted stand-ins for the contact directory, audio picker and device port.

use ringer_core::error::RingerError;
use ringer_core::model::Contact;
use ringer_core::ports::{AudioPicker, ContactDirectory, DeviceRingtones, PickedFile};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Contact directory with a fixed list and scripted permission answers.
#[derive(Debug, Default)]
pub struct FakeContactDirectory {
    contacts: Vec<Contact>,
    granted: Cell<bool>,
    grant_on_request: bool,
    requests: Cell<usize>,
}

impl FakeContactDirectory {
    /// Access already granted.
    pub fn granted(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            granted: Cell::new(true),
            grant_on_request: true,
            requests: Cell::new(0),
        }
    }

    /// Access not yet granted; `grant_on_request` decides the user's answer.
    pub fn ungranted(contacts: Vec<Contact>, grant_on_request: bool) -> Self {
        Self {
            contacts,
            granted: Cell::new(false),
            grant_on_request,
            requests: Cell::new(0),
        }
    }

    /// How many times access was requested.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl ContactDirectory for FakeContactDirectory {
    fn has_access(&self) -> bool {
        self.granted.get()
    }

    fn request_access(&self) -> bool {
        self.requests.set(self.requests.get() + 1);
        if self.grant_on_request {
            self.granted.set(true);
        }
        self.granted.get()
    }

    fn list_contacts(&self) -> Result<Vec<Contact>, RingerError> {
        if !self.granted.get() {
            return Err(RingerError::PermissionDenied("contacts".into()));
        }
        Ok(self.contacts.clone())
    }
}

/// Picker that replays queued answers; an empty queue means "cancelled".
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    answers: RefCell<VecDeque<Option<PickedFile>>>,
}

impl ScriptedPicker {
    /// Queue a file selection.
    pub fn pick(self, name: &str, source: impl Into<PathBuf>) -> Self {
        self.answers.borrow_mut().push_back(Some(PickedFile {
            name: name.to_owned(),
            source: source.into(),
        }));
        self
    }

    /// Queue a cancellation.
    pub fn cancel(self) -> Self {
        self.answers.borrow_mut().push_back(None);
        self
    }
}

impl AudioPicker for ScriptedPicker {
    fn pick_audio_file(&self) -> Result<Option<PickedFile>, RingerError> {
        Ok(self.answers.borrow_mut().pop_front().flatten())
    }
}

/// Device port that records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    /// `(contact_id, uri)` pairs written so far.
    pub contact_writes: RefCell<Vec<(String, String)>>,
    /// Default ringtone URI, once set.
    pub default_uri: RefCell<Option<String>>,
    permission: Cell<bool>,
}

impl RecordingDevice {
    /// Device with the write-settings permission already granted.
    pub fn permitted() -> Self {
        let device = Self::default();
        device.permission.set(true);
        device
    }
}

impl DeviceRingtones for RecordingDevice {
    fn set_ringtone_for_contact(&self, contact_id: &str, ringtone_uri: &str) -> bool {
        if !self.permission.get() {
            return false;
        }
        self.contact_writes
            .borrow_mut()
            .push((contact_id.to_owned(), ringtone_uri.to_owned()));
        true
    }

    fn set_default_ringtone(&self, ringtone_uri: &str) -> bool {
        if !self.permission.get() {
            return false;
        }
        *self.default_uri.borrow_mut() = Some(ringtone_uri.to_owned());
        true
    }

    fn ringtone_for_contact(&self, contact_id: &str) -> Option<String> {
        self.contact_writes
            .borrow()
            .iter()
            .rev()
            .find(|(id, _)| id == contact_id)
            .map(|(_, uri)| uri.clone())
    }

    fn is_permission_granted(&self) -> bool {
        self.permission.get()
    }

    fn request_permission(&self) -> bool {
        self.permission.set(true);
        true
    }
}
