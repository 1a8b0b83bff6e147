// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings repository: the JSON settings document behind a `KeyValueStore`.

use crate::error::RingerError;
use crate::fetch::Fetched;
use crate::model::RingtoneSettings;
use crate::store::KeyValueStore;
use std::sync::Mutex;
use tracing::debug;

/// Storage key of the settings document.
pub const SETTINGS_KEY: &str = "ringtone_settings";

/// Serializes [`RingtoneSettings`] and delegates storage to a `KeyValueStore`.
///
/// Every mutation is a load-mutate-save transaction run while holding an
/// internal lock, so two upserts through the same repository never lose
/// each other's changes.
pub struct SettingsRepository<S> {
    store: S,
    txn: Mutex<()>,
}

impl<S> SettingsRepository<S> {
    /// Create a new repository using the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            txn: Mutex::new(()),
        }
    }

    /// Consume the repository and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Mappings never hold a blank ringtone id; removal deletes the entry instead.
fn require_ringtone_id(ringtone_id: &str) -> Result<(), RingerError> {
    if ringtone_id.trim().is_empty() {
        return Err(RingerError::not_found("ringtone", ringtone_id));
    }
    Ok(())
}

impl<S> SettingsRepository<S>
where
    S: KeyValueStore,
{
    /// Load the document, keeping "missing" apart from "unreadable".
    pub fn load(&self) -> Fetched<RingtoneSettings> {
        match self.store.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) if raw.trim().is_empty() => Fetched::Empty,
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(doc) => Fetched::Found(doc),
                Err(err) => Fetched::Failed(format!("corrupt settings document: {err}")),
            },
            Ok(None) => Fetched::Empty,
            Err(err) => Fetched::Failed(err.to_string()),
        }
    }

    /// Load the document, falling back to an empty one when missing or corrupt.
    pub fn get_settings(&self) -> RingtoneSettings {
        self.load().or_default_logged("settings")
    }

    /// Serialize and overwrite the whole document.
    pub fn save_settings(&self, doc: &RingtoneSettings) -> Result<(), RingerError> {
        let _guard = self.lock();
        self.write(doc)
    }

    /// Run `mutate` against the current document and persist the result.
    ///
    /// `mutate` returns whether it changed anything; an unchanged document
    /// is not written back.
    pub fn update<F>(&self, mutate: F) -> Result<RingtoneSettings, RingerError>
    where
        F: FnOnce(&mut RingtoneSettings) -> bool,
    {
        let _guard = self.lock();
        let mut doc = self.get_settings();
        if mutate(&mut doc) {
            self.write(&doc)?;
        }
        Ok(doc)
    }

    /// Assign a ringtone to a contact (replace if mapped, append otherwise).
    pub fn set_contact_ringtone(
        &self,
        contact_id: &str,
        ringtone_id: &str,
    ) -> Result<(), RingerError> {
        require_ringtone_id(ringtone_id)?;
        self.update(|doc| {
            doc.upsert_contact(contact_id, ringtone_id);
            true
        })
        .map(drop)
    }

    /// Ringtone id assigned to `contact_id`.
    pub fn get_contact_ringtone(&self, contact_id: &str) -> Option<String> {
        self.get_settings()
            .contact_ringtone(contact_id)
            .map(str::to_owned)
    }

    /// Remove the contact's mapping. Returns whether a mapping existed.
    pub fn remove_contact_ringtone(&self, contact_id: &str) -> Result<bool, RingerError> {
        let mut removed = false;
        self.update(|doc| {
            removed = doc.remove_contact(contact_id);
            removed
        })?;
        Ok(removed)
    }

    /// Assign a ringtone to a SIM (replace if mapped, append otherwise).
    pub fn set_sim_ringtone(&self, sim_id: &str, ringtone_id: &str) -> Result<(), RingerError> {
        require_ringtone_id(ringtone_id)?;
        self.update(|doc| {
            doc.upsert_sim(sim_id, ringtone_id);
            true
        })
        .map(drop)
    }

    /// Ringtone id assigned to `sim_id`.
    pub fn get_sim_ringtone(&self, sim_id: &str) -> Option<String> {
        self.get_settings().sim_ringtone(sim_id).map(str::to_owned)
    }

    /// Remove the SIM's mapping. Returns whether a mapping existed.
    pub fn remove_sim_ringtone(&self, sim_id: &str) -> Result<bool, RingerError> {
        let mut removed = false;
        self.update(|doc| {
            removed = doc.remove_sim(sim_id);
            removed
        })?;
        Ok(removed)
    }

    /// Set the fallback ringtone.
    pub fn set_default_ringtone(&self, ringtone_id: &str) -> Result<(), RingerError> {
        require_ringtone_id(ringtone_id)?;
        self.update(|doc| {
            doc.default_ringtone_id = Some(ringtone_id.to_owned());
            true
        })
        .map(drop)
    }

    /// The fallback ringtone, if one was chosen.
    pub fn get_default_ringtone(&self) -> Option<String> {
        self.get_settings()
            .default_ringtone_id
            .filter(|id| !id.is_empty())
    }

    /// Delete the persisted document; the next read starts empty.
    pub fn clear_all(&self) -> Result<(), RingerError> {
        let _guard = self.lock();
        self.store
            .remove_item(SETTINGS_KEY)
            .map_err(RingerError::PersistenceFailure)?;
        debug!("settings cleared");
        Ok(())
    }

    fn write(&self, doc: &RingtoneSettings) -> Result<(), RingerError> {
        let data = serde_json::to_string(doc)
            .map_err(|err| RingerError::PersistenceFailure(err.into()))?;
        self.store
            .set_item(SETTINGS_KEY, &data)
            .map_err(RingerError::PersistenceFailure)?;
        debug!(
            contacts = doc.contact_mappings.len(),
            sims = doc.sim_mappings.len(),
            "settings saved"
        );
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.txn.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
