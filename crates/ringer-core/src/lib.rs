// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core services for Ringer: the ringtone data model, the settings
//! repository that persists contact/SIM assignments, and the ports that
//! platform adapters implement (storage, contacts, SIMs, picker, device).
//!
//! Nothing in this crate touches the filesystem directly; see `ringer-fs`
//! for the storage and catalog adapters.

pub mod catalog;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod model;
pub mod ports;
pub mod settings;
pub mod store;

pub use catalog::{Assignment, RingtoneList, SYSTEM_RINGTONES};
pub use error::RingerError;
pub use fetch::Fetched;
pub use model::{
    Contact, ContactRingtoneMapping, PhoneNumber, Ringtone, RingtoneSettings, SimCard,
    SimRingtoneMapping,
};
pub use settings::{SettingsRepository, SETTINGS_KEY};
pub use store::{KeyValueStore, StoreError};
