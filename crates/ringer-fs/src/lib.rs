// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem adapters for Ringer: the key-value store backends and the
//! ringtone catalog over the managed directory.

pub mod catalog;
pub mod dirs;
pub mod store;

pub use catalog::{custom_ringtone_id, RingtoneCatalog};
pub use dirs::RingerDirs;
pub use store::{BackendKind, LocalFileStore, SecureFileStore, StorageBackend, LOCAL_STORE_FILE};
