// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Settings on the local single-file backend after the map was damaged.

use ringer_core::{Fetched, RingtoneSettings, SettingsRepository};
use ringer_fs::{BackendKind, StorageBackend, LOCAL_STORE_FILE};
use std::fs;

#[test]
fn corrupt_map_reads_empty_and_accepts_new_writes() {
    let tmp = tempfile::tempdir().unwrap();
    let backend = StorageBackend::open(BackendKind::Local, tmp.path()).unwrap();
    let repo = SettingsRepository::new(backend);
    repo.set_contact_ringtone("c1", "default_2").unwrap();

    fs::write(tmp.path().join(LOCAL_STORE_FILE), b"{\"ringtone_settings\":").unwrap();
    assert!(repo.load().is_failed());
    assert_eq!(repo.get_settings(), RingtoneSettings::default());

    repo.set_sim_ringtone("sim1", "default_3").unwrap();
    assert_eq!(repo.get_sim_ringtone("sim1").as_deref(), Some("default_3"));
    assert_eq!(repo.get_contact_ringtone("c1"), None);
}

#[test]
fn clear_all_succeeds_on_a_corrupt_map() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join(LOCAL_STORE_FILE), b"not json").unwrap();
    let backend = StorageBackend::open(BackendKind::Local, tmp.path()).unwrap();
    let repo = SettingsRepository::new(backend);

    repo.clear_all().unwrap();
    assert_eq!(repo.load(), Fetched::Empty);
    let map: serde_json::Value =
        serde_json::from_slice(&fs::read(tmp.path().join(LOCAL_STORE_FILE)).unwrap()).unwrap();
    assert_eq!(map, serde_json::json!({}));
}
