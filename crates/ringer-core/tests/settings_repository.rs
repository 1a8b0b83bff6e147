// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Settings repository behaviour against the in-memory store fake.

use ringer_core::{Fetched, RingerError, RingtoneSettings, SettingsRepository, SETTINGS_KEY};
use ringer_dry_tests::{sample_settings, InMemoryKeyValueStore};

fn repo() -> (InMemoryKeyValueStore, SettingsRepository<InMemoryKeyValueStore>) {
    let store = InMemoryKeyValueStore::new();
    (store.clone(), SettingsRepository::new(store))
}

#[test]
fn empty_store_yields_empty_document() {
    let (_, repo) = repo();
    assert_eq!(repo.load(), Fetched::Empty);
    let doc = repo.get_settings();
    assert!(doc.contact_mappings.is_empty());
    assert!(doc.sim_mappings.is_empty());
    assert!(doc.default_ringtone_id.is_none());
}

#[test]
fn corrupt_document_falls_back_to_empty_but_reports_failure() {
    let store = InMemoryKeyValueStore::with_item(SETTINGS_KEY, "{not json");
    let repo = SettingsRepository::new(store);
    assert!(repo.load().is_failed());
    assert_eq!(repo.get_settings(), RingtoneSettings::default());
}

#[test]
fn wrong_shape_is_treated_as_no_settings() {
    let store = InMemoryKeyValueStore::with_item(SETTINGS_KEY, r#"{"contactMappings": 3}"#);
    let repo = SettingsRepository::new(store);
    assert_eq!(repo.get_settings(), RingtoneSettings::default());
}

#[test]
fn unreadable_store_degrades_lookups_to_absent() {
    let (store, repo) = repo();
    repo.set_contact_ringtone("c1", "default_4").unwrap();
    store.set_fail_on_get(true);
    assert!(repo.load().is_failed());
    assert_eq!(repo.get_contact_ringtone("c1"), None);
}

#[test]
fn last_write_wins_with_a_single_entry_per_contact() {
    let (_, repo) = repo();
    repo.set_contact_ringtone("c1", "default_1").unwrap();
    repo.set_contact_ringtone("c1", "default_2").unwrap();

    assert_eq!(repo.get_contact_ringtone("c1").as_deref(), Some("default_2"));
    let doc = repo.get_settings();
    assert_eq!(
        doc.contact_mappings
            .iter()
            .filter(|m| m.contact_id == "c1")
            .count(),
        1
    );
}

#[test]
fn sim_mapping_round_trips() {
    let (_, repo) = repo();
    repo.set_sim_ringtone("sim1", "default_3").unwrap();
    assert_eq!(repo.get_sim_ringtone("sim1").as_deref(), Some("default_3"));
    assert_eq!(repo.get_sim_ringtone("sim2"), None);
}

#[test]
fn removing_an_unset_mapping_does_not_write() {
    let (store, repo) = repo();
    repo.set_contact_ringtone("c1", "default_1").unwrap();
    let before = store.raw(SETTINGS_KEY);
    let writes = store.set_count();

    assert!(!repo.remove_contact_ringtone("ghost").unwrap());
    assert!(!repo.remove_sim_ringtone("sim9").unwrap());

    assert_eq!(repo.get_contact_ringtone("ghost"), None);
    assert_eq!(store.set_count(), writes);
    assert_eq!(store.raw(SETTINGS_KEY), before);
}

#[test]
fn removal_deletes_the_entry() {
    let (_, repo) = repo();
    repo.set_contact_ringtone("c1", "default_1").unwrap();
    repo.set_contact_ringtone("c2", "default_2").unwrap();
    assert!(repo.remove_contact_ringtone("c1").unwrap());

    let doc = repo.get_settings();
    assert_eq!(doc.contact_mappings.len(), 1);
    assert_eq!(doc.contact_mappings[0].contact_id, "c2");
}

#[test]
fn save_then_get_round_trips() {
    let (_, repo) = repo();
    let doc = sample_settings();
    repo.save_settings(&doc).unwrap();
    let loaded = repo.get_settings();
    assert_eq!(loaded, doc);
    assert!(loaded.same_mappings(&doc));
}

#[test]
fn failed_save_surfaces_and_keeps_prior_state() {
    let (store, repo) = repo();
    repo.set_sim_ringtone("sim1", "default_3").unwrap();
    store.set_fail_on_set(true);

    let err = repo.set_sim_ringtone("sim1", "default_9").unwrap_err();
    assert!(matches!(err, RingerError::PersistenceFailure(_)));

    store.set_fail_on_set(false);
    assert_eq!(repo.get_sim_ringtone("sim1").as_deref(), Some("default_3"));
}

#[test]
fn default_ringtone_and_clear_all() {
    let (store, repo) = repo();
    assert_eq!(repo.get_default_ringtone(), None);
    repo.set_default_ringtone("default_6").unwrap();
    assert_eq!(repo.get_default_ringtone().as_deref(), Some("default_6"));

    repo.clear_all().unwrap();
    assert!(store.raw(SETTINGS_KEY).is_none());
    assert_eq!(repo.get_settings(), RingtoneSettings::default());
}

#[test]
fn concurrent_upserts_do_not_lose_updates() {
    let (_, repo) = repo();
    std::thread::scope(|scope| {
        for n in 0..8 {
            let repo = &repo;
            scope.spawn(move || {
                for round in 0..10 {
                    repo.set_contact_ringtone(&format!("c{n}"), &format!("default_{round}"))
                        .unwrap();
                }
            });
        }
    });

    let doc = repo.get_settings();
    assert_eq!(doc.contact_mappings.len(), 8);
    for n in 0..8 {
        assert_eq!(
            repo.get_contact_ringtone(&format!("c{n}")).as_deref(),
            Some("default_9")
        );
    }
}

#[test]
fn blank_ringtone_ids_are_rejected_without_writing() {
    let (store, repo) = repo();
    repo.set_contact_ringtone("c1", "default_1").unwrap();
    let writes = store.set_count();

    for blank in ["", "   "] {
        let err = repo.set_contact_ringtone("c1", blank).unwrap_err();
        assert!(matches!(err, RingerError::NotFound { kind: "ringtone", .. }));
        assert!(repo.set_sim_ringtone("sim1", blank).is_err());
        assert!(repo.set_default_ringtone(blank).is_err());
    }

    assert_eq!(store.set_count(), writes);
    assert_eq!(repo.get_contact_ringtone("c1").as_deref(), Some("default_1"));
    assert_eq!(repo.get_sim_ringtone("sim1"), None);
    assert_eq!(repo.get_settings().contact_mappings.len(), 1);
}

#[test]
fn blank_ids_already_on_disk_read_as_absent() {
    let (store, repo) = repo();
    store.put_raw(
        SETTINGS_KEY,
        r#"{"contactMappings":[{"contactId":"c1","ringtoneId":""}],
            "simMappings":[{"simId":"sim1","ringtoneId":""}],
            "defaultRingtoneId":""}"#,
    );
    assert_eq!(repo.get_contact_ringtone("c1"), None);
    assert_eq!(repo.get_sim_ringtone("sim1"), None);
    assert_eq!(repo.get_default_ringtone(), None);
}
