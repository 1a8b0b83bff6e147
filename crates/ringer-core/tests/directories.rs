// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use ringer_core::directory::{ContactList, SimList};
use ringer_core::ports::{DeviceRingtones, Platform, StaticSimDirectory};
use ringer_core::RingerError;
use ringer_dry_tests::{sample_contacts, FakeContactDirectory, RecordingDevice};

#[test]
fn granted_directory_loads_without_prompting() {
    let dir = FakeContactDirectory::granted(sample_contacts());
    let list = ContactList::load(&dir).unwrap();
    assert_eq!(list.all().len(), 3);
    assert_eq!(dir.requests(), 0);
    assert_eq!(list.find_by_id("c2").map(|c| c.name.as_str()), Some("Grace Hopper"));
}

#[test]
fn access_is_requested_once_when_missing() {
    let dir = FakeContactDirectory::ungranted(sample_contacts(), true);
    let list = ContactList::load(&dir).unwrap();
    assert_eq!(dir.requests(), 1);
    assert_eq!(list.search("alan").len(), 1);
}

#[test]
fn refused_access_is_permission_denied() {
    let dir = FakeContactDirectory::ungranted(sample_contacts(), false);
    let err = ContactList::load(&dir).unwrap_err();
    assert!(matches!(err, RingerError::PermissionDenied(_)));
}

#[test]
fn sim_lookup_by_id() {
    let sims = SimList::load(&StaticSimDirectory::for_platform(Platform::Android));
    assert_eq!(sims.find_by_id("sim2").map(|s| s.slot_index), Some(1));
    assert!(sims.find_by_id("sim3").is_none());
}

#[test]
fn device_writes_need_permission() {
    let device = RecordingDevice::default();
    assert!(!device.set_ringtone_for_contact("c1", "file:///a.mp3"));
    assert!(device.request_permission());
    assert!(device.set_ringtone_for_contact("c1", "file:///a.mp3"));
    assert_eq!(device.ringtone_for_contact("c1").as_deref(), Some("file:///a.mp3"));
}
