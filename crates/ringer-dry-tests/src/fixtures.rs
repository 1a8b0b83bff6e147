// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sample data shared across test suites.

use ringer_core::model::{Contact, PhoneNumber, RingtoneSettings};

/// Three contacts with distinct names and numbers.
pub fn sample_contacts() -> Vec<Contact> {
    let contact = |id: &str, name: &str, number: &str| Contact {
        id: id.to_owned(),
        name: name.to_owned(),
        phone_numbers: vec![PhoneNumber {
            number: number.to_owned(),
            label: "mobile".to_owned(),
        }],
    };
    vec![
        contact("c1", "Ada Lovelace", "+44 20 7946 0001"),
        contact("c2", "Grace Hopper", "+1 202 555 0102"),
        contact("c3", "Alan Turing", "+44 161 496 0003"),
    ]
}

/// A document with two contact mappings, one SIM mapping and a default.
pub fn sample_settings() -> RingtoneSettings {
    let mut doc = RingtoneSettings::default();
    doc.upsert_contact("c1", "default_2");
    doc.upsert_contact("c2", "default_7");
    doc.upsert_sim("sim1", "default_3");
    doc.default_ringtone_id = Some("default_1".to_owned());
    doc
}
