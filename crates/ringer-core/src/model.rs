// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ringtones, contacts, SIM cards and the persisted settings document.

use serde::{Deserialize, Serialize};

/// An assignable ringtone, either built in or imported by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ringtone {
    /// Stable identifier (`default_N` for system tones, `custom_<digest>` otherwise).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Location of the audio resource.
    pub uri: String,
    /// Length of the audio, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Imported by the user and backed by a file in the managed directory.
    pub is_custom: bool,
    /// The catalog's default entry.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

/// One phone number on a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Number as stored by the contact source.
    pub number: String,
    /// Label such as `mobile` or `work`.
    pub label: String,
}

/// A contact as reported by the device's contact directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Directory-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Phone numbers in directory order.
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
}

/// A SIM slot as reported by the telephony layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimCard {
    /// Stable identifier (`sim1`, `sim2`, ...).
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Zero-based slot index.
    pub slot_index: u32,
    /// Carrier name, when the platform exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_name: Option<String>,
}

/// Contact to ringtone association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRingtoneMapping {
    /// Contact identifier.
    pub contact_id: String,
    /// Ringtone identifier.
    pub ringtone_id: String,
}

/// SIM to ringtone association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimRingtoneMapping {
    /// SIM identifier.
    pub sim_id: String,
    /// Ringtone identifier.
    pub ringtone_id: String,
}

/// The single persisted settings document.
///
/// `contact_mappings` is unique on `contact_id` and `sim_mappings` on
/// `sim_id`; the mutators below keep that true. Sequence order is the
/// order in which ids were first assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingtoneSettings {
    /// Per-contact assignments.
    pub contact_mappings: Vec<ContactRingtoneMapping>,
    /// Per-SIM assignments.
    pub sim_mappings: Vec<SimRingtoneMapping>,
    /// Fallback ringtone when no mapping applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ringtone_id: Option<String>,
}

impl RingtoneSettings {
    /// Assign `ringtone_id` to `contact_id`, replacing in place or appending.
    pub fn upsert_contact(&mut self, contact_id: &str, ringtone_id: &str) {
        if let Some(existing) = self
            .contact_mappings
            .iter_mut()
            .find(|m| m.contact_id == contact_id)
        {
            existing.ringtone_id = ringtone_id.to_owned();
        } else {
            self.contact_mappings.push(ContactRingtoneMapping {
                contact_id: contact_id.to_owned(),
                ringtone_id: ringtone_id.to_owned(),
            });
        }
    }

    /// Ringtone assigned to `contact_id`, if any. A blank id reads as none.
    pub fn contact_ringtone(&self, contact_id: &str) -> Option<&str> {
        self.contact_mappings
            .iter()
            .find(|m| m.contact_id == contact_id)
            .map(|m| m.ringtone_id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Drop the mapping for `contact_id`. Returns whether one existed.
    pub fn remove_contact(&mut self, contact_id: &str) -> bool {
        let before = self.contact_mappings.len();
        self.contact_mappings.retain(|m| m.contact_id != contact_id);
        self.contact_mappings.len() != before
    }

    /// Assign `ringtone_id` to `sim_id`, replacing in place or appending.
    pub fn upsert_sim(&mut self, sim_id: &str, ringtone_id: &str) {
        if let Some(existing) = self.sim_mappings.iter_mut().find(|m| m.sim_id == sim_id) {
            existing.ringtone_id = ringtone_id.to_owned();
        } else {
            self.sim_mappings.push(SimRingtoneMapping {
                sim_id: sim_id.to_owned(),
                ringtone_id: ringtone_id.to_owned(),
            });
        }
    }

    /// Ringtone assigned to `sim_id`, if any. A blank id reads as none.
    pub fn sim_ringtone(&self, sim_id: &str) -> Option<&str> {
        self.sim_mappings
            .iter()
            .find(|m| m.sim_id == sim_id)
            .map(|m| m.ringtone_id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Drop the mapping for `sim_id`. Returns whether one existed.
    pub fn remove_sim(&mut self, sim_id: &str) -> bool {
        let before = self.sim_mappings.len();
        self.sim_mappings.retain(|m| m.sim_id != sim_id);
        self.sim_mappings.len() != before
    }

    /// True when no mapping and no default are set.
    pub fn is_empty(&self) -> bool {
        self.contact_mappings.is_empty()
            && self.sim_mappings.is_empty()
            && self.default_ringtone_id.is_none()
    }

    /// Compare mappings as sets, ignoring sequence order.
    pub fn same_mappings(&self, other: &Self) -> bool {
        fn sorted<T: Clone + Ord>(items: &[T]) -> Vec<T> {
            let mut out = items.to_vec();
            out.sort();
            out
        }
        let contacts = |s: &Self| {
            sorted(
                &s.contact_mappings
                    .iter()
                    .map(|m| (m.contact_id.clone(), m.ringtone_id.clone()))
                    .collect::<Vec<_>>(),
            )
        };
        let sims = |s: &Self| {
            sorted(
                &s.sim_mappings
                    .iter()
                    .map(|m| (m.sim_id.clone(), m.ringtone_id.clone()))
                    .collect::<Vec<_>>(),
            )
        };
        self.default_ringtone_id == other.default_ringtone_id
            && contacts(self) == contacts(other)
            && sims(self) == sims(other)
    }
}
