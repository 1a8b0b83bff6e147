// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Loaded snapshots of the contact and SIM directories.

use crate::error::RingerError;
use crate::model::{Contact, SimCard};
use crate::ports::{ContactDirectory, SimDirectory};

/// Name shown for contacts that have none.
pub const UNKNOWN_CONTACT_NAME: &str = "Unknown";
/// Label used for phone numbers that carry none.
pub const DEFAULT_PHONE_LABEL: &str = "mobile";

/// Contacts loaded from a [`ContactDirectory`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactList {
    contacts: Vec<Contact>,
}

impl ContactList {
    /// Wrap contacts, filling in blank names and labels.
    pub fn new(contacts: Vec<Contact>) -> Self {
        let contacts = contacts
            .into_iter()
            .map(|mut c| {
                if c.name.trim().is_empty() {
                    UNKNOWN_CONTACT_NAME.clone_into(&mut c.name);
                }
                for phone in &mut c.phone_numbers {
                    if phone.label.trim().is_empty() {
                        DEFAULT_PHONE_LABEL.clone_into(&mut phone.label);
                    }
                }
                c
            })
            .collect();
        Self { contacts }
    }

    /// Check access (requesting it if needed) and load every contact.
    pub fn load<D>(directory: &D) -> Result<Self, RingerError>
    where
        D: ContactDirectory + ?Sized,
    {
        if !directory.has_access() && !directory.request_access() {
            return Err(RingerError::PermissionDenied(
                "contacts permission denied".into(),
            ));
        }
        directory.list_contacts().map(Self::new)
    }

    /// All contacts in directory order.
    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contact with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Contacts whose name contains `query` (case-insensitive) or whose
    /// phone numbers contain it verbatim. A blank query matches everyone.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        if query.trim().is_empty() {
            return self.contacts.iter().collect();
        }
        let lower = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&lower)
                    || c.phone_numbers.iter().any(|p| p.number.contains(query))
            })
            .collect()
    }
}

/// SIM slots loaded from a [`SimDirectory`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimList {
    sims: Vec<SimCard>,
}

impl SimList {
    /// Snapshot the directory.
    pub fn load<D>(directory: &D) -> Self
    where
        D: SimDirectory + ?Sized,
    {
        Self {
            sims: directory.list_sims(),
        }
    }

    /// All slots.
    pub fn all(&self) -> &[SimCard] {
        &self.sims
    }

    /// SIM with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&SimCard> {
        self.sims.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PhoneNumber;

    fn contact(id: &str, name: &str, number: &str) -> Contact {
        Contact {
            id: id.into(),
            name: name.into(),
            phone_numbers: vec![PhoneNumber {
                number: number.into(),
                label: String::new(),
            }],
        }
    }

    #[test]
    fn blanks_are_filled_on_load() {
        let list = ContactList::new(vec![contact("1", " ", "555")]);
        let c = list.find_by_id("1").unwrap();
        assert_eq!(c.name, "Unknown");
        assert_eq!(c.phone_numbers[0].label, "mobile");
    }

    #[test]
    fn search_matches_name_or_number() {
        let list = ContactList::new(vec![
            contact("1", "Ada Lovelace", "+44 20 1234"),
            contact("2", "Grace Hopper", "+1 555 0100"),
        ]);
        let ids = |q: &str| list.search(q).iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids("ada"), vec!["1"]);
        assert_eq!(ids("555"), vec!["2"]);
        assert_eq!(ids("   "), vec!["1", "2"]);
        assert!(ids("nobody").is_empty());
    }
}
