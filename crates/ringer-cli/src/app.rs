// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wiring and command handlers.

use crate::adapters::{read_sims, JsonContactDirectory, ListedSims, PathPicker};
use crate::cli::{
    Command, Config, ContactsCmd, DefaultCmd, MappingCmd, RingtonesCmd, SettingsCmd, SimCmd,
};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use ringer_core::directory::{ContactList, SimList};
use ringer_core::ports::{
    ContactDirectory, DeviceRingtones, SimDirectory, StaticSimDirectory, UnavailableDevice,
};
use ringer_core::{RingerError, RingtoneList, SettingsRepository};
use ringer_fs::{RingerDirs, RingtoneCatalog, StorageBackend};
use tracing::debug;

/// Everything a command needs, opened once per invocation.
pub struct App {
    settings: SettingsRepository<StorageBackend>,
    catalog: RingtoneCatalog,
    contacts: JsonContactDirectory,
    sims: Box<dyn SimDirectory>,
    device: Box<dyn DeviceRingtones>,
}

impl App {
    /// Open with no native ringtone capability; the CLI host has none.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_with_device(config, Box::new(UnavailableDevice))
    }

    pub fn open_with_device(config: &Config, device: Box<dyn DeviceRingtones>) -> Result<Self> {
        let dirs = match &config.data_dir {
            Some(dir) => RingerDirs::at(dir),
            None => RingerDirs::from_platform()?,
        };
        let backend = StorageBackend::open(config.backend.into(), &dirs.store_dir())
            .with_context(|| format!("opening store under {}", dirs.data_dir().display()))?;
        debug!(backend = backend.name(), data_dir = %dirs.data_dir().display(), "storage ready");

        let sims: Box<dyn SimDirectory> = match &config.sims {
            Some(path) => Box::new(ListedSims(
                read_sims(path).with_context(|| format!("reading {}", path.display()))?,
            )),
            None => Box::new(StaticSimDirectory::for_platform(config.platform.into())),
        };

        Ok(Self {
            settings: SettingsRepository::new(backend),
            catalog: RingtoneCatalog::new(dirs.ringtone_dir()),
            contacts: JsonContactDirectory::new(config.contacts.clone()),
            sims,
            device,
        })
    }

    pub fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Ringtones(cmd) => self.ringtones(cmd),
            Command::Contacts(ContactsCmd::List { query }) => self.list_contacts(query.as_deref()),
            Command::Contact(cmd) => self.contact(cmd),
            Command::Sim(cmd) => self.sim(cmd),
            Command::Default(cmd) => self.default_ringtone(cmd),
            Command::Settings(cmd) => self.settings_cmd(cmd),
        }
    }

    fn ringtones(&self, cmd: RingtonesCmd) -> Result<()> {
        match cmd {
            RingtonesCmd::List {
                custom,
                system,
                json,
            } => {
                let list = self.catalog.load();
                let shown: Vec<_> = list
                    .all()
                    .iter()
                    .filter(|r| (!custom || r.is_custom) && (!system || !r.is_custom))
                    .collect();
                if json {
                    println!("{}", serde_json::to_string_pretty(&shown)?);
                } else {
                    let mut table = table(&["ID", "NAME", "KIND", "URI"]);
                    for r in shown {
                        let kind = match (r.is_custom, r.is_default) {
                            (true, _) => "custom",
                            (false, true) => "system (default)",
                            (false, false) => "system",
                        };
                        table.add_row(vec![r.id.as_str(), r.name.as_str(), kind, r.uri.as_str()]);
                    }
                    println!("{table}");
                }
            }
            RingtonesCmd::Import { file, name } => {
                let picker = PathPicker::new(file, name);
                if let Some(ringtone) = self.catalog.import(&picker)? {
                    println!("imported {} ({})", ringtone.name, ringtone.id);
                }
            }
            RingtonesCmd::Delete { id } => {
                let list = self.catalog.load();
                let ringtone = list
                    .find_by_id(&id)
                    .ok_or_else(|| RingerError::not_found("ringtone", &id))?;
                if !ringtone.is_custom {
                    anyhow::bail!("{} is a system ringtone and cannot be deleted", ringtone.name);
                }
                if self.catalog.delete_custom(ringtone)? {
                    println!("deleted {}", ringtone.name);
                } else {
                    println!("{} was already gone", ringtone.name);
                }
            }
        }
        Ok(())
    }

    fn list_contacts(&self, query: Option<&str>) -> Result<()> {
        let contacts = ContactList::load(&self.contacts)?;
        let ringtones = self.catalog.load();
        let settings = self.settings.get_settings();
        let mut table = table(&["ID", "NAME", "PHONE", "RINGTONE"]);
        for c in contacts.search(query.unwrap_or_default()) {
            let phone = c
                .phone_numbers
                .first()
                .map(|p| format!("{} ({})", p.number, p.label))
                .unwrap_or_default();
            let assigned = ringtones.resolve(settings.contact_ringtone(&c.id));
            table.add_row(vec![
                c.id.clone(),
                c.name.clone(),
                phone,
                assigned.label().to_owned(),
            ]);
        }
        println!("{table}");
        Ok(())
    }

    fn contact(&self, cmd: MappingCmd) -> Result<()> {
        match cmd {
            MappingCmd::Set { id, ringtone } => {
                let list = self.catalog.load();
                let tone = require_ringtone(&list, &ringtone)?;
                if self.contacts.has_access() {
                    let contacts = ContactList::load(&self.contacts)?;
                    if contacts.find_by_id(&id).is_none() {
                        return Err(RingerError::not_found("contact", &id).into());
                    }
                }
                self.settings.set_contact_ringtone(&id, &tone.id)?;
                if self.device.is_permission_granted() {
                    let applied = self.device.set_ringtone_for_contact(&id, &tone.uri);
                    debug!(contact = %id, applied, "device ringtone update");
                }
                println!("{id}: {}", tone.name);
            }
            MappingCmd::Get { id } => {
                let list = self.catalog.load();
                let stored = self.settings.get_contact_ringtone(&id);
                println!("{id}: {}", describe(&list, stored.as_deref()));
            }
            MappingCmd::Clear { id } => {
                if self.settings.remove_contact_ringtone(&id)? {
                    println!("{id}: cleared");
                } else {
                    println!("{id}: nothing to clear");
                }
            }
        }
        Ok(())
    }

    fn sim(&self, cmd: SimCmd) -> Result<()> {
        let sims = SimList::load(self.sims.as_ref());
        match cmd {
            SimCmd::List => {
                let list = self.catalog.load();
                let settings = self.settings.get_settings();
                let mut table = table(&["ID", "NAME", "SLOT", "CARRIER", "RINGTONE"]);
                for sim in sims.all() {
                    table.add_row(vec![
                        sim.id.clone(),
                        sim.display_name.clone(),
                        sim.slot_index.to_string(),
                        sim.carrier_name.clone().unwrap_or_default(),
                        list.resolve(settings.sim_ringtone(&sim.id)).label().to_owned(),
                    ]);
                }
                println!("{table}");
            }
            SimCmd::Set { id, ringtone } => {
                let list = self.catalog.load();
                let tone = require_ringtone(&list, &ringtone)?;
                if sims.find_by_id(&id).is_none() {
                    return Err(RingerError::not_found("sim", &id).into());
                }
                self.settings.set_sim_ringtone(&id, &tone.id)?;
                println!("{id}: {}", tone.name);
            }
            SimCmd::Get { id } => {
                let list = self.catalog.load();
                let stored = self.settings.get_sim_ringtone(&id);
                println!("{id}: {}", describe(&list, stored.as_deref()));
            }
            SimCmd::Clear { id } => {
                if self.settings.remove_sim_ringtone(&id)? {
                    println!("{id}: cleared");
                } else {
                    println!("{id}: nothing to clear");
                }
            }
        }
        Ok(())
    }

    fn default_ringtone(&self, cmd: DefaultCmd) -> Result<()> {
        match cmd {
            DefaultCmd::Set { ringtone } => {
                let list = self.catalog.load();
                let tone = require_ringtone(&list, &ringtone)?;
                self.settings.set_default_ringtone(&tone.id)?;
                if self.device.is_permission_granted() {
                    let applied = self.device.set_default_ringtone(&tone.uri);
                    debug!(applied, "device default ringtone update");
                }
                println!("default: {}", tone.name);
            }
            DefaultCmd::Get => {
                let list = self.catalog.load();
                let stored = self.settings.get_default_ringtone();
                println!("default: {}", describe(&list, stored.as_deref()));
            }
        }
        Ok(())
    }

    fn settings_cmd(&self, cmd: SettingsCmd) -> Result<()> {
        match cmd {
            SettingsCmd::Show => {
                let doc = self.settings.get_settings();
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
            SettingsCmd::Reset => {
                self.settings.clear_all()?;
                println!("settings cleared");
            }
        }
        Ok(())
    }
}

fn require_ringtone<'a>(
    list: &'a RingtoneList,
    id: &str,
) -> Result<&'a ringer_core::Ringtone, RingerError> {
    list.find_by_id(id)
        .ok_or_else(|| RingerError::not_found("ringtone", id))
}

/// `Name (id)` for a resolvable mapping, `Default` otherwise.
fn describe(list: &RingtoneList, stored: Option<&str>) -> String {
    match list.resolve(stored) {
        ringer_core::Assignment::Ringtone(r) => format!("{} ({})", r.name, r.id),
        other => other.label().to_owned(),
    }
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}
