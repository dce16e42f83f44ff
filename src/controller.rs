//! Single owner of the shortcut mapping, the enabled flag and the live
//! registrations. Every mutation persists first, then commits and
//! re-registers, so memory, disk and the OS never disagree.

use tracing::info;

use crate::config::{ShortcutMap, ShortcutStore};
use crate::editor::ShortcutForm;
use crate::error::Result;
use crate::hotkeys::{BindingTable, HotkeyBackend, HotkeyRegistrar, RegistrationFailure};

pub struct ShortcutController<B> {
    store: ShortcutStore,
    shortcuts: ShortcutMap,
    enabled: bool,
    registrar: HotkeyRegistrar<B>,
    failures: Vec<RegistrationFailure>,
}

impl<B: HotkeyBackend> ShortcutController<B> {
    /// Loads the mapping and installs the initial registrations.
    pub fn open(store: ShortcutStore, registrar: HotkeyRegistrar<B>, enabled: bool) -> Self {
        let shortcuts = store.load();
        info!("loaded {} shortcuts from {:?}", shortcuts.len(), store.path());

        let mut controller = Self {
            store,
            shortcuts,
            enabled,
            registrar,
            failures: Vec::new(),
        };
        controller.reregister();
        controller
    }

    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Entries the OS refused on the last registration pass.
    pub fn failures(&self) -> &[RegistrationFailure] {
        &self.failures
    }

    pub fn failure_for(&self, descriptor: &str) -> Option<&RegistrationFailure> {
        self.failures.iter().find(|f| f.descriptor == descriptor)
    }

    pub fn bindings(&self) -> BindingTable {
        self.registrar.bindings()
    }

    pub fn registrar(&self) -> &HotkeyRegistrar<B> {
        &self.registrar
    }

    /// Adds a shortcut, or replaces the one the form was opened on.
    pub fn save_shortcut(&mut self, form: &ShortcutForm) -> Result<()> {
        let (hotkey, command) = form.validate()?;

        let mut next = self.shortcuts.clone();
        if let Some(original) = form.original() {
            if original != hotkey {
                next.shift_remove(original);
            }
        }
        next.insert(hotkey.clone(), command);

        self.commit(next)?;
        info!("saved shortcut '{}'", hotkey);
        Ok(())
    }

    /// Removes `hotkey`; returns false if it was not mapped.
    pub fn delete(&mut self, hotkey: &str) -> Result<bool> {
        if !self.shortcuts.contains_key(hotkey) {
            return Ok(false);
        }

        let mut next = self.shortcuts.clone();
        next.shift_remove(hotkey);

        self.commit(next)?;
        info!("deleted shortcut '{}'", hotkey);
        Ok(true)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        info!("hotkeys {}", if enabled { "enabled" } else { "disabled" });
        self.enabled = enabled;
        self.reregister();
    }

    /// Releases every registration ahead of exit.
    pub fn shutdown(&mut self) {
        self.registrar.reregister(&self.shortcuts, false);
        self.failures.clear();
    }

    fn commit(&mut self, next: ShortcutMap) -> Result<()> {
        self.store.save(&next)?;
        self.shortcuts = next;
        self.reregister();
        Ok(())
    }

    fn reregister(&mut self) {
        self.failures = self
            .registrar
            .reregister(&self.shortcuts, self.enabled)
            .failures;
    }
}
