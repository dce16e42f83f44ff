//! In-memory stand-ins for the OS hotkey facility and the process launcher.
#![allow(dead_code)]

use keytask::{
    HotkeyBackend, HotkeyHandle, KeyTaskError, ShortcutController, ShortcutStore, Spawner,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Hands out sequential handles and refuses duplicate descriptors, like the
/// OS refuses a combination that is already taken.
#[derive(Default)]
pub struct MemoryBackend {
    next: HotkeyHandle,
    pub live: HashMap<HotkeyHandle, String>,
    pub reject: HashSet<String>,
}

impl MemoryBackend {
    pub fn rejecting(descriptors: &[&str]) -> Self {
        Self {
            reject: descriptors.iter().map(|d| d.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn handle_of(&self, descriptor: &str) -> Option<HotkeyHandle> {
        self.live
            .iter()
            .find(|(_, d)| d.as_str() == descriptor)
            .map(|(h, _)| *h)
    }
}

impl HotkeyBackend for MemoryBackend {
    fn register(&mut self, descriptor: &str) -> keytask::Result<HotkeyHandle> {
        if self.reject.contains(descriptor) || self.handle_of(descriptor).is_some() {
            return Err(KeyTaskError::Hotkey {
                descriptor: descriptor.to_string(),
                reason: "AlreadyRegistered".to_string(),
            });
        }
        self.next += 1;
        self.live.insert(self.next, descriptor.to_string());
        Ok(self.next)
    }

    fn unregister(&mut self, handle: HotkeyHandle) -> keytask::Result<()> {
        self.live.remove(&handle);
        Ok(())
    }
}

/// Records launched commands instead of starting processes.
#[derive(Clone, Default)]
pub struct RecordingSpawner(pub Arc<Mutex<Vec<String>>>);

impl RecordingSpawner {
    pub fn launched(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&self, command: &str) -> keytask::Result<()> {
        self.0.lock().push(command.to_string());
        Ok(())
    }
}

pub fn open_controller(
    dir: &tempfile::TempDir,
    backend: MemoryBackend,
) -> ShortcutController<MemoryBackend> {
    let store = ShortcutStore::new(dir.path().join("shortcuts.json"));
    ShortcutController::open(store, keytask::HotkeyRegistrar::new(backend), true)
}
