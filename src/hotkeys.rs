use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

use crate::config::ShortcutMap;
use crate::error::{KeyTaskError, Result};
use crate::launcher::Spawner;

/// Identifier of one live OS registration.
pub type HotkeyHandle = u32;

/// OS facility that turns descriptors into live global hotkeys.
pub trait HotkeyBackend {
    fn register(&mut self, descriptor: &str) -> Result<HotkeyHandle>;
    fn unregister(&mut self, handle: HotkeyHandle) -> Result<()>;
}

pub fn parse_descriptor(descriptor: &str) -> Result<HotKey> {
    descriptor
        .parse::<HotKey>()
        .map_err(|e| KeyTaskError::InvalidHotkey {
            descriptor: descriptor.to_string(),
            reason: e.to_string(),
        })
}

/// `global-hotkey` backed registrations.
///
/// Must live on the thread running the window event loop, since the
/// manager's message window belongs to the thread that created it.
pub struct GlobalHotkeyBackend {
    manager: GlobalHotKeyManager,
    live: HashMap<HotkeyHandle, (String, HotKey)>,
}

impl GlobalHotkeyBackend {
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new().map_err(|e| KeyTaskError::Hotkey {
            descriptor: String::new(),
            reason: format!("failed to init hotkey manager: {e}"),
        })?;
        Ok(Self {
            manager,
            live: HashMap::new(),
        })
    }
}

impl HotkeyBackend for GlobalHotkeyBackend {
    fn register(&mut self, descriptor: &str) -> Result<HotkeyHandle> {
        let hotkey = parse_descriptor(descriptor)?;
        self.manager
            .register(hotkey)
            .map_err(|e| KeyTaskError::Hotkey {
                descriptor: descriptor.to_string(),
                reason: e.to_string(),
            })?;

        let handle = hotkey.id();
        self.live.insert(handle, (descriptor.to_string(), hotkey));
        Ok(handle)
    }

    fn unregister(&mut self, handle: HotkeyHandle) -> Result<()> {
        let manager = &self.manager;
        release_tracked(&mut self.live, handle, |hotkey| manager.unregister(hotkey))
    }
}

/// Drops `handle` from `live` only once the OS released it, so a failed
/// release stays tracked and can be retried.
fn release_tracked<E: std::fmt::Display>(
    live: &mut HashMap<HotkeyHandle, (String, HotKey)>,
    handle: HotkeyHandle,
    release: impl FnOnce(HotKey) -> std::result::Result<(), E>,
) -> Result<()> {
    let Some((descriptor, hotkey)) = live.get(&handle) else {
        return Ok(());
    };
    release(*hotkey).map_err(|e| KeyTaskError::Hotkey {
        descriptor: descriptor.clone(),
        reason: e.to_string(),
    })?;
    live.remove(&handle);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub descriptor: String,
    pub command: String,
}

/// Handle -> command lookup shared with the listener thread.
#[derive(Debug, Clone, Default)]
pub struct BindingTable(Arc<RwLock<HashMap<HotkeyHandle, Binding>>>);

impl BindingTable {
    pub fn command_for(&self, handle: HotkeyHandle) -> Option<String> {
        self.0.read().get(&handle).map(|b| b.command.clone())
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    fn replace(&self, bindings: HashMap<HotkeyHandle, Binding>) {
        *self.0.write() = bindings;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFailure {
    pub descriptor: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RegistrationReport {
    pub registered: usize,
    pub failures: Vec<RegistrationFailure>,
}

/// Owns the live registration set and rebuilds it from a mapping.
pub struct HotkeyRegistrar<B> {
    backend: B,
    handles: Vec<HotkeyHandle>,
    bindings: BindingTable,
}

impl<B: HotkeyBackend> HotkeyRegistrar<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handles: Vec::new(),
            bindings: BindingTable::default(),
        }
    }

    pub fn bindings(&self) -> BindingTable {
        self.bindings.clone()
    }

    pub fn live_handles(&self) -> &[HotkeyHandle] {
        &self.handles
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Releases every live registration, then registers each entry when
    /// `enabled`. An entry the backend rejects is skipped and reported.
    pub fn reregister(&mut self, shortcuts: &ShortcutMap, enabled: bool) -> RegistrationReport {
        self.bindings.replace(HashMap::new());
        for handle in self.handles.drain(..) {
            if let Err(e) = self.backend.unregister(handle) {
                warn!("failed to release hotkey: {}", e);
            }
        }

        let mut report = RegistrationReport::default();
        if !enabled {
            info!("hotkeys disabled, {} shortcuts inert", shortcuts.len());
            return report;
        }

        let mut table = HashMap::with_capacity(shortcuts.len());
        for (descriptor, command) in shortcuts {
            match self.backend.register(descriptor) {
                Ok(handle) => {
                    debug!("registered '{}' -> {}", descriptor, command);
                    self.handles.push(handle);
                    table.insert(
                        handle,
                        Binding {
                            descriptor: descriptor.clone(),
                            command: command.clone(),
                        },
                    );
                    report.registered += 1;
                }
                Err(e) => {
                    warn!("could not register hotkey '{}': {}", descriptor, e);
                    report.failures.push(RegistrationFailure {
                        descriptor: descriptor.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        self.bindings.replace(table);

        info!(
            "registered {} of {} hotkeys",
            report.registered,
            shortcuts.len()
        );
        report
    }
}

/// Routes fired hotkeys to the launcher.
pub struct HotkeyDispatcher<S> {
    bindings: BindingTable,
    spawner: S,
}

impl<S: Spawner> HotkeyDispatcher<S> {
    pub fn new(bindings: BindingTable, spawner: S) -> Self {
        Self { bindings, spawner }
    }

    /// Returns whether a command was handed to the launcher.
    pub fn dispatch(&self, handle: HotkeyHandle, state: HotKeyState) -> bool {
        if state != HotKeyState::Pressed {
            return false;
        }

        let Some(command) = self.bindings.command_for(handle) else {
            debug!("ignoring event for unbound hotkey {}", handle);
            return false;
        };

        info!("hotkey fired, launching: {}", command);
        if let Err(e) = self.spawner.spawn(&command) {
            error!("{}", e);
        }
        true
    }
}

impl<S: Spawner + Send + 'static> HotkeyDispatcher<S> {
    pub fn spawn_listener(self) -> Result<JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name("hotkey-listener".to_string())
            .spawn(move || {
                info!("starting global hotkey event listener thread");
                let receiver = GlobalHotKeyEvent::receiver();
                while let Ok(event) = receiver.recv() {
                    self.dispatch(event.id, event.state);
                }
            })
            .map_err(listener_error)?;
        Ok(handle)
    }
}

fn listener_error(e: std::io::Error) -> KeyTaskError {
    KeyTaskError::Hotkey {
        descriptor: String::new(),
        reason: format!("failed to start listener: {e}"),
    }
}
