//! KeyTask: global keyboard shortcuts that launch shell commands, managed
//! from a tray icon and a small editor window.

pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod hotkeys;
pub mod icon;
pub mod launcher;
pub mod platform;
pub mod tray;
pub mod window;

#[cfg(windows)]
pub mod ui;

pub use config::{Settings, ShortcutMap, ShortcutStore};
pub use controller::ShortcutController;
pub use editor::{FormError, ShortcutForm};
pub use error::{KeyTaskError, Result};
pub use hotkeys::{
    BindingTable, GlobalHotkeyBackend, HotkeyBackend, HotkeyDispatcher, HotkeyHandle,
    HotkeyRegistrar, RegistrationFailure, RegistrationReport,
};
pub use launcher::{CommandLauncher, Spawner};
pub use tray::AppEvent;
