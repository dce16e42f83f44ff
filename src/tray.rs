use std::sync::mpsc::Sender;

/// Requests posted from the tray (or a signal) to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    ShowEditor,
    OpenSettings,
    Enable,
    Disable,
    Quit,
}

/// Menu item IDs for event handling
pub mod menu_ids {
    pub const EDIT_SHORTCUT: &str = "edit_shortcut";
    pub const SETTINGS: &str = "settings";
    pub const ENABLE: &str = "enable";
    pub const DISABLE: &str = "disable";
    pub const EXIT: &str = "exit";
}

impl AppEvent {
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            menu_ids::EDIT_SHORTCUT => Some(Self::ShowEditor),
            menu_ids::SETTINGS => Some(Self::OpenSettings),
            menu_ids::ENABLE => Some(Self::Enable),
            menu_ids::DISABLE => Some(Self::Disable),
            menu_ids::EXIT => Some(Self::Quit),
            _ => None,
        }
    }

    /// Whether handling this needs the main window on screen.
    pub fn needs_window(self) -> bool {
        matches!(self, Self::ShowEditor | Self::OpenSettings)
    }
}

/// One-way channel to the UI thread plus a hook to wake it up.
#[derive(Clone)]
pub struct EventSink<W> {
    tx: Sender<AppEvent>,
    wake: W,
}

impl<W: Fn(AppEvent)> EventSink<W> {
    pub fn new(tx: Sender<AppEvent>, wake: W) -> Self {
        Self { tx, wake }
    }

    /// Returns false once the UI side has gone away.
    pub fn post(&self, event: AppEvent) -> bool {
        if self.tx.send(event).is_err() {
            return false;
        }
        (self.wake)(event);
        true
    }
}

#[cfg(windows)]
pub use self::native::{setup_tray, spawn_menu_forwarder};

#[cfg(windows)]
mod native {
    use anyhow::Result;
    use std::thread::{self, JoinHandle};
    use tracing::{info, warn};
    use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
    use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

    use super::{menu_ids, AppEvent, EventSink};
    use crate::icon;

    /// Builds the tray icon. Must run on the thread that pumps window messages.
    pub fn setup_tray() -> Result<TrayIcon> {
        let menu = Menu::new();
        menu.append_items(&[
            &MenuItem::with_id(menu_ids::EDIT_SHORTCUT, "Edit Shortcut", true, None),
            &MenuItem::with_id(menu_ids::SETTINGS, "Settings", true, None),
            &PredefinedMenuItem::separator(),
            &MenuItem::with_id(menu_ids::ENABLE, "Enable", true, None),
            &MenuItem::with_id(menu_ids::DISABLE, "Disable", true, None),
            &MenuItem::with_id(menu_ids::EXIT, "Exit", true, None),
        ])?;

        let image = icon::app_icon();
        let icon = Icon::from_rgba(image.rgba, image.width, image.height)?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip("KeyTask")
            .with_icon(icon)
            .build()?;

        info!("tray icon ready");
        Ok(tray)
    }

    /// Drains tray menu events on their own thread. Stops after Exit.
    pub fn spawn_menu_forwarder<W>(sink: EventSink<W>) -> Result<JoinHandle<()>>
    where
        W: Fn(AppEvent) + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("tray-events".to_string())
            .spawn(move || {
                let receiver = MenuEvent::receiver();
                while let Ok(event) = receiver.recv() {
                    let Some(app_event) = AppEvent::from_menu_id(&event.id.0) else {
                        warn!("unhandled menu id: {:?}", event.id);
                        continue;
                    };
                    info!("tray menu: {:?}", app_event);
                    if !sink.post(app_event) || app_event == AppEvent::Quit {
                        break;
                    }
                }
                info!("tray event loop stopped");
            })?;
        Ok(handle)
    }
}
