//! Editor window, add/edit form and settings dialog.
//!
//! The UI thread is the only writer of the shortcut controller. Tray and
//! signal requests arrive as [`AppEvent`]s on a channel drained every frame.

mod dialogs;

use anyhow::Result;
use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{error, info, warn};
use tray_icon::TrayIcon;

use crate::config::ShortcutStore;
use crate::controller::ShortcutController;
use crate::editor::ShortcutForm;
use crate::error::KeyTaskError;
use crate::hotkeys::{GlobalHotkeyBackend, HotkeyDispatcher, HotkeyRegistrar};
use crate::icon;
use crate::launcher::CommandLauncher;
use crate::platform::autostart;
use crate::tray::{self, AppEvent, EventSink};
use crate::window::{CloseAction, WindowVisibility};

use dialogs::{Message, SettingsDialog};

// how often a hidden window checks for tray requests
const HIDDEN_POLL: Duration = Duration::from_millis(250);

pub struct UiOptions {
    pub store: ShortcutStore,
    pub enabled: bool,
    pub show_on_start: bool,
    pub runtime: Handle,
}

pub fn run(options: UiOptions) -> Result<()> {
    let image = icon::app_icon();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("KeyTask")
            .with_inner_size([500.0, 300.0])
            .with_resizable(false)
            .with_visible(options.show_on_start)
            .with_icon(egui::IconData {
                rgba: image.rgba,
                width: image.width,
                height: image.height,
            }),
        ..Default::default()
    };

    eframe::run_native(
        "KeyTask",
        native_options,
        Box::new(
            move |cc: &eframe::CreationContext<'_>| -> std::result::Result<
                Box<dyn eframe::App>,
                Box<dyn std::error::Error + Send + Sync>,
            > { Ok(Box::new(KeyTaskApp::new(cc, options)?)) },
        ),
    )
    .map_err(|e| anyhow::anyhow!("ui event loop failed: {e}"))
}

pub struct KeyTaskApp {
    controller: ShortcutController<GlobalHotkeyBackend>,
    events: Receiver<AppEvent>,
    quitting: Arc<AtomicBool>,
    window: WindowVisibility,
    selected: Option<String>,
    form: Option<ShortcutForm>,
    confirm_delete: Option<String>,
    settings: Option<SettingsDialog>,
    message: Option<Message>,
    _tray: Option<TrayIcon>,
}

impl KeyTaskApp {
    fn new(cc: &eframe::CreationContext, options: UiOptions) -> Result<Self> {
        // the hotkey manager must be created on the event loop thread
        let backend = GlobalHotkeyBackend::new()?;
        let controller = ShortcutController::open(
            options.store,
            HotkeyRegistrar::new(backend),
            options.enabled,
        );

        HotkeyDispatcher::new(controller.bindings(), CommandLauncher::new(options.runtime))
            .spawn_listener()?;

        let quitting = Arc::new(AtomicBool::new(false));
        let (tx, events) = channel();
        let ctx = cc.egui_ctx.clone();
        let quit_flag = quitting.clone();
        let sink = EventSink::new(tx, move |event: AppEvent| {
            if event == AppEvent::Quit {
                quit_flag.store(true, Ordering::SeqCst);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            if event.needs_window() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
            }
            ctx.request_repaint();
        });

        let tray = match tray::setup_tray() {
            Ok(tray) => {
                tray::spawn_menu_forwarder(sink.clone())?;
                Some(tray)
            }
            Err(e) => {
                error!("failed to create tray icon: {}", e);
                None
            }
        };

        let signal_sink = sink;
        if let Err(e) = ctrlc::set_handler(move || {
            signal_sink.post(AppEvent::Quit);
        }) {
            warn!("failed to install ctrl-c handler: {}", e);
        }

        Ok(Self {
            controller,
            events,
            quitting,
            window: WindowVisibility::new(options.show_on_start),
            selected: None,
            form: None,
            confirm_delete: None,
            settings: None,
            message: None,
            _tray: tray,
        })
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                AppEvent::ShowEditor => self.show_window(ctx),
                AppEvent::OpenSettings => {
                    self.show_window(ctx);
                    self.settings = Some(SettingsDialog::new(autostart::is_enabled()));
                }
                AppEvent::Enable => self.controller.set_enabled(true),
                AppEvent::Disable => self.controller.set_enabled(false),
                AppEvent::Quit => {
                    self.quitting.store(true, Ordering::SeqCst);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn show_window(&mut self, ctx: &egui::Context) {
        self.window.show();
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    }

    /// Closing hides the window; only a quit request really exits.
    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }
        match self.window.close_requested(self.quitting.load(Ordering::SeqCst)) {
            CloseAction::Exit => {
                info!("exiting");
                self.controller.shutdown();
            }
            CloseAction::Hide => {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
            }
        }
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.controller.is_enabled() {
                ui.label("Hotkeys enabled");
            } else {
                ui.colored_label(egui::Color32::GRAY, "Hotkeys disabled");
            }
            let failed = self.controller.failures().len();
            if failed > 0 {
                ui.separator();
                ui.colored_label(
                    egui::Color32::from_rgb(200, 120, 0),
                    format!("{failed} not registered"),
                );
            }
        });
    }

    fn shortcut_list(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;

        egui::ScrollArea::vertical().max_height(210.0).show(ui, |ui| {
            egui::Grid::new("shortcuts")
                .num_columns(2)
                .striped(true)
                .min_col_width(150.0)
                .show(ui, |ui| {
                    ui.strong("Hotkey");
                    ui.strong("Command");
                    ui.end_row();

                    for (hotkey, command) in self.controller.shortcuts() {
                        let is_selected = self.selected.as_deref() == Some(hotkey.as_str());
                        let failure = self.controller.failure_for(hotkey);
                        let text = match failure {
                            Some(_) => egui::RichText::new(format!("⚠ {hotkey}"))
                                .color(egui::Color32::from_rgb(200, 120, 0)),
                            None => egui::RichText::new(hotkey.as_str()),
                        };
                        let mut row = ui.selectable_label(is_selected, text);
                        if let Some(failure) = failure {
                            row = row.on_hover_text(failure.reason.as_str());
                        }
                        if row.clicked() {
                            clicked = Some(hotkey.clone());
                        }
                        ui.label(command.as_str());
                        ui.end_row();
                    }
                });
        });

        if clicked.is_some() {
            self.selected = clicked;
        }

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("Add").clicked() {
                self.form = Some(ShortcutForm::new_shortcut());
            }
            if ui.button("Edit").clicked() {
                if let Some(hotkey) = &self.selected {
                    if let Some(command) = self.controller.shortcuts().get(hotkey) {
                        self.form = Some(ShortcutForm::edit(hotkey, command));
                    }
                }
            }
            if ui.button("Delete").clicked() {
                self.confirm_delete = self.selected.clone();
            }
        });
    }

    fn form_window(&mut self, ctx: &egui::Context) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let (save, cancel) = dialogs::shortcut_form(ctx, form);
        if cancel {
            self.form = None;
            return;
        }
        if !save {
            return;
        }

        let submitted = form.clone();
        match self.controller.save_shortcut(&submitted) {
            Ok(()) => {
                self.selected = submitted.validate().ok().map(|(hotkey, _)| hotkey);
                self.form = None;
            }
            Err(KeyTaskError::Validation(e)) => {
                self.message = Some(Message::error(e.to_string()));
            }
            Err(e) => {
                error!("failed to save shortcut: {}", e);
                self.message = Some(Message::error(e.to_string()));
            }
        }
    }

    fn delete_window(&mut self, ctx: &egui::Context) {
        let Some(hotkey) = self.confirm_delete.clone() else {
            return;
        };

        let Some(confirmed) = dialogs::confirm_delete(ctx, &hotkey) else {
            return;
        };
        self.confirm_delete = None;
        if !confirmed {
            return;
        }

        match self.controller.delete(&hotkey) {
            Ok(_) => self.selected = None,
            Err(e) => {
                error!("failed to delete shortcut: {}", e);
                self.message = Some(Message::error(e.to_string()));
            }
        }
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        let Some(settings) = self.settings.as_mut() else {
            return;
        };
        let Some(save) = dialogs::settings(ctx, settings) else {
            return;
        };

        let start_with_windows = settings.start_with_windows;
        self.settings = None;
        if !save {
            return;
        }
        self.message = Some(match autostart::set_enabled(start_with_windows) {
            Ok(()) => Message::info("Saved", "Settings updated."),
            Err(e) => {
                warn!("error toggling startup: {}", e);
                Message::error(e.to_string())
            }
        });
    }
}

impl eframe::App for KeyTaskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        if let Some(visible) = self.window.first_frame() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(visible));
        }
        self.handle_close_request(ctx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.shortcut_list(ui));

        if let Some(message) = &self.message {
            if dialogs::message(ctx, message) {
                self.message = None;
            }
        } else {
            self.form_window(ctx);
            self.delete_window(ctx);
            self.settings_window(ctx);
        }

        if !self.window.is_visible() {
            ctx.request_repaint_after(HIDDEN_POLL);
        }
    }
}

impl Drop for KeyTaskApp {
    fn drop(&mut self) {
        self.controller.shutdown();
    }
}
