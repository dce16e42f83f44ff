use eframe::egui;

use crate::editor::ShortcutForm;

/// Blocking message shown over the editor.
pub struct Message {
    pub title: &'static str,
    pub text: String,
}

impl Message {
    pub fn error(text: String) -> Self {
        Self {
            title: "Error",
            text,
        }
    }

    pub fn info(title: &'static str, text: &str) -> Self {
        Self {
            title,
            text: text.to_string(),
        }
    }
}

pub struct SettingsDialog {
    pub start_with_windows: bool,
}

impl SettingsDialog {
    pub fn new(start_with_windows: bool) -> Self {
        Self { start_with_windows }
    }
}

fn centered(title: &str) -> egui::Window<'static> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

/// Returns `(save, cancel)` clicks.
pub fn shortcut_form(ctx: &egui::Context, form: &mut ShortcutForm) -> (bool, bool) {
    let mut save = false;
    let mut cancel = false;

    centered(form.title()).show(ctx, |ui| {
        ui.label("Hotkey:");
        ui.add(egui::TextEdit::singleline(&mut form.hotkey).desired_width(300.0));
        ui.label("Command:");
        ui.add(egui::TextEdit::singleline(&mut form.command).desired_width(300.0));
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            save = ui.button("Save").clicked();
            cancel = ui.button("Cancel").clicked();
        });
    });

    (save, cancel)
}

/// `Some(answer)` once the user picked yes or no.
pub fn confirm_delete(ctx: &egui::Context, hotkey: &str) -> Option<bool> {
    let mut answer = None;

    centered("Delete").show(ctx, |ui| {
        ui.label(format!("Delete shortcut '{hotkey}'?"));
        ui.horizontal(|ui| {
            if ui.button("Yes").clicked() {
                answer = Some(true);
            }
            if ui.button("No").clicked() {
                answer = Some(false);
            }
        });
    });

    answer
}

/// `Some(true)` on Save, `Some(false)` on Cancel.
pub fn settings(ctx: &egui::Context, dialog: &mut SettingsDialog) -> Option<bool> {
    let mut choice = None;

    centered("Settings").show(ctx, |ui| {
        ui.checkbox(&mut dialog.start_with_windows, "Start with Windows");
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                choice = Some(true);
            }
            if ui.button("Cancel").clicked() {
                choice = Some(false);
            }
        });
    });

    choice
}

/// Returns true once dismissed.
pub fn message(ctx: &egui::Context, message: &Message) -> bool {
    let mut dismissed = false;

    centered(message.title)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.label(&message.text);
            ui.add_space(10.0);
            dismissed = ui.button("OK").clicked();
        });

    dismissed
}
