//! End-to-end behavior of the shortcut controller against in-memory OS
//! facilities: persistence, registration and dispatch.

mod common;

use common::{open_controller, MemoryBackend, RecordingSpawner};
use global_hotkey::HotKeyState;
use keytask::{HotkeyDispatcher, KeyTaskError, ShortcutForm, ShortcutMap, ShortcutStore};

fn add(hotkey: &str, command: &str) -> ShortcutForm {
    let mut form = ShortcutForm::new_shortcut();
    form.hotkey = hotkey.to_string();
    form.command = command.to_string();
    form
}

fn pairs(map: &ShortcutMap) -> Vec<(String, String)> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

// === Persistence ===

#[test]
fn saved_mapping_loads_back_equal() {
    let dir = tempfile::tempdir().unwrap();
    let store = ShortcutStore::new(dir.path().join("shortcuts.json"));
    let mut map = ShortcutMap::new();
    map.insert("ctrl+alt+n".to_string(), "notepad.exe".to_string());
    map.insert("ctrl+alt+c".to_string(), "calc.exe".to_string());
    map.insert("ctrl+shift+t".to_string(), "wt.exe -p \"PowerShell\"".to_string());

    store.save(&map).unwrap();

    assert_eq!(store.load(), map);
}

#[test]
fn every_mutation_is_persisted_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());

    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();
    let on_disk = ShortcutStore::new(dir.path().join("shortcuts.json")).load();
    assert_eq!(&on_disk, controller.shortcuts());

    controller.delete("ctrl+alt+n").unwrap();
    let on_disk = ShortcutStore::new(dir.path().join("shortcuts.json")).load();
    assert!(on_disk.is_empty());
}

#[test]
fn existing_file_is_loaded_and_registered_on_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("shortcuts.json"),
        r#"{"ctrl+alt+k": "calc.exe", "ctrl+alt+n": "notepad.exe"}"#,
    )
    .unwrap();

    let controller = open_controller(&dir, MemoryBackend::default());

    assert_eq!(controller.shortcuts().len(), 2);
    assert_eq!(controller.registrar().live_handles().len(), 2);
}

// === Editing ===

#[test]
fn added_shortcut_is_listed() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());

    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();

    assert_eq!(
        pairs(controller.shortcuts()),
        [("ctrl+alt+n".to_string(), "notepad.exe".to_string())]
    );
    assert!(controller.registrar().backend().handle_of("ctrl+alt+n").is_some());
}

#[test]
fn renaming_moves_the_command_to_the_new_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();

    let mut form = ShortcutForm::edit("ctrl+alt+n", "notepad.exe");
    form.hotkey = "ctrl+alt+m".to_string();
    controller.save_shortcut(&form).unwrap();

    let shortcuts = controller.shortcuts();
    assert!(!shortcuts.contains_key("ctrl+alt+n"));
    assert_eq!(shortcuts.get("ctrl+alt+m").map(String::as_str), Some("notepad.exe"));
    let backend = controller.registrar().backend();
    assert!(backend.handle_of("ctrl+alt+n").is_none());
    assert!(backend.handle_of("ctrl+alt+m").is_some());
}

#[test]
fn editing_the_command_keeps_position() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+a", "a.exe")).unwrap();
    controller.save_shortcut(&add("ctrl+alt+b", "b.exe")).unwrap();

    let mut form = ShortcutForm::edit("ctrl+alt+a", "a.exe");
    form.command = "other.exe".to_string();
    controller.save_shortcut(&form).unwrap();

    let keys: Vec<_> = controller.shortcuts().keys().cloned().collect();
    assert_eq!(keys, ["ctrl+alt+a", "ctrl+alt+b"]);
    assert_eq!(controller.shortcuts()["ctrl+alt+a"], "other.exe");
}

#[test]
fn empty_command_is_rejected_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();
    let before = controller.shortcuts().clone();

    let err = controller.save_shortcut(&add("ctrl+alt+m", "  ")).unwrap_err();

    assert!(matches!(err, KeyTaskError::Validation(_)));
    assert_eq!(err.to_string(), "Fields cannot be empty.");
    assert_eq!(controller.shortcuts(), &before);
    assert!(controller.registrar().backend().handle_of("ctrl+alt+m").is_none());
}

#[test]
fn deleting_a_missing_key_reports_false() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());

    assert!(!controller.delete("ctrl+alt+x").unwrap());
    assert!(!dir.path().join("shortcuts.json").exists());
}

#[test]
fn failed_save_leaves_mapping_and_registrations_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store = ShortcutStore::new(blocker.join("shortcuts.json"));
    let mut controller = keytask::ShortcutController::open(
        store,
        keytask::HotkeyRegistrar::new(MemoryBackend::default()),
        true,
    );

    let err = controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap_err();

    assert!(matches!(err, KeyTaskError::Storage(_)));
    assert!(controller.shortcuts().is_empty());
    assert!(controller.registrar().live_handles().is_empty());
}

// === Registration ===

#[test]
fn disabling_leaves_no_live_registrations() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();
    controller.save_shortcut(&add("ctrl+alt+c", "calc.exe")).unwrap();

    controller.set_enabled(false);

    assert!(!controller.is_enabled());
    assert!(controller.registrar().live_handles().is_empty());
    assert!(controller.registrar().backend().live.is_empty());
    assert!(controller.bindings().is_empty());
}

#[test]
fn re_enabling_restores_every_registration() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();
    controller.set_enabled(false);

    controller.set_enabled(true);
    controller.set_enabled(true);

    assert_eq!(controller.registrar().live_handles().len(), 1);
    assert_eq!(controller.registrar().backend().live.len(), 1);
}

#[test]
fn edits_while_disabled_stay_inert() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.set_enabled(false);

    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();

    assert_eq!(controller.shortcuts().len(), 1);
    assert!(controller.registrar().live_handles().is_empty());
}

#[test]
fn rejected_hotkey_is_reported_and_others_still_register() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::rejecting(&["ctrl+alt+b"]));

    controller.save_shortcut(&add("ctrl+alt+a", "a.exe")).unwrap();
    controller.save_shortcut(&add("ctrl+alt+b", "b.exe")).unwrap();
    controller.save_shortcut(&add("ctrl+alt+c", "c.exe")).unwrap();

    assert_eq!(controller.shortcuts().len(), 3);
    assert_eq!(controller.registrar().live_handles().len(), 2);
    assert_eq!(controller.failures().len(), 1);
    assert!(controller.failure_for("ctrl+alt+b").is_some());
    assert!(controller.failure_for("ctrl+alt+a").is_none());
}

#[test]
fn shutdown_releases_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();

    controller.shutdown();

    assert!(controller.registrar().backend().live.is_empty());
    assert_eq!(controller.shortcuts().len(), 1);
}

// === Dispatch ===

#[test]
fn firing_a_hotkey_launches_its_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();
    let spawner = RecordingSpawner::default();
    let dispatcher = HotkeyDispatcher::new(controller.bindings(), spawner.clone());
    let handle = controller.registrar().backend().handle_of("ctrl+alt+n").unwrap();

    dispatcher.dispatch(handle, HotKeyState::Pressed);

    assert_eq!(spawner.launched(), ["notepad.exe"]);
}

#[test]
fn deleted_hotkey_no_longer_launches() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();
    let spawner = RecordingSpawner::default();
    let dispatcher = HotkeyDispatcher::new(controller.bindings(), spawner.clone());
    let old_handle = controller.registrar().backend().handle_of("ctrl+alt+n").unwrap();

    assert!(controller.delete("ctrl+alt+n").unwrap());
    let fired = dispatcher.dispatch(old_handle, HotKeyState::Pressed);

    assert!(!fired);
    assert!(spawner.launched().is_empty());
    assert!(controller.registrar().backend().live.is_empty());
}

#[test]
fn disabled_hotkeys_do_not_launch() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open_controller(&dir, MemoryBackend::default());
    controller.save_shortcut(&add("ctrl+alt+n", "notepad.exe")).unwrap();
    let spawner = RecordingSpawner::default();
    let dispatcher = HotkeyDispatcher::new(controller.bindings(), spawner.clone());
    let handle = controller.registrar().backend().handle_of("ctrl+alt+n").unwrap();

    controller.set_enabled(false);
    dispatcher.dispatch(handle, HotKeyState::Pressed);

    assert!(spawner.launched().is_empty());
}
