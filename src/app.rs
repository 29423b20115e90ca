//! Main application state and UI coordination

use std::path::{Path, PathBuf};
use std::time::Duration;

use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::error::ModError;
use crate::core::mod_files::{self, ModEntry, ModList};
use crate::core::watcher::FolderWatcher;
use crate::ui::{mod_list::ModListPanel, toolbar::Toolbar};

/// How often the UI wakes up to poll the folder watcher
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Keys pressed this frame, ignoring auto-repeat so a held key acts once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shortcuts {
    pub refresh: bool,
    pub toggle: bool,
    pub delete: bool,
}

impl Shortcuts {
    /// Collect fresh key presses from the frame input
    pub fn read(input: &egui::InputState) -> Self {
        let mut shortcuts = Self::default();
        for event in &input.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } = event
            {
                match key {
                    egui::Key::F5 => shortcuts.refresh = true,
                    egui::Key::Enter => shortcuts.toggle = true,
                    egui::Key::Delete => shortcuts.delete = true,
                    _ => {}
                }
            }
        }
        shortcuts
    }
}

/// Main application state
pub struct ModManagerApp {
    /// Application configuration
    pub config: AppConfig,
    /// Where the configuration is persisted
    config_path: PathBuf,
    /// Folder currently listed
    pub mod_folder: PathBuf,
    /// Mods found on the last refresh
    pub mods: ModList,
    /// Name of the selected mod
    pub selected: Option<String>,
    /// Last action outcome
    pub status: Status,
    /// Why the folder could not be listed on the last refresh
    pub folder_error: Option<String>,
    watcher: Option<FolderWatcher>,
}

impl ModManagerApp {
    /// Create a new application instance
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        config_path: PathBuf,
        mod_folder: PathBuf,
    ) -> Self {
        Self::with_folder(config, config_path, mod_folder)
    }

    /// Build the state for a folder and list its mods
    pub fn with_folder(config: AppConfig, config_path: PathBuf, mod_folder: PathBuf) -> Self {
        let mut app = Self {
            config,
            config_path,
            mod_folder: PathBuf::new(),
            mods: ModList::default(),
            selected: None,
            status: Status::Info(String::new()),
            folder_error: None,
            watcher: None,
        };
        app.open_folder(mod_folder);
        app
    }

    /// Point the app at a folder and start following it
    fn open_folder(&mut self, folder: PathBuf) {
        self.watcher = match FolderWatcher::watch(&folder) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!("Folder changes will not be picked up: {:#}", e);
                None
            }
        };
        self.mod_folder = folder;
        self.selected = None;
        self.refresh_mod_list();
    }

    /// Rebuild the mod list from disk
    pub fn refresh_mod_list(&mut self) {
        match mod_files::scan(&self.mod_folder) {
            Ok(mods) => {
                self.mods = mods;
                self.folder_error = None;
            }
            Err(e) => {
                tracing::error!("Failed to read mod folder: {}", e);
                self.mods = ModList::default();
                self.folder_error = Some(e.to_string());
            }
        }

        if let Some(ref name) = self.selected {
            if self.mods.get(name).is_none() {
                self.selected = None;
            }
        }
    }

    /// Folder state shown next to the last action
    pub fn summary(&self) -> String {
        match self.folder_error {
            Some(ref e) => e.clone(),
            None => format!(
                "{} mods ({} enabled, {} disabled)",
                self.mods.len(),
                self.mods.enabled_count(),
                self.mods.disabled_count()
            ),
        }
    }

    /// The selected mod, if it is still listed
    pub fn selected_mod(&self) -> Option<&ModEntry> {
        self.selected.as_deref().and_then(|name| self.mods.get(name))
    }

    /// Run an operation on the selected mod, then refresh the list
    fn apply_to_selected<F>(&mut self, verb: &str, op: F)
    where
        F: FnOnce(&Path, &ModEntry) -> Result<usize, ModError>,
    {
        let Some(entry) = self.selected_mod().cloned() else {
            return;
        };

        let result = op(&self.mod_folder, &entry);
        // Refresh even after a failure so the list matches what was renamed
        self.refresh_mod_list();

        match result {
            Ok(count) => {
                self.status = Status::Info(format!("{} '{}' ({} files)", verb, entry.name, count));
            }
            Err(e) => {
                tracing::error!("Failed to update mod {}: {}", entry.name, e);
                self.status = Status::Error(format!("'{}': {}", entry.name, e));
            }
        }
    }

    /// Enable the selected mod
    pub fn enable_selected(&mut self) {
        self.apply_to_selected("Enabled", mod_files::enable);
    }

    /// Disable the selected mod
    pub fn disable_selected(&mut self) {
        self.apply_to_selected("Disabled", mod_files::disable);
    }

    /// Flip the selected mod between enabled and disabled
    pub fn toggle_selected(&mut self) {
        match self.selected_mod().map(ModEntry::is_disabled) {
            Some(true) => self.enable_selected(),
            Some(false) => self.disable_selected(),
            None => {}
        }
    }

    /// Delete the selected mod without asking
    pub fn delete_selected_unconfirmed(&mut self) {
        self.apply_to_selected("Deleted", mod_files::delete);
    }

    /// Ask for confirmation, then delete the selected mod
    pub fn delete_selected(&mut self) {
        let Some(name) = self.selected_mod().map(|e| e.name.clone()) else {
            return;
        };

        let confirm = rfd::MessageDialog::new()
            .set_title("Delete Mod")
            .set_level(rfd::MessageLevel::Warning)
            .set_description(format!("Are you sure you want to delete the mod '{}'?", name))
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        if matches!(confirm, rfd::MessageDialogResult::Yes) {
            self.delete_selected_unconfirmed();
        }
    }

    /// Prompt for a new mod folder, keeping the current one on cancel
    pub fn change_mod_folder(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select Mods Folder")
            .set_directory(&self.mod_folder)
            .pick_folder();
        if let Some(path) = picked {
            self.switch_folder(path);
        }
    }

    /// Use another mod folder and persist the choice
    pub fn switch_folder(&mut self, path: PathBuf) {
        if !path.is_dir() {
            self.status = Status::Error(format!("Not a folder: {}", path.display()));
            return;
        }

        tracing::info!("Switching mod folder to {}", path.display());
        self.config.set_mod_folder(path.clone());
        self.open_folder(path);
        self.save_config();
    }

    /// Open the mod folder in the system file manager
    pub fn open_mod_folder(&mut self) {
        if let Err(e) = open::that(&self.mod_folder) {
            tracing::error!("Failed to open {}: {}", self.mod_folder.display(), e);
            self.status = Status::Error(format!("Could not open folder: {}", e));
        }
    }

    fn save_config(&mut self) {
        if let Err(e) = self.config.save_to(&self.config_path) {
            tracing::error!("Failed to save config: {:#}", e);
            self.status = Status::Error(format!("Could not save settings: {}", e));
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Folder", |ui| {
                    if ui.button("Change Folder...").clicked() {
                        ui.close();
                        self.change_mod_folder();
                    }
                    if ui.button("Open in File Manager").clicked() {
                        ui.close();
                        self.open_mod_folder();
                    }
                    ui.menu_button("Recent Folders", |ui| {
                        let recent: Vec<PathBuf> = self
                            .config
                            .recent_folders
                            .iter()
                            .filter(|p| **p != self.mod_folder && p.is_dir())
                            .cloned()
                            .collect();
                        if recent.is_empty() {
                            ui.label("No other folders");
                        }
                        for path in recent {
                            if ui.button(path.display().to_string()).clicked() {
                                ui.close();
                                self.switch_folder(path);
                            }
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Mod", |ui| {
                    let has_selection = self.selected_mod().is_some();
                    if ui.add_enabled(has_selection, egui::Button::new("Enable")).clicked() {
                        ui.close();
                        self.enable_selected();
                    }
                    if ui.add_enabled(has_selection, egui::Button::new("Disable")).clicked() {
                        ui.close();
                        self.disable_selected();
                    }
                    if ui.add_enabled(has_selection, egui::Button::new("Delete...")).clicked() {
                        ui.close();
                        self.delete_selected();
                    }
                    ui.separator();
                    if ui.button("Refresh").clicked() {
                        ui.close();
                        self.refresh_mod_list();
                    }
                });
            });
        });
    }

    /// Render the status bar
    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.mod_folder.display().to_string());
                ui.separator();
                if self.folder_error.is_some() {
                    ui.colored_label(egui::Color32::from_rgb(224, 108, 117), self.summary());
                } else {
                    ui.label(self.summary());
                }
                ui.separator();
                match &self.status {
                    Status::Info(text) => {
                        ui.label(text);
                    }
                    Status::Error(text) => {
                        ui.colored_label(egui::Color32::from_rgb(224, 108, 117), text);
                    }
                }
            });
        });
    }
}

impl eframe::App for ModManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(changed) = self.watcher.as_ref().map(FolderWatcher::changed) {
            if changed {
                tracing::debug!("Mod folder changed on disk");
                self.refresh_mod_list();
            }
            ctx.request_repaint_after(WATCH_POLL_INTERVAL);
        }

        // Handle keyboard shortcuts
        let shortcuts = ctx.input(Shortcuts::read);
        if shortcuts.refresh {
            self.refresh_mod_list();
        }
        if shortcuts.toggle {
            self.toggle_selected();
        }
        if shortcuts.delete {
            self.delete_selected();
        }

        self.render_menu_bar(ctx);
        self.render_status_bar(ctx);

        egui::TopBottomPanel::bottom("toolbar").show(ctx, |ui| {
            Toolbar::show(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ModListPanel::show(ui, self);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn app_with(files: &[&str]) -> (TempDir, ModManagerApp) {
        let dir = TempDir::new().unwrap();
        let mods = dir.path().join("Mods");
        fs::create_dir(&mods).unwrap();
        for file in files {
            fs::write(mods.join(file), b"data").unwrap();
        }
        let config_path = dir.path().join("config.json");
        let app = ModManagerApp::with_folder(AppConfig::default(), config_path, mods);
        (dir, app)
    }

    #[test]
    fn test_initial_listing() {
        let (_dir, app) = app_with(&["Foo_P.pak", "Bar_P_Disabled.pak", "base.pak"]);
        assert_eq!(app.mods.len(), 2);
        assert!(app.selected.is_none());
        assert_eq!(app.summary(), "2 mods (1 enabled, 1 disabled)");
    }

    #[test]
    fn test_toggle_selected() {
        let (_dir, mut app) = app_with(&["Foo_P.pak", "Foo_P.utoc"]);
        app.selected = Some("Foo_P".to_string());

        app.toggle_selected();
        assert!(app.selected_mod().unwrap().is_disabled());
        assert!(app.mod_folder.join("Foo_P_Disabled.utoc").exists());

        app.toggle_selected();
        assert!(!app.selected_mod().unwrap().is_disabled());
        assert!(app.mod_folder.join("Foo_P.utoc").exists());
    }

    #[test]
    fn test_actions_without_selection_do_nothing() {
        let (_dir, mut app) = app_with(&["Foo_P.pak"]);
        app.disable_selected();
        app.delete_selected_unconfirmed();
        assert!(app.mod_folder.join("Foo_P.pak").exists());
    }

    #[test]
    fn test_delete_clears_selection() {
        let (_dir, mut app) = app_with(&["Foo_P.pak", "Bar_P.pak"]);
        app.selected = Some("Foo_P".to_string());

        app.delete_selected_unconfirmed();
        assert!(app.selected.is_none());
        assert!(app.mods.get("Foo_P").is_none());
        assert!(app.mod_folder.join("Bar_P.pak").exists());
    }

    #[test]
    fn test_failed_rename_reports_error() {
        let (_dir, mut app) = app_with(&["Foo_P.pak", "Foo_P_Disabled.utoc"]);
        fs::write(app.mod_folder.join("Foo_P.utoc"), b"clash").unwrap();
        app.selected = Some("Foo_P".to_string());

        app.enable_selected();
        assert!(matches!(app.status, Status::Error(_)));
        assert!(app.mod_folder.join("Foo_P_Disabled.utoc").exists());
    }

    #[test]
    fn test_vanished_folder_clears_list() {
        let (_dir, mut app) = app_with(&["Foo_P.pak"]);
        fs::remove_dir_all(&app.mod_folder).unwrap();

        app.refresh_mod_list();
        assert!(app.mods.is_empty());
        assert!(app.folder_error.is_some());
        assert_eq!(app.summary(), app.folder_error.clone().unwrap());

        fs::create_dir(&app.mod_folder).unwrap();
        app.refresh_mod_list();
        assert!(app.folder_error.is_none());
    }

    #[test]
    fn test_action_message_survives_refresh() {
        let (_dir, mut app) = app_with(&["Foo_P.pak", "Bar_P.pak"]);
        app.selected = Some("Foo_P".to_string());

        app.disable_selected();
        let expected = Status::Info("Disabled 'Foo_P' (1 files)".to_string());
        assert_eq!(app.status, expected);

        // Let the watcher see our own rename, as the next frame would
        std::thread::sleep(Duration::from_millis(600));
        if app.watcher.as_ref().is_some_and(FolderWatcher::changed) {
            app.refresh_mod_list();
        }
        app.refresh_mod_list();

        assert_eq!(app.status, expected);
        assert_eq!(app.summary(), "2 mods (1 enabled, 1 disabled)");
    }

    fn key(key: egui::Key, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn shortcuts_for(events: Vec<egui::Event>) -> Shortcuts {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut shortcuts = Shortcuts::default();
        let _ = ctx.run(input, |ctx| {
            shortcuts = ctx.input(Shortcuts::read);
        });
        shortcuts
    }

    #[test]
    fn test_shortcuts_fire_on_fresh_press() {
        let shortcuts = shortcuts_for(vec![key(egui::Key::Enter, false), key(egui::Key::F5, false)]);
        assert!(shortcuts.toggle);
        assert!(shortcuts.refresh);
        assert!(!shortcuts.delete);
    }

    #[test]
    fn test_shortcuts_ignore_key_repeat() {
        let shortcuts = shortcuts_for(vec![
            key(egui::Key::Enter, true),
            key(egui::Key::Delete, true),
        ]);
        assert_eq!(shortcuts, Shortcuts::default());
    }

    #[test]
    fn test_shortcuts_ignore_release() {
        let shortcuts = shortcuts_for(vec![egui::Event::Key {
            key: egui::Key::Delete,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }]);
        assert!(!shortcuts.delete);
    }

    #[test]
    fn test_switch_folder_persists_config() {
        let (dir, mut app) = app_with(&["Foo_P.pak"]);
        let other = dir.path().join("Other");
        fs::create_dir(&other).unwrap();
        fs::write(other.join("Bar_P.pak"), b"data").unwrap();

        app.switch_folder(other.clone());
        assert_eq!(app.mod_folder, other);
        assert!(app.mods.get("Bar_P").is_some());

        let saved = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(saved.mod_folder, Some(other.clone()));
        assert_eq!(saved.recent_folders, vec![other]);
    }

    #[test]
    fn test_switch_to_missing_folder_is_rejected() {
        let (dir, mut app) = app_with(&["Foo_P.pak"]);
        let before = app.mod_folder.clone();

        app.switch_folder(dir.path().join("missing"));
        assert_eq!(app.mod_folder, before);
        assert!(matches!(app.status, Status::Error(_)));
        assert!(!dir.path().join("config.json").exists());
    }
}
