//! Action buttons under the mod list

use eframe::egui;

use crate::app::ModManagerApp;

/// Row of buttons acting on the selected mod
pub struct Toolbar;

impl Toolbar {
    /// Show the toolbar
    pub fn show(ui: &mut egui::Ui, app: &mut ModManagerApp) {
        let has_selection = app.selected_mod().is_some();

        ui.columns(5, |columns| {
            let full = |ui: &mut egui::Ui, enabled: bool, label: &str| {
                ui.add_enabled(
                    enabled,
                    egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 28.0)),
                )
                .clicked()
            };

            if full(&mut columns[0], true, "Refresh List") {
                app.refresh_mod_list();
            }
            if full(&mut columns[1], has_selection, "Enable Mod") {
                app.enable_selected();
            }
            if full(&mut columns[2], has_selection, "Disable Mod") {
                app.disable_selected();
            }
            if full(&mut columns[3], has_selection, "Delete Mod") {
                app.delete_selected();
            }
            if full(&mut columns[4], true, "Change Folder") {
                app.change_mod_folder();
            }
        });
    }
}
