//! Mod list panel

use eframe::egui;

use crate::app::ModManagerApp;

/// Text color of disabled mods
const DISABLED_COLOR: egui::Color32 = egui::Color32::from_rgb(224, 108, 117);

/// Mod list panel
pub struct ModListPanel;

impl ModListPanel {
    /// Show the mod list panel
    pub fn show(ui: &mut egui::Ui, app: &mut ModManagerApp) {
        ui.vertical(|ui| {
            ui.heading("Mods");
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("mod_list_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if app.mods.is_empty() {
                        Self::show_empty(ui);
                        return;
                    }

                    let mut toggle = None;
                    for entry in app.mods.iter() {
                        let is_selected = app.selected.as_deref() == Some(entry.name.as_str());
                        let mut text = egui::RichText::new(entry.label());
                        if entry.is_disabled() {
                            text = text.color(DISABLED_COLOR);
                        }

                        let response = ui
                            .selectable_label(is_selected, text)
                            .on_hover_text(entry.files.join("\n"));
                        if response.clicked() {
                            app.selected = Some(entry.name.clone());
                        }
                        if response.double_clicked() {
                            toggle = Some(entry.name.clone());
                        }
                    }

                    if let Some(name) = toggle {
                        app.selected = Some(name);
                        app.toggle_selected();
                    }
                });
        });
    }

    /// Show empty state
    fn show_empty(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label("No mods found");
            ui.label("Mod files end in _P.pak, _P.utoc or _P.ucas");
        });
    }
}
