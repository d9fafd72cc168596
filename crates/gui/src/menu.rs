//! Menu bar: File, View, Help.

use egui::Ui;

/// Actions triggered by menu items.
pub enum MenuAction {
    Exit,
    /// Same as pressing the on-map location button.
    Locate,
    ClearFilters,
    About,
    None,
}

/// Show the main menu bar. Returns the action triggered (if any).
///
/// `map_ready` is false while the map is still waiting for the first
/// position; map-dependent entries are disabled until then.
pub fn show_menu_bar(ui: &mut Ui, map_ready: bool) -> MenuAction {
    let mut action = MenuAction::None;

    egui::menu::bar(ui, |ui| {
        ui.menu_button("File", |ui| {
            if ui.button("Exit").clicked() {
                action = MenuAction::Exit;
                ui.close_menu();
            }
        });

        ui.menu_button("View", |ui| {
            if ui
                .add_enabled(map_ready, egui::Button::new("Show My Location"))
                .clicked()
            {
                action = MenuAction::Locate;
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Clear Filters").clicked() {
                action = MenuAction::ClearFilters;
                ui.close_menu();
            }
        });

        ui.menu_button("Help", |ui| {
            if ui.button("About FoodMap").clicked() {
                action = MenuAction::About;
                ui.close_menu();
            }
        });
    });

    action
}
