//! Sidebar list: one clickable row per visible restaurant.

use egui::{Color32, RichText, Ui};

use foodmap_core::{Catalog, Category};

pub fn category_color(category: Category) -> Color32 {
    match category {
        Category::Veg => Color32::from_rgb(60, 200, 80),
        Category::NonVeg => Color32::from_rgb(220, 60, 60),
    }
}

/// Show the result count and the list of `visible` catalog entries.
///
/// Returns the catalog index of the row that was clicked, if any. The list
/// only reports the click; moving the map is the map view's business.
pub fn show_restaurant_list(ui: &mut Ui, catalog: &Catalog, visible: &[usize]) -> Option<usize> {
    let mut clicked = None;

    ui.label(RichText::new(format!("Found {} restaurants", visible.len())).weak());
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for &index in visible {
                let Some(record) = catalog.get(index) else { continue };

                let row = egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(&record.title).strong());
                    ui.label(RichText::new(&record.description).small());
                    ui.label(
                        RichText::new(record.category.label())
                            .small()
                            .color(category_color(record.category)),
                    );
                });

                let response = row
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand);
                if response.hovered() {
                    ui.painter().rect_filled(
                        response.rect,
                        4.0,
                        Color32::from_white_alpha(12),
                    );
                }
                if response.clicked() {
                    clicked = Some(index);
                }
            }
        });

    clicked
}
