//! Filter/search panel: free-text search box and category selector.

use egui::Ui;

use foodmap_core::{CategoryFilter, Session};

/// Show the search box and category selector. Returns true if either changed.
pub fn show_search(ui: &mut Ui, session: &mut Session) -> bool {
    let mut changed = false;

    let mut search = session.search().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut search)
            .hint_text("Search restaurants...")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        session.set_search(search);
        changed = true;
    }

    ui.add_space(4.0);

    let mut category = session.category();
    egui::ComboBox::from_id_salt("category_filter")
        .selected_text(category.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for &option in CategoryFilter::OPTIONS {
                ui.selectable_value(&mut category, option, option.label());
            }
        });
    if category != session.category() {
        session.set_category(category);
        changed = true;
    }

    changed
}
