//! Dock layout using egui_dock.
//!
//! Layout: Restaurants (left, ~1/3) | Map (right, ~2/3)
//!         ─────────────────────────┼─────────────────────
//!         Console (bottom, ~20% of total height)

use egui_dock::{DockState, NodeIndex};

/// Panel identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Restaurants,
    Map,
    Console,
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelId::Restaurants => write!(f, "Restaurants"),
            PanelId::Map => write!(f, "Map"),
            PanelId::Console => write!(f, "Console"),
        }
    }
}

/// Create the initial dock layout.
///
/// ```text
/// ┌──────────────┬─────────────────────────────┐
/// │ Search       │                             │
/// │ Category     │            Map              │
/// │ ──────────── │                             │
/// │ Restaurants  │                             │
/// ├──────────────┴─────────────────────────────┤
/// │               Console                      │
/// └────────────────────────────────────────────┘
/// ```
pub fn create_dock_state() -> DockState<PanelId> {
    let mut dock_state = DockState::new(vec![PanelId::Restaurants]);

    // Main area (top 80%) and console (bottom)
    let [top, _bottom] = dock_state.main_surface_mut().split_below(
        NodeIndex::root(),
        0.8,
        vec![PanelId::Console],
    );

    // Sidebar (left 33%) and map
    let [_sidebar, _map] =
        dock_state
            .main_surface_mut()
            .split_right(top, 0.33, vec![PanelId::Map]);

    dock_state
}
