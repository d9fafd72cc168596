//! Main application: FoodMapApp implements eframe::App.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use egui_dock::{DockArea, DockState, Style, TabViewer};
use tracing::{debug, info};

use foodmap_core::{
    Catalog, CategoryFilter, Coordinate, FilterCache, LocateControl, LocateOutcome,
    LocationError, LocationSource, MapConfig, Session, Viewport,
};

use crate::dock::{create_dock_state, PanelId};
use crate::locate::request_location;
use crate::menu::{show_menu_bar, MenuAction};
use crate::panels::console::show_console;
use crate::panels::restaurants::show_restaurant_list;
use crate::panels::search::show_search;
use crate::render::{MapAction, MapView};
use crate::state::{AppMessage, LocationOrigin, LogEntry};

/// Startup settings, assembled from the command line.
pub struct AppSettings {
    pub catalog: Catalog,
    pub config: MapConfig,
    pub source: Arc<dyn LocationSource>,
}

/// The main application state.
pub struct FoodMapApp {
    /// Dock state for panel layout.
    dock_state: DockState<PanelId>,

    /// Message channels for background thread communication.
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,

    catalog: Catalog,
    config: MapConfig,
    source: Arc<dyn LocationSource>,

    /// Filter, search text, user location and focus.
    session: Session,

    /// Memoized filter results.
    filter_cache: FilterCache,

    /// Created once the user location is known; lives for the rest of the run.
    map_view: Option<MapView>,

    /// Console log entries.
    logs: Vec<LogEntry>,

    /// Whether the startup position lookup is still running.
    startup_pending: bool,

    /// Message of the blocking location alert, if shown.
    alert: Option<String>,

    /// Show about dialog.
    show_about: bool,
}

impl FoodMapApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        cc.egui_ctx.set_visuals(visuals);

        let (tx, rx) = crossbeam_channel::unbounded();

        let mut app = Self {
            dock_state: create_dock_state(),
            tx,
            rx,
            catalog: settings.catalog,
            config: settings.config,
            source: settings.source,
            session: Session::new(),
            filter_cache: FilterCache::new(),
            map_view: None,
            logs: Vec::new(),
            startup_pending: true,
            alert: None,
            show_about: false,
        };

        app.logs.push(LogEntry::info("FoodMap started"));
        app.logs.push(LogEntry::info(format!(
            "{} restaurants in catalog",
            app.catalog.len()
        )));

        request_location(app.source.clone(), LocationOrigin::Startup, app.tx.clone());

        app
    }

    /// Process pending messages from background threads.
    fn process_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            let (origin, result) = match msg {
                AppMessage::LocationFound { origin, position } => (origin, Ok(position)),
                AppMessage::LocationFailed { origin, error } => (origin, Err(error)),
                AppMessage::Log(entry) => {
                    self.logs.push(entry);
                    continue;
                }
            };

            if origin == LocationOrigin::Startup {
                self.startup_pending = false;
            }

            let targets = LocationTargets {
                session: &mut self.session,
                control: self.map_view.as_mut().map(MapView::locate_control),
                alert: &mut self.alert,
                logs: &mut self.logs,
            };
            if let Some(viewport) = targets.apply(&self.config, origin, result) {
                if let Some(map_view) = self.map_view.as_mut() {
                    map_view.apply(viewport);
                }
            }
        }
    }

    /// Press the location button: mark it busy and issue a lookup.
    fn start_locate(&mut self) {
        let Some(map_view) = self.map_view.as_mut() else {
            return;
        };
        map_view.locate_pressed();
        request_location(self.source.clone(), LocationOrigin::Control, self.tx.clone());
    }

    fn lookups_pending(&self) -> bool {
        self.startup_pending
            || self
                .map_view
                .as_ref()
                .is_some_and(|m| m.pending_lookups() > 0)
    }
}

impl eframe::App for FoodMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process pending messages
        self.process_messages();

        // Keep polling the channel while a lookup is running
        if self.lookups_pending() {
            ctx.request_repaint();
        }

        if self.map_view.is_none() {
            if let Some(viewport) = self.session.initial_viewport(self.config.initial_zoom) {
                info!("showing map at {}", viewport.center);
                self.map_view = Some(MapView::new(ctx, self.config.clone(), viewport));
            }
        }

        // Menu bar
        let map_ready = self.map_view.is_some();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| match show_menu_bar(ui, map_ready) {
            MenuAction::Exit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            MenuAction::Locate => {
                self.start_locate();
            }
            MenuAction::ClearFilters => {
                self.session.set_category(CategoryFilter::All);
                self.session.set_search("");
            }
            MenuAction::About => {
                self.show_about = true;
            }
            MenuAction::None => {}
        });

        // Location alert
        if let Some(text) = self.alert.clone() {
            let modal = egui::Modal::new(egui::Id::new("location_alert")).show(ctx, |ui| {
                ui.set_width(320.0);
                ui.heading("Location unavailable");
                ui.label(text);
                ui.separator();
                ui.vertical_centered(|ui| ui.button("OK").clicked()).inner
            });
            if modal.inner || modal.should_close() {
                self.alert = None;
            }
        }

        // About dialog
        if self.show_about {
            egui::Window::new("About FoodMap")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.heading("FoodMap");
                    ui.label("Find vegetarian and non-vegetarian restaurants near you");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.separator();
                    ui.label(format!("{} restaurants in catalog", self.catalog.len()));
                    ui.label(format!("Location source: {}", self.source.describe()));
                    ui.separator();
                    if ui.button("Close").clicked() {
                        self.show_about = false;
                    }
                });
        }

        // Main dock area
        let visible = self.filter_cache.get(&self.catalog, &self.session.query);

        let mut tab_viewer = FoodMapTabViewer {
            session: &mut self.session,
            catalog: &self.catalog,
            visible,
            logs: &self.logs,
            map_view: &mut self.map_view,
            filter_changed: false,
            row_clicked: None,
            map_action: MapAction::None,
            clear_console: false,
        };

        DockArea::new(&mut self.dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(ctx, &mut tab_viewer);

        // Extract results before dropping the borrow
        let filter_changed = tab_viewer.filter_changed;
        let row_clicked = tab_viewer.row_clicked;
        let map_action = std::mem::replace(&mut tab_viewer.map_action, MapAction::None);
        let clear_console = tab_viewer.clear_console;
        drop(tab_viewer);

        // The list and the map were drawn with the old filter
        if filter_changed {
            ctx.request_repaint();
        }

        // Sidebar selection: hand the map a new focus, it moves on the next frame
        if let Some(index) = row_clicked {
            if let Some(record) = self.catalog.get(index) {
                self.session.focus_on(record.position);
                self.logs
                    .push(LogEntry::info(format!("Showing {}", record.title)));
                ctx.request_repaint();
            }
        }

        if let MapAction::Locate = map_action {
            self.start_locate();
        }

        if clear_console {
            self.logs.clear();
        }
    }
}

/// App state a location result can touch, borrowed for one message.
struct LocationTargets<'a> {
    session: &'a mut Session,
    /// The map's location button; `None` while the map is not shown.
    control: Option<&'a mut LocateControl>,
    alert: &'a mut Option<String>,
    logs: &'a mut Vec<LogEntry>,
}

impl LocationTargets<'_> {
    /// Apply one lookup result. Returns the viewport the map has to move to.
    fn apply(
        self,
        config: &MapConfig,
        origin: LocationOrigin,
        result: Result<Coordinate, LocationError>,
    ) -> Option<Viewport> {
        match origin {
            LocationOrigin::Startup => {
                let entry = match result {
                    Ok(position) => {
                        let position = self.session.resolve_initial(Ok(position), config.fallback);
                        LogEntry::success(format!("Your location: {}", position))
                    }
                    Err(error) => {
                        let reason = error.to_string();
                        let position = self.session.resolve_initial(Err(error), config.fallback);
                        LogEntry::warning(format!(
                            "Location unavailable ({}), starting at {}",
                            reason, position
                        ))
                    }
                };
                self.logs.push(entry);
                None
            }

            LocationOrigin::Control => {
                let Some(control) = self.control else {
                    debug!("map not shown, dropping location result");
                    return None;
                };
                let outcome = match result {
                    Ok(position) => control.found(position, config.focus_zoom),
                    Err(error) => {
                        self.logs
                            .push(LogEntry::error(format!("Location request failed: {}", error)));
                        control.failed()
                    }
                };
                match outcome {
                    LocateOutcome::Recenter {
                        viewport,
                        user_location,
                    } => {
                        self.session.set_user_location(user_location);
                        self.logs
                            .push(LogEntry::success(format!("Your location: {}", user_location)));
                        Some(viewport)
                    }
                    LocateOutcome::Alert(text) => {
                        *self.alert = Some(text.to_string());
                        None
                    }
                }
            }
        }
    }
}

/// TabViewer implementation for egui_dock.
struct FoodMapTabViewer<'a> {
    session: &'a mut Session,
    catalog: &'a Catalog,
    /// Catalog indices passing the current filter.
    visible: &'a [usize],
    logs: &'a [LogEntry],
    map_view: &'a mut Option<MapView>,
    filter_changed: bool,
    row_clicked: Option<usize>,
    map_action: MapAction,
    clear_console: bool,
}

impl<'a> TabViewer for FoodMapTabViewer<'a> {
    type Tab = PanelId;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.to_string().into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            PanelId::Restaurants => {
                if show_search(ui, self.session) {
                    self.filter_changed = true;
                }
                ui.add_space(6.0);
                if let Some(index) = show_restaurant_list(ui, self.catalog, self.visible) {
                    self.row_clicked = Some(index);
                }
            }

            PanelId::Map => match (self.map_view.as_mut(), self.session.user_location()) {
                (Some(map_view), Some(user)) => {
                    self.map_action = map_view.show(
                        ui,
                        self.catalog,
                        self.visible,
                        user,
                        self.session.focus(),
                    );
                }
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Loading map...");
                    });
                }
            },

            PanelId::Console => {
                if show_console(ui, self.logs) {
                    self.clear_console = true;
                }
            }
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false // Panels cannot be closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodmap_core::config::LOCATION_ALERT;
    use foodmap_core::LocateState;

    #[derive(Default)]
    struct Fixture {
        session: Session,
        alert: Option<String>,
        logs: Vec<LogEntry>,
    }

    impl Fixture {
        fn apply(
            &mut self,
            control: Option<&mut LocateControl>,
            origin: LocationOrigin,
            result: Result<Coordinate, LocationError>,
        ) -> Option<Viewport> {
            LocationTargets {
                session: &mut self.session,
                control,
                alert: &mut self.alert,
                logs: &mut self.logs,
            }
            .apply(&MapConfig::default(), origin, result)
        }
    }

    #[test]
    fn startup_failure_falls_back_and_enables_map() {
        let mut fx = Fixture::default();
        let moved = fx.apply(None, LocationOrigin::Startup, Err(LocationError::Unavailable));

        let config = MapConfig::default();
        assert_eq!(moved, None);
        assert_eq!(fx.session.user_location(), Some(config.fallback));
        assert_eq!(
            fx.session.initial_viewport(config.initial_zoom),
            Some(Viewport::new(Coordinate::new(51.505, -0.09), 13.0))
        );
        assert!(fx.alert.is_none());
        assert_eq!(fx.logs.len(), 1);
    }

    #[test]
    fn failed_button_lookup_raises_alert() {
        let mut fx = Fixture::default();
        let mut control = LocateControl::new();
        control.press();

        let moved = fx.apply(
            Some(&mut control),
            LocationOrigin::Control,
            Err(LocationError::Unavailable),
        );

        assert_eq!(moved, None);
        assert_eq!(fx.alert.as_deref(), Some(LOCATION_ALERT));
        assert_eq!(control.state(), LocateState::Idle);
        assert_eq!(fx.session.user_location(), None);
    }

    #[test]
    fn button_lookup_updates_user_location() {
        let mut fx = Fixture::default();
        fx.session
            .resolve_initial(Err(LocationError::Unavailable), MapConfig::default().fallback);
        let mut control = LocateControl::new();
        control.press();

        let here = Coordinate::new(18.52, 73.85);
        let moved = fx.apply(Some(&mut control), LocationOrigin::Control, Ok(here));

        assert_eq!(moved, Some(Viewport::new(here, 16.0)));
        assert_eq!(fx.session.user_location(), Some(here));
        assert_eq!(control.state(), LocateState::Idle);
        assert!(fx.alert.is_none());
    }

    #[test]
    fn button_results_dropped_without_map() {
        let mut fx = Fixture::default();

        let here = Coordinate::new(18.52, 73.85);
        assert_eq!(fx.apply(None, LocationOrigin::Control, Ok(here)), None);
        assert_eq!(
            fx.apply(None, LocationOrigin::Control, Err(LocationError::Unavailable)),
            None
        );

        assert_eq!(fx.session.user_location(), None);
        assert!(fx.alert.is_none());
        assert!(fx.logs.is_empty());
    }
}
