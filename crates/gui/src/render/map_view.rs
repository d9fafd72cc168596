//! Restaurant map using walkers (OpenStreetMap slippy tiles) with marker,
//! popup and control overlays.

use egui::{Align2, Color32, Pos2, Rect, RichText, Ui, Vec2};
use tracing::{debug, warn};
use walkers::sources::OpenStreetMap;
use walkers::{HttpTiles, Map, MapMemory, Plugin, Position, Projector, lon_lat};

use foodmap_core::{
    Catalog, Coordinate, Focus, LocateControl, LocateState, MapConfig, MapController, Viewport,
};

use super::assets::PopupImages;
use super::markers::{MarkerId, PlacedMarker, hit_test, paint_pin, popup_tip};
use crate::panels::restaurants::category_color;

fn position(c: Coordinate) -> Position {
    lon_lat(c.lon, c.lat)
}

/// Actions the map view can emit for the main app to handle.
pub enum MapAction {
    /// The location button was pressed.
    Locate,
    None,
}

/// Persistent map state (survives between frames).
///
/// Owns the live map (tiles + memory); anything else that wants the map to
/// move goes through [`Focus`] or the location button.
pub struct MapView {
    tiles: HttpTiles,
    memory: MapMemory,
    /// Center the map returns to when not panned away.
    home: Position,
    config: MapConfig,
    controller: MapController,
    locate: LocateControl,
    popup: Option<MarkerId>,
    images: PopupImages,
}

impl MapView {
    /// Create the map at `initial`. Icons and zoom levels come from `config`.
    pub fn new(ctx: &egui::Context, config: MapConfig, initial: Viewport) -> Self {
        let mut view = Self {
            tiles: HttpTiles::new(OpenStreetMap, ctx.clone()),
            memory: MapMemory::default(),
            home: position(initial.center),
            controller: MapController::new(config.focus_zoom),
            locate: LocateControl::new(),
            popup: None,
            images: PopupImages::load(ctx),
            config,
        };
        view.set_zoom(initial.zoom);
        view
    }

    fn set_zoom(&mut self, zoom: f64) {
        if self.memory.set_zoom(zoom).is_err() {
            warn!("zoom level {} out of range", zoom);
        }
    }

    /// Center the map on `viewport`.
    pub fn apply(&mut self, viewport: Viewport) {
        debug!("map view -> {} @ z{}", viewport.center, viewport.zoom);
        self.memory.center_at(position(viewport.center));
        self.set_zoom(viewport.zoom);
    }

    /// Lookups issued by the location button still running.
    pub fn pending_lookups(&self) -> u32 {
        self.locate.in_flight()
    }

    /// The location button (or its menu entry) was pressed.
    pub fn locate_pressed(&mut self) {
        self.locate.press();
    }

    /// The location button's state, for routing lookup results to it.
    pub fn locate_control(&mut self) -> &mut LocateControl {
        &mut self.locate
    }

    /// Render the map with the `visible` restaurants and the user marker.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        catalog: &Catalog,
        visible: &[usize],
        user: Coordinate,
        focus: Option<Focus>,
    ) -> MapAction {
        if let Some(viewport) = self.controller.observe(focus) {
            self.apply(viewport);
        }

        if let Some(MarkerId::Restaurant(index)) = self.popup {
            if !visible.contains(&index) {
                self.popup = None;
            }
        }

        let markers = Markers {
            catalog,
            visible,
            user,
            config: &self.config,
            images: &self.images,
            popup: &mut self.popup,
        };

        let map = Map::new(Some(&mut self.tiles), &mut self.memory, self.home).with_plugin(markers);
        let rect = ui.add(map).rect;

        show_attribution(ui, rect, &self.config);
        show_locate_button(ui, rect, self.locate.state())
    }
}

/// Plugin that draws restaurant and user pins and the open popup.
struct Markers<'a> {
    catalog: &'a Catalog,
    visible: &'a [usize],
    user: Coordinate,
    config: &'a MapConfig,
    images: &'a PopupImages,
    popup: &'a mut Option<MarkerId>,
}

impl<'a> Plugin for Markers<'a> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        response: &egui::Response,
        projector: &Projector,
    ) {
        let Markers {
            catalog,
            visible,
            user,
            config,
            images,
            popup,
        } = *self;

        let project = |c: Coordinate| {
            let v = projector.project(position(c));
            Pos2::new(v.x, v.y)
        };

        let mut placed = Vec::with_capacity(visible.len() + 1);
        for &index in visible {
            let Some(record) = catalog.get(index) else { continue };
            placed.push(PlacedMarker {
                id: MarkerId::Restaurant(index),
                tip: project(record.position),
                icon: config.icon_for(record.category),
            });
        }
        // The user pin goes last so it is drawn on top.
        placed.push(PlacedMarker {
            id: MarkerId::User,
            tip: project(user),
            icon: &config.user_icon,
        });

        let painter = ui.painter().with_clip_rect(response.rect);
        for marker in &placed {
            paint_pin(&painter, marker.tip, marker.icon);
        }

        // A click on a pin opens its popup, anywhere else closes it.
        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                *popup = hit_test(pointer, &placed);
            }
        }

        let Some(open) = *popup else { return };
        let Some(marker) = placed.iter().find(|m| m.id == open) else { return };
        if !response.rect.contains(marker.tip) {
            return;
        }

        let tip = popup_tip(marker.tip, marker.icon);
        let closed = show_popup(ui, tip, |ui| match open {
            MarkerId::Restaurant(index) => {
                if let Some(record) = catalog.get(index) {
                    ui.heading(&record.title);
                    ui.label(&record.description);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Category:").strong());
                        ui.label(
                            RichText::new(record.category.id())
                                .color(category_color(record.category)),
                        );
                    });
                    if let Some(texture) = record.image.as_deref().and_then(|n| images.get(n)) {
                        ui.add_space(4.0);
                        ui.add(
                            egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                                texture,
                            ))
                            .max_width(200.0),
                        );
                    }
                }
            }
            MarkerId::User => {
                ui.label(&config.user_popup);
            }
        });
        if closed {
            *popup = None;
        }
    }
}

/// Draw a popup whose bottom-center sits on `tip`. Returns true if its close
/// button was clicked.
fn show_popup(ui: &Ui, tip: Pos2, contents: impl FnOnce(&mut Ui)) -> bool {
    let mut closed = false;
    egui::Area::new(egui::Id::new("foodmap_marker_popup"))
        .order(egui::Order::Foreground)
        .fixed_pos(tip)
        .pivot(Align2::CENTER_BOTTOM)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(220.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.small_button("×").clicked() {
                        closed = true;
                    }
                });
                contents(ui);
            });
        });
    closed
}

/// Tile attribution in the bottom-right corner of the map.
fn show_attribution(ui: &Ui, map_rect: Rect, config: &MapConfig) {
    egui::Area::new(egui::Id::new("foodmap_attribution"))
        .order(egui::Order::Foreground)
        .fixed_pos(map_rect.right_bottom() - Vec2::new(2.0, 2.0))
        .pivot(Align2::RIGHT_BOTTOM)
        .show(ui.ctx(), |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(150))
                .inner_margin(4.0)
                .show(ui, |ui| {
                    ui.hyperlink_to(
                        RichText::new(&config.attribution.text).small(),
                        &config.attribution.url,
                    );
                });
        });
}

/// The "show my location" button in the top-right corner of the map.
fn show_locate_button(ui: &Ui, map_rect: Rect, state: LocateState) -> MapAction {
    let mut action = MapAction::None;
    egui::Area::new(egui::Id::new("foodmap_locate_button"))
        .order(egui::Order::Foreground)
        .fixed_pos(map_rect.right_top() + Vec2::new(-10.0, 10.0))
        .pivot(Align2::RIGHT_TOP)
        .show(ui.ctx(), |ui| {
            let response = ui
                .add(egui::Button::new("").min_size(Vec2::splat(34.0)))
                .on_hover_text("Show my location");
            let icon_rect = response.rect.shrink(8.0);
            match state {
                LocateState::Locating => egui::Spinner::new().paint_at(ui, icon_rect),
                LocateState::Idle => paint_crosshair(ui, icon_rect),
            }
            if response.clicked() {
                action = MapAction::Locate;
            }
        });
    action
}

fn paint_crosshair(ui: &Ui, rect: Rect) {
    let painter = ui.painter();
    let stroke = egui::Stroke::new(1.5, ui.visuals().text_color());
    let c = rect.center();
    let r = rect.width().min(rect.height()) / 2.0;
    painter.circle_stroke(c, r * 0.6, stroke);
    painter.circle_filled(c, r * 0.2, stroke.color);
    for dir in [Vec2::X, -Vec2::X, Vec2::Y, -Vec2::Y] {
        painter.line_segment([c + dir * r * 0.6, c + dir * r], stroke);
    }
}
