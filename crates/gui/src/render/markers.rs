//! Map pins: geometry, painting and hit testing.

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use foodmap_core::config::{MarkerIcon, Rgba};

/// What a pin on the map stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerId {
    /// Catalog index of a restaurant.
    Restaurant(usize),
    User,
}

/// A pin placed on screen for this frame.
pub struct PlacedMarker<'a> {
    pub id: MarkerId,
    /// Screen position of the geographic point (the pin's tip).
    pub tip: Pos2,
    pub icon: &'a MarkerIcon,
}

pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, c.3)
}

/// Screen rectangle covered by an icon whose anchor sits on `tip`.
pub fn icon_rect(tip: Pos2, icon: &MarkerIcon) -> Rect {
    Rect::from_min_size(
        tip - Vec2::new(icon.anchor[0], icon.anchor[1]),
        Vec2::new(icon.size[0], icon.size[1]),
    )
}

/// Where a popup's tip attaches for a pin at `tip`.
pub fn popup_tip(tip: Pos2, icon: &MarkerIcon) -> Pos2 {
    tip + Vec2::new(icon.popup_anchor[0], icon.popup_anchor[1])
}

/// Draw a teardrop pin with its point on `tip`.
pub fn paint_pin(painter: &Painter, tip: Pos2, icon: &MarkerIcon) {
    let rect = icon_rect(tip, icon);
    let fill = to_color32(icon.fill);
    let outline = Stroke::new(1.0, Color32::from_black_alpha(160));

    // Shadow
    let shadow_r = icon.shadow_size[0] * 0.22;
    painter.circle_filled(
        tip + Vec2::new(shadow_r * 0.6, -shadow_r * 0.3),
        shadow_r,
        Color32::from_black_alpha(60),
    );

    let r = rect.width() / 2.0;
    let head = Pos2::new(rect.center().x, rect.top() + r);
    painter.add(Shape::convex_polygon(
        vec![
            Pos2::new(head.x - r * 0.87, head.y + r * 0.5),
            tip,
            Pos2::new(head.x + r * 0.87, head.y + r * 0.5),
        ],
        fill,
        outline,
    ));
    painter.circle(head, r, fill, outline);
    painter.circle_filled(head, r * 0.4, Color32::WHITE);
}

/// The topmost marker under `pointer`. Later markers are drawn on top.
pub fn hit_test(pointer: Pos2, markers: &[PlacedMarker<'_>]) -> Option<MarkerId> {
    markers
        .iter()
        .rev()
        .find(|m| icon_rect(m.tip, m.icon).contains(pointer))
        .map(|m| m.id)
}
