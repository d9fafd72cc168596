//! Map configuration: fixed coordinates, zoom levels and marker icons.
//!
//! Icons are plain data handed to the map view when it is created. Nothing
//! here mutates renderer-wide defaults.

use crate::catalog::Category;
use crate::geo::Coordinate;

/// Used when the initial position lookup fails or no source is available.
pub const FALLBACK_LOCATION: Coordinate = Coordinate::new(51.505, -0.09);

/// Zoom level of the first view.
pub const INITIAL_ZOOM: f64 = 13.0;

/// Zoom level used when focusing a restaurant or the user's position.
pub const FOCUS_ZOOM: f64 = 16.0;

/// Shown when a user-triggered location request fails.
pub const LOCATION_ALERT: &str =
    "Location access denied or unavailable. Please enable location services.";

/// RGBA color, independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// Geometry and color of a map pin.
///
/// Offsets follow the usual slippy-map marker conventions: `anchor` is the
/// pixel of the icon that sits on the coordinate (measured from the icon's
/// top-left corner), `popup_anchor` is where a popup's tip attaches,
/// relative to `anchor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerIcon {
    pub fill: Rgba,
    pub size: [f32; 2],
    pub anchor: [f32; 2],
    pub popup_anchor: [f32; 2],
    pub shadow_size: [f32; 2],
}

impl MarkerIcon {
    const fn pin(fill: Rgba) -> Self {
        Self {
            fill,
            size: [25.0, 41.0],
            anchor: [12.0, 41.0],
            popup_anchor: [1.0, -34.0],
            shadow_size: [41.0, 41.0],
        }
    }

    pub const fn green() -> Self {
        Self::pin(Rgba(42, 173, 39, 255))
    }

    pub const fn red() -> Self {
        Self::pin(Rgba(203, 43, 62, 255))
    }

    pub const fn blue() -> Self {
        Self::pin(Rgba(42, 129, 203, 255))
    }
}

/// Tile attribution, displayed on top of the map at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribution {
    pub text: String,
    pub url: String,
}

impl Default for Attribution {
    fn default() -> Self {
        Self {
            text: "© OpenStreetMap contributors".to_string(),
            url: "https://www.openstreetmap.org/copyright".to_string(),
        }
    }
}

/// Everything the map view needs to know up front.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub fallback: Coordinate,
    pub initial_zoom: f64,
    pub focus_zoom: f64,
    pub attribution: Attribution,
    pub veg_icon: MarkerIcon,
    pub non_veg_icon: MarkerIcon,
    pub user_icon: MarkerIcon,
    pub user_popup: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fallback: FALLBACK_LOCATION,
            initial_zoom: INITIAL_ZOOM,
            focus_zoom: FOCUS_ZOOM,
            attribution: Attribution::default(),
            veg_icon: MarkerIcon::green(),
            non_veg_icon: MarkerIcon::red(),
            user_icon: MarkerIcon::blue(),
            user_popup: "Your Location".to_string(),
        }
    }
}

impl MapConfig {
    /// Icon for a restaurant of the given category.
    pub fn icon_for(&self, category: Category) -> &MarkerIcon {
        match category {
            Category::Veg => &self.veg_icon,
            Category::NonVeg => &self.non_veg_icon,
        }
    }
}
