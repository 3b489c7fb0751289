//! Headless map widget
//!
//! A Web Mercator model of a slippy map: a center, an integer zoom and a
//! container in pixels. Like a browser map it keeps using its old size
//! after the container changes until [`MapWidget::invalidate_size`] is
//! called.

use crate::constants::geo::{MAX_MERCATOR_LAT, TILE_SIZE};
use crate::constants::map::MAX_ZOOM;
use crate::coord::{Coordinates, LatLngBounds, MapViewport};
use crate::map::MapWidget;
use std::f64::consts::PI;

/// World size in pixels at `zoom`
fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(zoom as i32)
}

/// Project to global pixel coordinates
pub fn project(coords: Coordinates, zoom: u8) -> (f64, f64) {
    let world = world_size(zoom);
    let lat = coords.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (coords.lng + 180.0) / 360.0 * world;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * world;
    (x, y)
}

/// Inverse of [`project`]
pub fn unproject(x: f64, y: f64, zoom: u8) -> Coordinates {
    let world = world_size(zoom);
    let y = y.clamp(0.0, world);
    let lng = x / world * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / world)).sinh().atan().to_degrees();
    Coordinates::new(lat, lng)
}

/// In-memory map widget
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    center: Coordinates,
    zoom: u8,
    /// Size the widget renders at
    size: (u32, u32),
    /// Size of the surrounding container
    container: (u32, u32),
    invalidations: usize,
}

impl HeadlessMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            center: Coordinates::new(0.0, 0.0),
            zoom: 0,
            size: (width, height),
            container: (width, height),
            invalidations: 0,
        }
    }

    /// Size used for bounds
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of size recalculations so far
    pub fn invalidations(&self) -> usize {
        self.invalidations
    }

    /// Drag the map by a pixel offset (positive dx moves the view east,
    /// positive dy moves it south)
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let (x, y) = project(self.center, self.zoom);
        self.center = unproject(x + dx, y + dy, self.zoom);
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.min(MAX_ZOOM);
    }
}

impl MapWidget for HeadlessMap {
    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.center = Coordinates::new(
            center.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
            center.lng,
        );
        self.set_zoom(zoom);
    }

    fn viewport(&self) -> MapViewport {
        let (x, y) = project(self.center, self.zoom);
        let half_w = self.size.0 as f64 / 2.0;
        let half_h = self.size.1 as f64 / 2.0;

        MapViewport {
            center: self.center,
            zoom: self.zoom,
            bounds: LatLngBounds::new(
                unproject(x + half_w, y - half_h, self.zoom),
                unproject(x - half_w, y + half_h, self.zoom),
            ),
        }
    }

    fn resize_container(&mut self, width: u32, height: u32) {
        self.container = (width, height);
    }

    fn invalidate_size(&mut self) {
        self.size = self.container;
        self.invalidations += 1;
    }
}
