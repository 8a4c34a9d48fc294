use std::f64::consts::PI;

/// Edge of a web map tile in screen pixels; zoom level `z` makes the world
/// `TILE_SIZE * 2^z` pixels wide.
pub const TILE_SIZE: f64 = 256.0;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Mercator is undefined at the poles; clamp like web maps do
const MAX_LAT: f64 = 85.051_128_78;

/// Visible map area at a tile-style zoom level.
///
/// `pixel_ratio` is braille dots per screen pixel, so marker radii and
/// zoom levels keep their web-map meaning on a coarser grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub center_lon: f64,
    pub center_lat: f64,
    /// Whole zoom level, `MIN_ZOOM..=MAX_ZOOM`
    pub zoom: f64,
    /// Canvas width in braille dots
    pub width: usize,
    /// Canvas height in braille dots
    pub height: usize,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize, pixel_ratio: f64) -> Self {
        Self {
            center_lon,
            center_lat: center_lat.clamp(-MAX_LAT, MAX_LAT),
            zoom: zoom.round().clamp(MIN_ZOOM, MAX_ZOOM),
            width,
            height,
            pixel_ratio,
        }
    }

    /// World width in braille dots at the current zoom
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom) * self.pixel_ratio
    }

    fn center_xy(&self) -> (f64, f64) {
        mercator(self.center_lon, self.center_lat)
    }

    /// Project lon/lat to fractional canvas dots
    pub fn project_f(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (x, y) = mercator(lon, lat);
        let (cx, cy) = self.center_xy();
        let size = self.world_size();
        (
            (x - cx) * size + self.width as f64 / 2.0,
            (y - cy) * size + self.height as f64 / 2.0,
        )
    }

    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let (px, py) = self.project_f(lon, lat);
        (px.round() as i32, py.round() as i32)
    }

    /// Canvas dots back to (lon, lat)
    pub fn unproject(&self, px: f64, py: f64) -> (f64, f64) {
        let (cx, cy) = self.center_xy();
        let size = self.world_size();
        let x = (px - self.width as f64 / 2.0) / size + cx;
        let y = (py - self.height as f64 / 2.0) / size + cy;
        inverse_mercator(x, y)
    }

    /// Move the center by a canvas offset
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let (cx, cy) = self.center_xy();
        let size = self.world_size();
        let (lon, lat) = inverse_mercator(cx + dx as f64 / size, cy + dy as f64 / size);
        self.center_lon = wrap_lon(lon);
        self.center_lat = lat.clamp(-MAX_LAT, MAX_LAT);
    }

    /// Change zoom by `levels`, keeping the center. Returns whether the
    /// level actually changed.
    pub fn zoom_by(&mut self, levels: i32) -> bool {
        let next = (self.zoom + levels as f64).clamp(MIN_ZOOM, MAX_ZOOM);
        let changed = next != self.zoom;
        self.zoom = next;
        changed
    }

    /// Change zoom by `levels` keeping the point under (`px`, `py`) fixed
    pub fn zoom_at(&mut self, px: i32, py: i32, levels: i32) -> bool {
        let (lon, lat) = self.unproject(px as f64, py as f64);
        if !self.zoom_by(levels) {
            return false;
        }
        let (nx, ny) = self.project(lon, lat);
        self.pan(nx - px, ny - py);
        true
    }

    pub fn is_visible(&self, px: i32, py: i32, margin: i32) -> bool {
        px >= -margin && px < self.width as i32 + margin && py >= -margin && py < self.height as i32 + margin
    }

    /// Rough bounding-box test for a segment
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let (min_x, max_x) = (p1.0.min(p2.0), p1.0.max(p2.0));
        let (min_y, max_y) = (p1.1.min(p2.1), p1.1.max(p2.1));
        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }

    /// Degrees of longitude spanned by `dots` canvas dots
    pub fn dots_to_degrees(&self, dots: f64) -> f64 {
        dots * 360.0 / self.world_size()
    }
}

/// Web Mercator, normalized to [0, 1] on both axes
fn mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat_rad = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
    let x = (lon + 180.0) / 360.0;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

fn inverse_mercator(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    (lon, lat)
}

fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(0.0, 0.0, 2.0, 200, 100, 0.25)
    }

    #[test]
    fn test_project_center() {
        let vp = viewport();
        assert_eq!(vp.project(0.0, 0.0), (100, 50));
    }

    #[test]
    fn test_world_size_doubles_per_level() {
        let mut vp = viewport();
        let before = vp.world_size();
        assert_eq!(before, 256.0);
        vp.zoom_by(1);
        assert_eq!(vp.world_size(), before * 2.0);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let vp = Viewport::new(138.0, 36.0, 6.0, 300, 200, 0.25);
        let (px, py) = vp.project_f(139.69, 35.69);
        let (lon, lat) = vp.unproject(px, py);
        assert!((lon - 139.69).abs() < 1e-9);
        assert!((lat - 35.69).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped_and_whole() {
        let mut vp = Viewport::new(0.0, 0.0, 2.4, 10, 10, 1.0);
        assert_eq!(vp.zoom, 2.0);
        assert!(vp.zoom_by(-5));
        assert_eq!(vp.zoom, MIN_ZOOM);
        assert!(!vp.zoom_by(-1));
        vp.zoom_by(100);
        assert_eq!(vp.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_zoom_at_keeps_point_under_cursor() {
        let mut vp = Viewport::new(138.0, 36.0, 6.0, 300, 200, 0.25);
        let (lon, lat) = vp.unproject(40.0, 30.0);
        assert!(vp.zoom_at(40, 30, 1));
        let (px, py) = vp.project(lon, lat);
        assert!((px - 40).abs() <= 1 && (py - 30).abs() <= 1);
    }

    #[test]
    fn test_pan_wraps_longitude() {
        let mut vp = Viewport::new(179.0, 0.0, 1.0, 100, 100, 1.0);
        // 512 dots per world at zoom 1, so ~3 degrees per 4 dots
        vp.pan(4, 0);
        assert!(vp.center_lon < -170.0);
        vp.pan(0, -100_000);
        assert!(vp.center_lat <= MAX_LAT);
    }
}
