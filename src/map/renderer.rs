use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_line, fill_disc};
use crate::map::projection::Viewport;
use crate::marker::Marker;

/// Sequence of (lon, lat) points
pub type LineString = Vec<(f64, f64)>;

/// Natural Earth resolution to draw at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lod {
    Low,    // 110m
    Medium, // 50m
    High,   // 10m
}

impl Lod {
    pub fn from_zoom(zoom: f64) -> Self {
        if zoom < 4.0 {
            Lod::Low
        } else if zoom < 7.0 {
            Lod::Medium
        } else {
            Lod::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lod::Low => "110m",
            Lod::Medium => "50m",
            Lod::High => "10m",
        }
    }
}

/// Zoom level from which state/prefecture borders are drawn
const STATES_MIN_ZOOM: f64 = 5.0;

#[derive(Clone, Debug)]
pub struct DisplaySettings {
    pub show_borders: bool,
    pub show_states: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_borders: true,
            show_states: true,
        }
    }
}

/// Separately drawn canvases so each can get its own color
pub struct MapLayers {
    pub coastlines: BrailleCanvas,
    pub borders: BrailleCanvas,
    pub states: BrailleCanvas,
    pub markers: BrailleCanvas,
}

/// Base map outlines at several resolutions plus the marker layer
#[derive(Default)]
pub struct MapRenderer {
    coastlines_low: Vec<LineString>,
    coastlines_medium: Vec<LineString>,
    coastlines_high: Vec<LineString>,
    borders_medium: Vec<LineString>,
    borders_high: Vec<LineString>,
    states: Vec<LineString>,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finest loaded coastline set not finer than `lod`, or the closest
    /// finer one when nothing coarser is loaded
    fn coastlines(&self, lod: Lod) -> &[LineString] {
        let candidates = match lod {
            Lod::High => [&self.coastlines_high, &self.coastlines_medium, &self.coastlines_low],
            Lod::Medium => [&self.coastlines_medium, &self.coastlines_low, &self.coastlines_high],
            Lod::Low => [&self.coastlines_low, &self.coastlines_medium, &self.coastlines_high],
        };
        candidates
            .into_iter()
            .find(|set| !set.is_empty())
            .map(|set| set.as_slice())
            .unwrap_or(&[])
    }

    fn borders(&self, lod: Lod) -> &[LineString] {
        if lod == Lod::High && !self.borders_high.is_empty() {
            &self.borders_high
        } else {
            &self.borders_medium
        }
    }

    /// Draw the base map and `markers` (largest first) for a canvas of
    /// `width` x `height` cells.
    pub fn render(&self, width: usize, height: usize, viewport: &Viewport, markers: &[Marker]) -> MapLayers {
        let mut layers = MapLayers {
            coastlines: BrailleCanvas::new(width, height),
            borders: BrailleCanvas::new(width, height),
            states: BrailleCanvas::new(width, height),
            markers: BrailleCanvas::new(width, height),
        };
        let lod = Lod::from_zoom(viewport.zoom);

        for line in self.coastlines(lod) {
            draw_linestring(&mut layers.coastlines, line, viewport);
        }
        if self.settings.show_borders {
            for line in self.borders(lod) {
                draw_linestring(&mut layers.borders, line, viewport);
            }
        }
        if self.settings.show_states && viewport.zoom >= STATES_MIN_ZOOM {
            for line in &self.states {
                draw_linestring(&mut layers.states, line, viewport);
            }
        }

        draw_markers(&mut layers.markers, markers, viewport);
        layers
    }

    pub fn add_coastline(&mut self, line: LineString, lod: Lod) {
        match lod {
            Lod::Low => self.coastlines_low.push(line),
            Lod::Medium => self.coastlines_medium.push(line),
            Lod::High => self.coastlines_high.push(line),
        }
    }

    pub fn add_border(&mut self, line: LineString, lod: Lod) {
        match lod {
            Lod::High => self.borders_high.push(line),
            Lod::Low | Lod::Medium => self.borders_medium.push(line),
        }
    }

    pub fn add_state(&mut self, line: LineString) {
        self.states.push(line);
    }

    pub fn has_data(&self) -> bool {
        !self.coastlines_low.is_empty() || !self.coastlines_medium.is_empty() || !self.coastlines_high.is_empty()
    }

    pub fn toggle_borders(&mut self) {
        self.settings.show_borders = !self.settings.show_borders;
    }

    pub fn toggle_states(&mut self) {
        self.settings.show_states = !self.settings.show_states;
    }
}

fn draw_linestring(canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport) {
    let mut prev: Option<(i32, i32)> = None;
    for &(lon, lat) in line {
        let p = viewport.project(lon, lat);
        if let Some(q) = prev {
            // Segments longer than the canvas are antimeridian wraps
            let dist = ((p.0 - q.0).abs() + (p.1 - q.1).abs()) as usize;
            if dist < viewport.width && viewport.line_might_be_visible(q, p) {
                draw_line(canvas, q.0, q.1, p.0, p.1);
            }
        }
        prev = Some(p);
    }
}

/// Marker radius in canvas dots
pub fn marker_dots(marker: &Marker, viewport: &Viewport) -> f64 {
    marker.radius * viewport.pixel_ratio
}

fn draw_markers(canvas: &mut BrailleCanvas, markers: &[Marker], viewport: &Viewport) {
    for marker in markers {
        let (px, py) = viewport.project_f(marker.coordinates.lon, marker.coordinates.lat);
        let r = marker_dots(marker, viewport);
        let margin = r.ceil() as i32 + 1;
        if viewport.is_visible(px.round() as i32, py.round() as i32, margin) {
            fill_disc(canvas, px, py, r, marker.color);
        }
    }
}
