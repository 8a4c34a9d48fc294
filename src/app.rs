use crate::config::{AppConfig, LayerStyle, StartView};
use crate::dataset::{Datasets, LoadedDataset};
use crate::format::{format_magnitude, format_per_unit, group_thousands};
use crate::map::{marker_dots, Lod, MapRenderer, SpatialGrid, Viewport};
use crate::marker::{build_markers, Marker};
use crate::record::{DatasetKind, MagnitudeRecord};
use crate::view::{JapanLayer, SelectionMode, ViewEvent, ViewState};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Degrees per hit-test grid cell
const HIT_CELL_DEGREES: f64 = 2.0;
/// Hover search never needs to reach further than half the globe
const MAX_HIT_REACH_DEGREES: f64 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapKind {
    World,
    Japan,
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKind::World => f.write_str("World"),
            MapKind::Japan => f.write_str("Japan"),
        }
    }
}

/// Interactive map state
pub struct App {
    pub config: AppConfig,
    pub datasets: Datasets,
    pub map: MapKind,
    pub viewport: Viewport,
    /// Japan layer selection; ignored on the world map
    pub view: ViewState,
    pub map_renderer: MapRenderer,
    markers: Vec<Marker>,
    /// Marker positions in `markers`, keyed by lon/lat
    hit_grid: SpatialGrid<usize>,
    /// Last layer change; markers stay hidden for the fade duration after it
    fade_started: Option<Instant>,
    pub last_mouse: Option<(u16, u16)>,
    pub mouse_pos: Option<(u16, u16)>,
    pub should_quit: bool,
}

impl App {
    /// Start on the world map; `width`/`height` are terminal cells
    pub fn new(config: AppConfig, datasets: Datasets, map_renderer: MapRenderer, width: usize, height: usize, now: Instant) -> Self {
        let (dots_w, dots_h) = canvas_dots(width, height);
        let viewport = start_viewport(&config.view.world, dots_w, dots_h, config.map.marker_scale);
        let view = ViewState::new(config.view.japan.zoom, &config.view.thresholds);
        let mut app = Self {
            config,
            datasets,
            map: MapKind::World,
            viewport,
            view,
            map_renderer,
            markers: Vec::new(),
            hit_grid: SpatialGrid::new(HIT_CELL_DEGREES),
            fade_started: None,
            last_mouse: None,
            mouse_pos: None,
            should_quit: false,
        };
        app.rebuild_markers(now);
        app
    }

    /// Dataset drawn right now
    pub fn active_kind(&self) -> DatasetKind {
        match self.map {
            MapKind::World => DatasetKind::Country,
            MapKind::Japan => self.view.active_layer().dataset_kind(),
        }
    }

    pub fn active_dataset(&self) -> &LoadedDataset {
        self.datasets.get(self.active_kind())
    }

    pub fn active_style(&self) -> &LayerStyle {
        self.config.layers.get(self.active_kind())
    }

    fn rebuild_markers(&mut self, now: Instant) {
        let kind = self.active_kind();
        let ctx = &self.datasets.get(kind).context;
        self.markers = build_markers(ctx, self.config.layers.get(kind));
        self.hit_grid = SpatialGrid::build(
            HIT_CELL_DEGREES,
            self.markers
                .iter()
                .enumerate()
                .map(|(i, m)| (m.coordinates.lon, m.coordinates.lat, i)),
        );
        self.fade_started = Some(now);
        info!(%kind, markers = self.markers.len(), "layer shown");
    }

    pub fn markers_visible(&self, now: Instant) -> bool {
        self.fade_started
            .is_none_or(|start| now.saturating_duration_since(start) >= self.config.view.fade())
    }

    /// Markers to draw, none while a layer change is fading in
    pub fn visible_markers(&self, now: Instant) -> &[Marker] {
        if self.markers_visible(now) {
            &self.markers
        } else {
            &[]
        }
    }

    pub fn switch_map(&mut self, map: MapKind, now: Instant) {
        if map == self.map {
            return;
        }
        self.map = map;
        self.reset_view(now);
    }

    /// Back to the current map's start view, automatic layer selection
    pub fn reset_view(&mut self, now: Instant) {
        let start = match self.map {
            MapKind::World => self.config.view.world,
            MapKind::Japan => self.config.view.japan,
        };
        self.viewport = start_viewport(&start, self.viewport.width, self.viewport.height, self.viewport.pixel_ratio);
        self.view = ViewState::new(self.viewport.zoom, &self.config.view.thresholds);
        self.rebuild_markers(now);
    }

    fn apply(&mut self, event: ViewEvent, now: Instant) {
        let transition = self.view.apply(event, &self.config.view.thresholds);
        self.view = transition.state;
        if transition.layer_changed && self.map == MapKind::Japan {
            self.rebuild_markers(now);
        }
    }

    fn after_zoom(&mut self, now: Instant) {
        debug!(zoom = self.viewport.zoom, "zoom end");
        self.apply(ViewEvent::Zoomed(self.viewport.zoom), now);
    }

    pub fn zoom_in(&mut self, now: Instant) {
        if self.viewport.zoom_by(1) {
            self.after_zoom(now);
        }
    }

    pub fn zoom_out(&mut self, now: Instant) {
        if self.viewport.zoom_by(-1) {
            self.after_zoom(now);
        }
    }

    /// Wheel zoom towards a terminal cell
    pub fn zoom_at(&mut self, col: u16, row: u16, levels: i32, now: Instant) {
        let (px, py) = cell_to_dots(col, row);
        if self.viewport.zoom_at(px, py, levels) {
            self.after_zoom(now);
        }
    }

    pub fn toggle_mode(&mut self, now: Instant) {
        let mode = match self.view.mode {
            SelectionMode::Automatic => SelectionMode::Manual,
            SelectionMode::Manual => SelectionMode::Automatic,
        };
        self.apply(ViewEvent::SetMode(mode), now);
    }

    /// Pick a Japan layer. Only offered in manual mode.
    pub fn select_layer(&mut self, layer: JapanLayer, now: Instant) {
        if self.view.mode != SelectionMode::Manual {
            debug!(%layer, "layer keys are inactive in automatic mode");
            return;
        }
        self.apply(ViewEvent::Selected(layer), now);
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        let (w, h) = canvas_dots(width, height);
        self.viewport.width = w;
        self.viewport.height = h;
    }

    pub fn handle_drag(&mut self, col: u16, row: u16) {
        if let Some((last_col, last_row)) = self.last_mouse {
            let dx = (last_col as i32 - col as i32) * 2;
            let dy = (last_row as i32 - row as i32) * 4;
            self.pan(dx, dy);
        }
        self.last_mouse = Some((col, row));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Topmost visible marker under the mouse
    pub fn hovered(&self, now: Instant) -> Option<&Marker> {
        if !self.markers_visible(now) {
            return None;
        }
        let (col, row) = self.mouse_pos?;
        let (px, py) = cell_to_dots(col, row);
        // center of the cell
        let (px, py) = (px as f64 + 1.0, py as f64 + 2.0);

        let (lon, lat) = self.viewport.unproject(px, py);

        self.hit_grid
            .query_radius(lon, lat, self.hit_reach())
            .into_iter()
            .filter(|&i| {
                let m = &self.markers[i];
                let (mx, my) = self.viewport.project_f(m.coordinates.lon, m.coordinates.lat);
                let r = marker_dots(m, &self.viewport).max(1.0) + 1.5;
                (mx - px).powi(2) + (my - py).powi(2) <= r * r
            })
            .max()
            .map(|i| &self.markers[i])
    }

    /// Degrees around the cursor that can hold the center of a hovered
    /// marker. A degree of latitude never spans fewer dots than a degree of
    /// longitude in Mercator, so the longitude reach bounds both axes.
    fn hit_reach(&self) -> f64 {
        let max_dots = self
            .markers
            .first()
            .map_or(0.0, |m| marker_dots(m, &self.viewport));
        self.viewport
            .dots_to_degrees(max_dots + 4.0)
            .min(MAX_HIT_REACH_DEGREES)
    }

    pub fn record_for(&self, marker: &Marker) -> Option<&MagnitudeRecord> {
        self.active_dataset().context.records().get(marker.index)
    }

    /// Title and `(label, value)` rows describing a marker
    pub fn tooltip(&self, marker: &Marker) -> Option<(String, Vec<(String, String)>)> {
        let record = self.record_for(marker)?;
        let kind = record.kind;
        let mut rows = vec![(magnitude_label(kind).to_string(), format_magnitude(kind, record.magnitude))];
        if let Some(count) = record.secondary {
            rows.push((capitalize(kind.secondary_label()), group_thousands(count)));
        }
        if let Some(per_unit) = format_per_unit(record) {
            rows.push(("Per unit".to_string(), per_unit));
        }
        rows.push((share_label(kind).to_string(), marker.share_text.clone()));
        if let Some(group) = &record.group {
            let label = if kind == DatasetKind::Company { "Prefecture" } else { "Region" };
            rows.push((label.to_string(), group.clone()));
        }
        Some((record.name.clone(), rows))
    }

    pub fn zoom_level(&self) -> String {
        format!("z{:.0}", self.viewport.zoom)
    }

    pub fn lod_level(&self) -> &'static str {
        Lod::from_zoom(self.viewport.zoom).label()
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }
}

fn magnitude_label(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Company => "Revenue",
        _ => "GDP",
    }
}

fn share_label(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Country => "Share of world",
        DatasetKind::Prefecture => "Share of Japan",
        DatasetKind::Company | DatasetKind::Municipality => "Share of Japan GDP",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn start_viewport(start: &StartView, width: usize, height: usize, pixel_ratio: f64) -> Viewport {
    Viewport::new(start.lon, start.lat, start.zoom, width, height, pixel_ratio)
}

/// Braille dots inside the bordered map area of a `width` x `height`
/// terminal (one status line below the map)
fn canvas_dots(width: usize, height: usize) -> (usize, usize) {
    (width.saturating_sub(2) * 2, height.saturating_sub(3) * 4)
}

/// Terminal cell to canvas dots, skipping the one-cell border
fn cell_to_dots(col: u16, row: u16) -> (i32, i32) {
    (col.saturating_sub(1) as i32 * 2, row.saturating_sub(1) as i32 * 4)
}
