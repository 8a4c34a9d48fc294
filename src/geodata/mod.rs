//! Base map outlines: Natural Earth GeoJSON when available, otherwise a
//! coarse built-in outline of the continents and the Japanese islands.

mod outline;

use crate::error::{Error, Result};
use crate::map::{LineString, Lod, MapRenderer};
use geojson::{GeoJson, Geometry, Value};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
    Coastline(Lod),
    Border(Lod),
    States,
}

const SOURCES: [(&str, Layer); 6] = [
    ("ne_110m_coastline.json", Layer::Coastline(Lod::Low)),
    ("ne_50m_coastline.json", Layer::Coastline(Lod::Medium)),
    ("ne_10m_coastline.json", Layer::Coastline(Lod::High)),
    ("ne_50m_admin_0_boundary_lines_land.json", Layer::Border(Lod::Medium)),
    ("ne_10m_admin_0_boundary_lines_land.json", Layer::Border(Lod::High)),
    ("ne_10m_admin_1_states_provinces_lines.json", Layer::States),
];

/// Load every known file present in `dir` into `renderer`, parsing in
/// parallel. Unreadable files are skipped with a warning. Returns the
/// number of files loaded.
pub fn load_all_geojson(renderer: &mut MapRenderer, dir: &Path) -> usize {
    let parsed: Vec<(Layer, Result<Vec<LineString>>)> = SOURCES
        .par_iter()
        .filter_map(|&(file, layer)| {
            let path = dir.join(file);
            path.exists().then(|| (layer, load_lines(&path)))
        })
        .collect();

    let mut loaded = 0;
    for (layer, lines) in parsed {
        match lines {
            Ok(lines) => {
                debug!(?layer, count = lines.len(), "loaded outlines");
                for line in lines {
                    match layer {
                        Layer::Coastline(lod) => renderer.add_coastline(line, lod),
                        Layer::Border(lod) => renderer.add_border(line, lod),
                        Layer::States => renderer.add_state(line),
                    }
                }
                loaded += 1;
            }
            Err(e) => warn!(error = %e, "skipping base map file"),
        }
    }
    info!(dir = %dir.display(), files = loaded, "base map loaded");
    loaded
}

/// Fill `renderer` from `dir`, or with the built-in outline when nothing
/// usable is there.
pub fn load_base_map(renderer: &mut MapRenderer, dir: &Path) {
    if dir.is_dir() {
        load_all_geojson(renderer, dir);
    }
    if !renderer.has_data() {
        debug!("no GeoJSON coastlines, using built-in outline");
        outline::add_builtin_outline(renderer);
    }
}

fn load_lines(path: &Path) -> Result<Vec<LineString>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let geojson: GeoJson = content.parse().map_err(|source| Error::GeoJson {
        path: PathBuf::from(path),
        source: Box::new(source),
    })?;
    let mut lines = Vec::new();
    collect_lines(&geojson, &mut |line| lines.push(line));
    Ok(lines)
}

/// Every line and polygon exterior ring in the document
pub fn collect_lines<F>(geojson: &GeoJson, add_line: &mut F)
where
    F: FnMut(LineString),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for geometry in fc.features.iter().filter_map(|f| f.geometry.as_ref()) {
                geometry_lines(geometry, add_line);
            }
        }
        GeoJson::Feature(f) => {
            if let Some(geometry) = &f.geometry {
                geometry_lines(geometry, add_line);
            }
        }
        GeoJson::Geometry(geometry) => geometry_lines(geometry, add_line),
    }
}

fn geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    let to_line = |coords: &[Vec<f64>]| -> LineString {
        coords.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect()
    };
    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => lines.iter().for_each(|l| add_line(to_line(l))),
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                add_line(to_line(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            for exterior in polygons.iter().filter_map(|rings| rings.first()) {
                add_line(to_line(exterior));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                geometry_lines(g, add_line);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_lines_from_polygons_and_lines() {
        let geojson: GeoJson = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"MultiPolygon","coordinates":[
                [[[0,0],[1,0],[1,1],[0,0]],[[0.2,0.2],[0.4,0.2],[0.2,0.4],[0.2,0.2]]],
                [[[5,5],[6,5],[6,6],[5,5]]]
            ]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[3,3]}}
        ]}"#
        .parse()
        .unwrap();

        let mut lines = Vec::new();
        collect_lines(&geojson, &mut |l| lines.push(l));
        // holes are skipped, points ignored
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(lines[2].len(), 4);
    }

    #[test]
    fn test_loads_files_present_and_skips_broken() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ne_110m_coastline.json"),
            r#"{"type":"LineString","coordinates":[[130,30],[140,40]]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("ne_10m_coastline.json"), "not geojson").unwrap();

        let mut renderer = MapRenderer::new();
        assert_eq!(load_all_geojson(&mut renderer, dir.path()), 1);
        assert!(renderer.has_data());
    }

    #[test]
    fn test_builtin_outline_when_dir_missing() {
        let mut renderer = MapRenderer::new();
        load_base_map(&mut renderer, Path::new("/nonexistent/geojson"));
        assert!(renderer.has_data());
    }
}
