use std::collections::HashMap;

/// Hash grid over lon/lat for nearby-item lookups
pub struct SpatialGrid<T> {
    cells: HashMap<(i32, i32), Vec<usize>>,
    items: Vec<T>,
    /// Cell edge in degrees
    cell_size: f64,
}

impl<T> SpatialGrid<T> {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: HashMap::new(),
            items: Vec::new(),
            cell_size,
        }
    }

    /// Build from `(lon, lat, item)` triples
    pub fn build(cell_size: f64, entries: impl IntoIterator<Item = (f64, f64, T)>) -> Self {
        let mut grid = Self::new(cell_size);
        for (lon, lat, item) in entries {
            grid.insert(lon, lat, item);
        }
        grid
    }

    #[inline(always)]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        (
            (lon / self.cell_size).floor() as i32,
            (lat / self.cell_size).floor() as i32,
        )
    }

    pub fn insert(&mut self, lon: f64, lat: f64, item: T) {
        let idx = self.items.len();
        self.items.push(item);
        let cell = self.to_cell(lon, lat);
        self.cells.entry(cell).or_default().push(idx);
    }

    /// Indices of items in cells overlapping the square of half-width
    /// `radius_degrees` around the point. Callers refine with an exact test.
    pub fn query_radius(&self, lon: f64, lat: f64, radius_degrees: f64) -> Vec<usize> {
        let center = self.to_cell(lon, lat);
        let reach = (radius_degrees / self.cell_size).ceil().min(i32::MAX as f64 / 4.0) as i32;

        let mut results = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if let Some(indices) = self.cells.get(&(center.0 + dx, center.1 + dy)) {
                    results.extend_from_slice(indices);
                }
            }
        }
        results
    }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_finds_neighbours_only() {
        let grid = SpatialGrid::build(
            1.0,
            [(139.7, 35.7, "Tokyo"), (135.5, 34.7, "Osaka"), (-74.0, 40.7, "New York")],
        );
        assert_eq!(grid.len(), 3);

        let near_tokyo: Vec<&str> = grid
            .query_radius(139.0, 35.0, 1.0)
            .into_iter()
            .filter_map(|i| grid.get(i).copied())
            .collect();
        assert_eq!(near_tokyo, vec!["Tokyo"]);

        let japan = grid.query_radius(137.5, 35.0, 3.0);
        assert_eq!(japan.len(), 2);
    }

    #[test]
    fn test_empty_grid() {
        let grid: SpatialGrid<usize> = SpatialGrid::new(2.0);
        assert!(grid.is_empty());
        assert!(grid.query_radius(0.0, 0.0, 10.0).is_empty());
    }
}
