use crate::viz::Rgb;

/// Braille canvas where each terminal cell holds a 2x4 dot pattern
/// (U+2800..U+28FF) and optionally the color it was last painted with.
pub struct BrailleCanvas {
    width: usize,  // cells
    height: usize, // cells
    dots: Vec<u8>,
    ink: Vec<Option<Rgb>>,
}

/// One non-empty cell, ready to be written into a terminal buffer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
    pub glyph: char,
    pub ink: Option<Rgb>,
}

impl BrailleCanvas {
    /// Canvas of `width` x `height` cells, i.e. `width*2` x `height*4` dots.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![0; width * height],
            ink: vec![None; width * height],
        }
    }

    /// Dot bits within a cell:
    /// ```text
    /// (0,0) (1,0)   0x01 0x08
    /// (0,1) (1,1)   0x02 0x10
    /// (0,2) (1,2)   0x04 0x20
    /// (0,3) (1,3)   0x40 0x80
    /// ```
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let (cx, cy) = (x / 2, y / 4);
        if cx >= self.width || cy >= self.height {
            return None;
        }
        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            _ => 0x80,
        };
        Some((cy * self.width + cx, bit))
    }

    /// Set a dot; out-of-canvas coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        if let Some((idx, bit)) = self.locate(x, y) {
            self.dots[idx] |= bit;
        }
    }

    /// Set a dot and color its whole cell. A cell has a single color, so
    /// the last paint wins.
    pub fn paint(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some((idx, bit)) = self.locate(x, y) {
            self.dots[idx] |= bit;
            self.ink[idx] = Some(color);
        }
    }

    pub fn is_blank(&self) -> bool {
        self.dots.iter().all(|&d| d == 0)
    }

    pub fn row_to_string(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        self.dots[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|&b| glyph(b))
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).map(|i| self.row_to_string(i))
    }

    /// Every cell with at least one dot set
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.dots
            .iter()
            .zip(&self.ink)
            .enumerate()
            .filter(|(_, (bits, _))| **bits != 0)
            .map(|(idx, (&bits, &ink))| Cell {
                col: idx % self.width,
                row: idx / self.width,
                glyph: glyph(bits),
                ink,
            })
    }
}

fn glyph(bits: u8) -> char {
    char::from_u32(0x2800 + bits as u32).unwrap_or(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0);
        assert_eq!(canvas.row_to_string(0), "⠁");
    }

    #[test]
    fn test_full_cell() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for x in 0..2 {
            for y in 0..4 {
                canvas.set_pixel(x, y);
            }
        }
        assert_eq!(canvas.row_to_string(0), "⣿");
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set_pixel(-1, 0);
        canvas.set_pixel(4, 0);
        canvas.set_pixel(0, 4);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_paint_colors_cell() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.set_pixel(0, 0);
        canvas.paint(3, 5, red);
        canvas.paint(2, 6, blue);

        let cells: Vec<Cell> = canvas.cells().collect();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].ink, None);
        assert_eq!((cells[1].col, cells[1].row), (1, 1));
        // (3,5) -> 0x10, (2,6) -> 0x04
        assert_eq!(cells[1].glyph, '\u{2814}');
        assert_eq!(cells[1].ink, Some(blue));
    }
}
