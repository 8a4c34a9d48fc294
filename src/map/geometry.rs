use crate::braille::BrailleCanvas;
use crate::viz::Rgb;

/// Bresenham line between two canvas dots
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set_pixel(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Filled disc of `color`. Radii under one dot still mark the center.
pub fn fill_disc(canvas: &mut BrailleCanvas, cx: f64, cy: f64, radius: f64, color: Rgb) {
    let (x0, y0) = (cx.round() as i32, cy.round() as i32);
    if radius < 1.0 {
        canvas.paint(x0, y0, color);
        return;
    }
    let r = radius.ceil() as i32;
    let r2 = radius * radius;
    for dy in -r..=r {
        for dx in -r..=r {
            let (fx, fy) = ((x0 + dx) as f64 - cx, (y0 + dy) as f64 - cy);
            if fx * fx + fy * fy <= r2 {
                canvas.paint(x0 + dx, y0 + dy, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.row_to_string(0), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.rows().collect::<Vec<_>>(), vec!["⡇", "⡇"]);
    }

    #[test]
    fn test_tiny_disc_marks_center() {
        let mut canvas = BrailleCanvas::new(2, 2);
        fill_disc(&mut canvas, 1.0, 1.0, 0.3, Rgb::NEUTRAL);
        let cells: Vec<_> = canvas.cells().collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].ink, Some(Rgb::NEUTRAL));
    }

    #[test]
    fn test_disc_covers_radius() {
        let mut canvas = BrailleCanvas::new(10, 5);
        let color = Rgb::new(1, 2, 3);
        fill_disc(&mut canvas, 10.0, 10.0, 4.0, color);
        let cells: Vec<_> = canvas.cells().collect();
        assert!(cells.iter().all(|c| c.ink == Some(color)));
        // 9 dots across the middle row span cells 3..=7
        let cols: Vec<usize> = cells.iter().filter(|c| c.row == 2).map(|c| c.col).collect();
        assert_eq!(cols, vec![3, 4, 5, 6, 7]);
    }
}
