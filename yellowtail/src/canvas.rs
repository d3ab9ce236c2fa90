//! Software framebuffer that fills quads with one ink colour.

use gesture_pool::QuadSink;
use ribbon_geom::Quad;

/// Packed 0xAARRGGBB pixels, row-major, the layout `minifb` presents.
#[derive(Clone, Debug)]
pub struct Canvas {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
    ink:    u32,
    /// Scanline intersection scratch, reused across fills.
    xs:     Vec<i32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, ink: u32) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![0; width * height],
            ink,
            xs: Vec::with_capacity(4),
        }
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Number of pixels currently equal to `color`.
    pub fn count(&self, color: u32) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    fn hline(&mut self, x1: i32, x2: i32, y: i32) {
        if y < 0 || y >= self.height as i32 { return; }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end   = x2.min(self.width as i32 - 1);
        if start > end { return; }
        let row = y as usize * self.width;
        self.pixels[row + start as usize..=row + end as usize].fill(self.ink);
    }

    /// Even-odd scanline fill, sampling each row at its center.
    fn fill_polygon(&mut self, verts: &[(i32, i32)]) {
        let n = verts.len();
        if n < 3 { return; }

        let min_y = verts.iter().map(|v| v.1).min().unwrap_or(0).max(0);
        let max_y = verts.iter().map(|v| v.1).max().unwrap_or(-1).min(self.height as i32 - 1);

        let mut xs = std::mem::take(&mut self.xs);
        for y in min_y..=max_y {
            xs.clear();
            let yf = y as f64 + 0.5;
            for i in 0..n {
                let (x1, y1) = (verts[i].0 as f64, verts[i].1 as f64);
                let (x2, y2) = (verts[(i + 1) % n].0 as f64, verts[(i + 1) % n].1 as f64);
                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    let x = x1 + (yf - y1) / (y2 - y1) * (x2 - x1);
                    xs.push(x.floor() as i32);
                }
            }
            xs.sort_unstable();
            for pair in xs.chunks_exact(2) {
                self.hline(pair[0], pair[1], y);
            }
        }
        self.xs = xs;
    }
}

impl QuadSink for Canvas {
    fn surface_size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn fill_quad(&mut self, quad: &Quad) {
        self.fill_polygon(&quad.vertices());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: u32 = 0xFF000000;
    const BG:  u32 = 0xFFFFFFFF;

    fn canvas() -> Canvas {
        let mut c = Canvas::new(40, 30, INK);
        c.clear(BG);
        c
    }

    #[test]
    fn fills_axis_aligned_square() {
        let mut c = canvas();
        c.fill_quad(&Quad::new([10, 20, 20, 10], [5, 5, 15, 15]));
        assert_eq!(c.pixel(15, 10), Some(INK));
        assert_eq!(c.pixel(5, 10), Some(BG));
        assert_eq!(c.pixel(15, 20), Some(BG));
        // Rows 5..15 (10 rows), columns 10..=20 (11 columns).
        assert_eq!(c.count(INK), 110);
    }

    #[test]
    fn clips_outside_surface() {
        let mut c = canvas();
        c.fill_quad(&Quad::new([-100, 100, 100, -100], [-100, -100, 100, 100]));
        assert_eq!(c.count(INK), 40 * 30);
        let mut c = canvas();
        c.fill_quad(&Quad::new([100, 120, 120, 100], [5, 5, 15, 15]));
        assert_eq!(c.count(INK), 0);
    }

    #[test]
    fn degenerate_quad_draws_nothing_harmful() {
        let mut c = canvas();
        c.fill_quad(&Quad::new([10, 10, 10, 10], [10, 10, 10, 10]));
        assert_eq!(c.count(INK), 0);
    }

    #[test]
    fn triangle_end_cap() {
        let mut c = canvas();
        // Two vertices coincide: a triangle pointing right.
        c.fill_quad(&Quad::new([5, 5, 25, 25], [5, 25, 15, 15]));
        assert_eq!(c.pixel(6, 15), Some(INK));
        assert_eq!(c.pixel(24, 6), Some(BG));
    }

    #[test]
    fn surface_size_reports_dimensions() {
        assert_eq!(canvas().surface_size(), (40, 30));
    }
}
