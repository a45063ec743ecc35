//! Grayscale canvas with clipping drawing primitives.
//!
//! Coordinates are signed so shapes may extend past any canvas edge; the
//! primitives clip instead of rejecting. Patterns draw black (0) on the
//! white (255) background.

/// Row-major 8-bit grayscale pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayCanvas {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>, // row-major, len = w*h
}

impl GrayCanvas {
    /// Allocate a canvas filled with white.
    pub fn white(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![255u8; width * height],
        }
    }

    /// Pixel value at `(x, y)`, or `None` outside the canvas.
    #[inline]
    pub fn pixel(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }

    #[inline]
    fn put(&mut self, x: i64, y: i64, value: u8) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.data[y as usize * self.width + x as usize] = value;
    }

    /// Fill the axis-aligned rectangle `[x, x + w) x [y, y + h)`.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, value: u8) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i64);
        let y1 = y.saturating_add(h).min(self.height as i64);
        for yy in y0..y1 {
            let row = yy as usize * self.width;
            for xx in x0..x1 {
                self.data[row + xx as usize] = value;
            }
        }
    }

    /// Fill the disc of radius `r` centered at `(cx, cy)`.
    ///
    /// A pixel belongs to the disc when `dx^2 + dy^2 <= r^2`; radius 0 is a
    /// single pixel.
    pub fn fill_disc(&mut self, cx: i64, cy: i64, r: i64, value: u8) {
        if r < 0 {
            return;
        }
        let x0 = cx.saturating_sub(r).max(0);
        let x1 = cx.saturating_add(r).min(self.width as i64 - 1);
        let y0 = cy.saturating_sub(r).max(0);
        let y1 = cy.saturating_add(r).min(self.height as i64 - 1);
        // r * r overflows i64 for radii past ~3e9 px
        let rr = i128::from(r) * i128::from(r);
        for yy in y0..=y1 {
            let dy = i128::from(yy) - i128::from(cy);
            let row = yy as usize * self.width;
            for xx in x0..=x1 {
                let dx = i128::from(xx) - i128::from(cx);
                if dx * dx + dy * dy <= rr {
                    self.data[row + xx as usize] = value;
                }
            }
        }
    }

    /// Stroke a 1-px rectangle outline with inclusive corners.
    pub fn stroke_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, value: u8) {
        if x1 < x0 || y1 < y0 {
            return;
        }
        for xx in x0.max(0)..=x1.min(self.width as i64 - 1) {
            self.put(xx, y0, value);
            self.put(xx, y1, value);
        }
        for yy in y0.max(0)..=y1.min(self.height as i64 - 1) {
            self.put(x0, yy, value);
            self.put(x1, yy, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_count(canvas: &GrayCanvas) -> usize {
        canvas.data.iter().filter(|&&v| v == 0).count()
    }

    #[test]
    fn starts_all_white() {
        let canvas = GrayCanvas::white(4, 3);
        assert_eq!(canvas.data.len(), 12);
        assert!(canvas.data.iter().all(|&v| v == 255));
    }

    #[test]
    fn fill_rect_clips_to_the_canvas() {
        let mut canvas = GrayCanvas::white(4, 4);
        canvas.fill_rect(-2, -2, 4, 4, 0);
        assert_eq!(black_count(&canvas), 4);
        assert_eq!(canvas.pixel(0, 0), Some(0));
        assert_eq!(canvas.pixel(1, 1), Some(0));
        assert_eq!(canvas.pixel(2, 2), Some(255));
    }

    #[test]
    fn fill_rect_fully_outside_is_a_noop() {
        let mut canvas = GrayCanvas::white(4, 4);
        canvas.fill_rect(10, 10, 5, 5, 0);
        canvas.fill_rect(-9, 0, 5, 5, 0);
        canvas.fill_rect(1, 1, 0, 3, 0);
        assert_eq!(black_count(&canvas), 0);
    }

    #[test]
    fn disc_radius_zero_is_a_single_pixel() {
        let mut canvas = GrayCanvas::white(5, 5);
        canvas.fill_disc(2, 2, 0, 0);
        assert_eq!(black_count(&canvas), 1);
        assert_eq!(canvas.pixel(2, 2), Some(0));
    }

    #[test]
    fn disc_covers_the_inclusive_radius() {
        let mut canvas = GrayCanvas::white(11, 11);
        canvas.fill_disc(5, 5, 3, 0);
        assert_eq!(canvas.pixel(5, 5), Some(0));
        assert_eq!(canvas.pixel(8, 5), Some(0));
        assert_eq!(canvas.pixel(9, 5), Some(255));
        assert_eq!(canvas.pixel(8, 8), Some(255));
    }

    #[test]
    fn huge_radius_floods_without_overflow() {
        let mut canvas = GrayCanvas::white(4, 4);
        canvas.fill_disc(2, 2, i64::MAX / 2, 0);
        assert_eq!(black_count(&canvas), 16);
    }

    #[test]
    fn disc_is_clipped_not_rejected() {
        let mut canvas = GrayCanvas::white(4, 4);
        canvas.fill_disc(0, 0, 2, 0);
        let quarter = black_count(&canvas);
        assert!(quarter > 0);

        canvas.fill_disc(100, 100, 3, 0);
        assert_eq!(black_count(&canvas), quarter);
    }

    #[test]
    fn stroke_rect_draws_the_border_only() {
        let mut canvas = GrayCanvas::white(6, 6);
        canvas.stroke_rect(1, 1, 4, 4, 0);
        assert_eq!(canvas.pixel(1, 1), Some(0));
        assert_eq!(canvas.pixel(4, 1), Some(0));
        assert_eq!(canvas.pixel(4, 4), Some(0));
        assert_eq!(canvas.pixel(2, 2), Some(255));
        assert_eq!(black_count(&canvas), 12);
    }

    #[test]
    fn stroke_rect_clips_offscreen_edges() {
        let mut canvas = GrayCanvas::white(4, 4);
        canvas.stroke_rect(1, -2, 2, 7, 0);
        assert_eq!(black_count(&canvas), 8);
        for y in 0..4 {
            assert_eq!(canvas.pixel(1, y), Some(0));
            assert_eq!(canvas.pixel(2, y), Some(0));
        }
    }
}
