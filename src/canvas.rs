//! 1-bit framebuffer the game loop composites into.
//!
//! Coordinates are signed so callers can draw partially (or entirely)
//! off-surface; anything outside the grid is silently dropped.

/// State of a single pixel.  `On` is ink (dark on the LCD), `Off` is the
/// background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pixel {
    #[default]
    Off,
    On,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    px: Vec<Pixel>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            px: vec![Pixel::Off; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    // Wide coordinates so offsets added to an `i32` origin cannot overflow.
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64 {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    fn set_wide(&mut self, x: i64, y: i64, value: Pixel) {
        if let Some(i) = self.index(x, y) {
            self.px[i] = value;
        }
    }

    /// Reset every pixel to `value`.
    pub fn clear(&mut self, value: Pixel) {
        self.px.fill(value);
    }

    /// Read a pixel; out-of-range reads as `Off`.
    pub fn get(&self, x: i32, y: i32) -> Pixel {
        self.index(x.into(), y.into())
            .map(|i| self.px[i])
            .unwrap_or(Pixel::Off)
    }

    pub fn set_point(&mut self, x: i32, y: i32, value: Pixel) {
        self.set_wide(x.into(), y.into(), value);
    }

    /// Fill the rectangle spanned by two corners, both inclusive.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, value: Pixel) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        // Clip first so a wildly off-screen rectangle costs nothing.
        let left = left.max(0);
        let top = top.max(0);
        let right = right.min(self.width as i32 - 1);
        let bottom = bottom.min(self.height as i32 - 1);

        for y in top..=bottom {
            for x in left..=right {
                self.set_point(x, y, value);
            }
        }
    }

    /// Straight line between two points, endpoints included (Bresenham).
    ///
    /// The segment is clipped to the surface first, so endpoints anywhere in
    /// the `i32` range cost no more than an on-screen line.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, value: Pixel) {
        let Some((x0, y0, x1, y1)) = self.clip_segment(x0, y0, x1, y1) else {
            return;
        };
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_wide(x, y, value);
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

    /// Liang–Barsky clip against the surface.  A segment already inside is
    /// returned unchanged; one that misses the surface yields `None`.
    fn clip_segment(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i64, i64, i64, i64)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let (fx0, fy0) = (f64::from(x0), f64::from(y0));
        let dx = f64::from(x1) - fx0;
        let dy = f64::from(y1) - fy0;
        let xmax = (self.width - 1) as f64;
        let ymax = (self.height - 1) as f64;

        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [(-dx, fx0), (dx, xmax - fx0), (-dy, fy0), (dy, ymax - fy0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let at = |t: f64| ((fx0 + t * dx).round() as i64, (fy0 + t * dy).round() as i64);
        let (cx0, cy0) = at(t0);
        let (cx1, cy1) = at(t1);
        Some((cx0, cy0, cx1, cy1))
    }

    /// Stamp a bit mask with its top-left corner at `(x, y)`.
    ///
    /// Each entry of `rows` is one row, `width` bits wide, most significant
    /// bit leftmost.  Only set bits are written; clear bits leave the
    /// canvas untouched.
    pub fn blit(&mut self, x: i32, y: i32, width: usize, rows: &[u32], value: Pixel) {
        for (dy, &bits) in rows.iter().enumerate() {
            for dx in 0..width {
                // Columns left of the 32 stored bits read as clear.
                let bit = u32::try_from(width - 1 - dx)
                    .ok()
                    .and_then(|shift| bits.checked_shr(shift))
                    .unwrap_or(0);
                if bit & 1 == 1 {
                    self.set_wide(i64::from(x) + dx as i64, i64::from(y) + dy as i64, value);
                }
            }
        }
    }

    /// Number of `On` pixels.
    pub fn ink_count(&self) -> usize {
        self.px.iter().filter(|&&p| p == Pixel::On).count()
    }

    /// Pack the surface in PCD8544 order: banks of 8 rows, one byte per
    /// column per bank, least significant bit at the top of the bank.
    ///
    /// This is the buffer a panel driver streams over SPI; the terminal and
    /// memory displays read pixels directly instead.
    pub fn to_page_bytes(&self) -> Vec<u8> {
        let banks = self.height.div_ceil(8);
        let mut out = vec![0u8; banks * self.width];
        for bank in 0..banks {
            for x in 0..self.width {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let y = bank * 8 + bit;
                    if y < self.height && self.px[y * self.width + x] == Pixel::On {
                        byte |= 1 << bit;
                    }
                }
                out[bank * self.width + x] = byte;
            }
        }
        out
    }
}
