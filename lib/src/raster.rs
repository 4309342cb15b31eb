use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

/// A colour stop of a radial gradient: offset in `[0, 1]` and alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStop {
    pub offset: f32,
    pub alpha: f32,
}

/// Decoded image in straight RGB, row-major.
#[derive(Clone, Debug, Default)]
pub struct Picture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

impl Picture {
    pub fn sample(&self, u: f32, v: f32) -> Option<Rgb> {
        if self.width == 0
            || self.height == 0
            || !(0.0..=1.0).contains(&u)
            || !(0.0..=1.0).contains(&v)
        {
            return None;
        }
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

/// Mutable view over an ARGB8888 streaming texture (BGRA bytes in memory).
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    data: &'a mut [u8],
    width: i64,
    height: i64,
    pitch: i64,
}

impl<'a> PixelBuffer<'a> {
    pub fn new(data: &'a mut [u8], width: u32, height: u32, pitch: usize) -> Self {
        Self {
            data,
            width: width as i64,
            height: height as i64,
            pitch: pitch as i64,
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn clear(&mut self, color: Rgb) {
        for y in 0..self.height {
            for x in 0..self.width {
                let off = (y * self.pitch + x * 4) as usize;
                if off + 3 < self.data.len() {
                    self.data[off] = color.b;
                    self.data[off + 1] = color.g;
                    self.data[off + 2] = color.r;
                    self.data[off + 3] = 255;
                }
            }
        }
    }

    /// Reads back a pixel as `(r, g, b)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x as i64 >= self.width || y as i64 >= self.height {
            return None;
        }
        let off = (y as i64 * self.pitch + x as i64 * 4) as usize;
        let px = self.data.get(off..off + 4)?;
        Some(Rgb::new(px[2], px[1], px[0]))
    }

    /// Source-over blend of `color` at `alpha` onto the pixel at `(x, y)`.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height || alpha <= 0.0 {
            return;
        }
        let a = alpha.min(1.0);
        let off = (y * self.pitch + x * 4) as usize;
        if off + 3 >= self.data.len() {
            return;
        }
        let mix = |dst: u8, src: u8| (dst as f32 + (src as f32 - dst as f32) * a).round() as u8;
        self.data[off] = mix(self.data[off], color.b);
        self.data[off + 1] = mix(self.data[off + 1], color.g);
        self.data[off + 2] = mix(self.data[off + 2], color.r);
        self.data[off + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        let x_start = (x.floor() as i64).max(0);
        let y_start = (y.floor() as i64).max(0);
        let x_end = ((x + w).ceil() as i64).min(self.width);
        let y_end = ((y + h).ceil() as i64).min(self.height);
        for py in y_start..y_end {
            for px in x_start..x_end {
                self.blend(px, py, color, alpha);
            }
        }
    }

    /// Vertical gradient from `top` to `bottom`, both at `alpha`.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_gradient(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        top: Rgb,
        bottom: Rgb,
        alpha: f32,
    ) {
        if h <= 0.0 {
            return;
        }
        let y_start = (y.floor() as i64).max(0);
        let y_end = ((y + h).ceil() as i64).min(self.height);
        for py in y_start..y_end {
            let t = (py as f32 - y) / h;
            let color = top.lerp(bottom, t);
            for px in (x.floor() as i64).max(0)..((x + w).ceil() as i64).min(self.width) {
                self.blend(px, py, color, alpha);
            }
        }
    }

    /// Filled circle with a one-pixel antialiased rim.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let reach = radius + 1.0;
        let x_start = ((cx - reach).floor() as i64).max(0);
        let y_start = ((cy - reach).floor() as i64).max(0);
        let x_end = ((cx + reach).ceil() as i64).min(self.width);
        let y_end = ((cy + reach).ceil() as i64).min(self.height);
        for py in y_start..y_end {
            for px in x_start..x_end {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, alpha * coverage);
                }
            }
        }
    }

    /// Radial gradient disc; alpha is linearly interpolated between `stops`.
    pub fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, stops: &[GlowStop]) {
        if radius <= 0.0 || stops.is_empty() {
            return;
        }
        let x_start = ((cx - radius).floor() as i64).max(0);
        let y_start = ((cy - radius).floor() as i64).max(0);
        let x_end = ((cx + radius).ceil() as i64).min(self.width);
        let y_end = ((cy + radius).ceil() as i64).min(self.height);
        for py in y_start..y_end {
            for px in x_start..x_end {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let t = (dx * dx + dy * dy).sqrt() / radius;
                if t <= 1.0 {
                    self.blend(px, py, color, gradient_alpha(stops, t));
                }
            }
        }
    }

    /// Line of the given width; widths under one pixel scale the alpha instead.
    #[allow(clippy::too_many_arguments)]
    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgb, alpha: f32) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil() as i64;
        let (radius, alpha) = if width < 1.0 {
            (0.0, alpha * width.max(0.0))
        } else {
            (width / 2.0, alpha)
        };
        for i in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                i as f32 / steps as f32
            };
            let x = x0 + dx * t;
            let y = y0 + dy * t;
            if radius <= 0.5 {
                self.blend(x.floor() as i64, y.floor() as i64, color, alpha);
            } else {
                self.stamp(x, y, radius, color, alpha);
            }
        }
    }

    // Hard-edged disc; overlapping stamps along a line must not accumulate alpha
    // more than the antialiased circle would, so coverage is binary here.
    fn stamp(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let r = radius.ceil() as i64;
        let (ix, iy) = (cx.floor() as i64, cy.floor() as i64);
        for py in iy - r..=iy + r {
            for px in ix - r..=ix + r {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.blend(px, py, color, alpha);
                }
            }
        }
    }

    /// Blits `picture` scaled to cover `(x, y, w, h)`, nearest-neighbour.
    pub fn blit(&mut self, picture: &Picture, x: f32, y: f32, w: f32, h: f32, alpha: f32) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let x_start = (x.floor() as i64).max(0);
        let y_start = (y.floor() as i64).max(0);
        let x_end = ((x + w).ceil() as i64).min(self.width);
        let y_end = ((y + h).ceil() as i64).min(self.height);
        for py in y_start..y_end {
            let v = (py as f32 + 0.5 - y) / h;
            for px in x_start..x_end {
                let u = (px as f32 + 0.5 - x) / w;
                if let Some(color) = picture.sample(u, v) {
                    self.blend(px, py, color, alpha);
                }
            }
        }
    }
}

pub fn gradient_alpha(stops: &[GlowStop], t: f32) -> f32 {
    let Some(first) = stops.first() else {
        return 0.0;
    };
    if t <= first.offset {
        return first.alpha;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return a.alpha + (b.alpha - a.alpha) * (t - a.offset) / span;
        }
    }
    stops.last().map(|s| s.alpha).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(w: u32, h: u32) -> Vec<u8> {
        vec![0u8; (w * h * 4) as usize]
    }

    #[test]
    fn hex_colours() {
        assert_eq!(Rgb::from_hex("#FF6B6B"), Some(Rgb::new(0xFF, 0x6B, 0x6B)));
        assert_eq!(Rgb::from_hex("87CEFA"), Some(Rgb::new(0x87, 0xCE, 0xFA)));
        assert_eq!(Rgb::from_hex("#FFF"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
    }

    #[test]
    fn blend_writes_bgra() {
        let mut data = buffer(4, 4);
        let mut buf = PixelBuffer::new(&mut data, 4, 4, 16);
        buf.blend(1, 2, Rgb::new(10, 20, 30), 1.0);
        assert_eq!(buf.pixel(1, 2), Some(Rgb::new(10, 20, 30)));
        let off = 2 * 16 + 4;
        assert_eq!(&data[off..off + 4], &[30, 20, 10, 255]);
    }

    #[test]
    fn blend_ignores_out_of_bounds() {
        let mut data = buffer(2, 2);
        let mut buf = PixelBuffer::new(&mut data, 2, 2, 8);
        buf.blend(-1, 0, Rgb::WHITE, 1.0);
        buf.blend(2, 0, Rgb::WHITE, 1.0);
        buf.blend(0, 5, Rgb::WHITE, 1.0);
        assert!(data.iter().all(|b| *b == 0));
    }

    #[test]
    fn half_alpha_mixes() {
        let mut data = buffer(1, 1);
        let mut buf = PixelBuffer::new(&mut data, 1, 1, 4);
        buf.clear(Rgb::BLACK);
        buf.blend(0, 0, Rgb::new(200, 100, 50), 0.5);
        assert_eq!(buf.pixel(0, 0), Some(Rgb::new(100, 50, 25)));
    }

    #[test]
    fn gradient_alpha_interpolates_between_stops() {
        let stops = [
            GlowStop {
                offset: 0.0,
                alpha: 1.0,
            },
            GlowStop {
                offset: 0.5,
                alpha: 0.5,
            },
            GlowStop {
                offset: 1.0,
                alpha: 0.0,
            },
        ];
        assert_eq!(gradient_alpha(&stops, 0.0), 1.0);
        assert!((gradient_alpha(&stops, 0.25) - 0.75).abs() < 1e-6);
        assert!((gradient_alpha(&stops, 0.75) - 0.25).abs() < 1e-6);
        assert_eq!(gradient_alpha(&stops, 2.0), 0.0);
    }

    #[test]
    fn circle_covers_its_centre_only() {
        let mut data = buffer(20, 20);
        let mut buf = PixelBuffer::new(&mut data, 20, 20, 80);
        buf.clear(Rgb::BLACK);
        buf.fill_circle(10.0, 10.0, 3.0, Rgb::WHITE, 1.0);
        assert_eq!(buf.pixel(10, 10), Some(Rgb::WHITE));
        assert_eq!(buf.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(buf.pixel(19, 10), Some(Rgb::BLACK));
    }

    #[test]
    fn picture_blit_scales() {
        let picture = Picture {
            width: 2,
            height: 1,
            pixels: vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)],
        };
        let mut data = buffer(4, 2);
        let mut buf = PixelBuffer::new(&mut data, 4, 2, 16);
        buf.blit(&picture, 0.0, 0.0, 4.0, 2.0, 1.0);
        assert_eq!(buf.pixel(0, 0), Some(Rgb::new(255, 0, 0)));
        assert_eq!(buf.pixel(1, 1), Some(Rgb::new(255, 0, 0)));
        assert_eq!(buf.pixel(3, 0), Some(Rgb::new(0, 0, 255)));
    }
}
