//! Pixel routines: simulation and panel state in, pixels out.

use serde::{Deserialize, Serialize};

use crate::field::{FieldSimulation, Viewport, TRAIL_CAPACITY};
use crate::panel::{Bounds, Panel};
use crate::raster::{GlowStop, PixelBuffer, Rgb};

/// Glow radius as a multiple of the star's projected size.
pub const GLOW_SCALE: f32 = 6.0;

const GLOW_STOPS: [GlowStop; 4] = [
    GlowStop {
        offset: 0.0,
        alpha: 1.0,
    },
    GlowStop {
        offset: 0.1,
        alpha: 1.0,
    },
    GlowStop {
        offset: 0.4,
        alpha: 0x40 as f32 / 255.0,
    },
    GlowStop {
        offset: 1.0,
        alpha: 0.0,
    },
];

/// Alpha of the trail segment `index` points behind the head.
pub fn trail_alpha(index: usize, speed: f32) -> f32 {
    let age = (1.0 - index as f32 / TRAIL_CAPACITY as f32).max(0.0);
    (age * (speed - 1.0) / 9.0).clamp(0.0, 1.0)
}

pub fn draw_field(field: &FieldSimulation, viewport: Viewport, buffer: &mut PixelBuffer) {
    let streaking = field.is_streaking();
    let speed = field.speed();

    for particle in field.particles() {
        let projected = particle.project(viewport);
        if !viewport.contains(projected.x, projected.y) {
            continue;
        }

        if streaking {
            let mut from = (projected.x, projected.y);
            for (index, point) in particle.trail.iter().enumerate() {
                let width = projected.size * (1.0 - index as f32 / TRAIL_CAPACITY as f32);
                buffer.line(
                    from.0,
                    from.1,
                    point.x,
                    point.y,
                    width,
                    particle.color,
                    trail_alpha(index, speed),
                );
                from = (point.x, point.y);
            }
        }

        let (x, y, size) = (projected.x, projected.y, projected.size);
        buffer.radial_glow(x, y, size * GLOW_SCALE, particle.color, &GLOW_STOPS);
        buffer.fill_circle(x, y, size, particle.color, 1.0);
    }
}

/// 3x3 projective map, row-major.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography([[f32; 3]; 3]);

impl Homography {
    /// Maps the unit square `(0,0) (1,0) (1,1) (0,1)` onto `quad`.
    pub fn square_to_quad(quad: [(f32, f32); 4]) -> Self {
        let [(x0, y0), (x1, y1), (x2, y2), (x3, y3)] = quad;
        let sx = x0 - x1 + x2 - x3;
        let sy = y0 - y1 + y2 - y3;

        let (g, h) = if sx.abs() < 1e-6 && sy.abs() < 1e-6 {
            (0.0, 0.0)
        } else {
            let (dx1, dx2) = (x1 - x2, x3 - x2);
            let (dy1, dy2) = (y1 - y2, y3 - y2);
            let den = dx1 * dy2 - dx2 * dy1;
            if den.abs() < f32::EPSILON {
                (0.0, 0.0)
            } else {
                ((sx * dy2 - dx2 * sy) / den, (dx1 * sy - sx * dy1) / den)
            }
        };

        Self([
            [x1 - x0 + g * x1, x3 - x0 + h * x3, x0],
            [y1 - y0 + g * y1, y3 - y0 + h * y3, y0],
            [g, h, 1.0],
        ])
    }

    pub fn apply(&self, u: f32, v: f32) -> Option<(f32, f32)> {
        let m = &self.0;
        let w = m[2][0] * u + m[2][1] * v + m[2][2];
        if w.abs() < f32::EPSILON {
            return None;
        }
        Some((
            (m[0][0] * u + m[0][1] * v + m[0][2]) / w,
            (m[1][0] * u + m[1][1] * v + m[1][2]) / w,
        ))
    }

    pub fn inverse(&self) -> Option<Self> {
        let m = &self.0;
        let minor = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };
        let adj = [
            [minor(1, 2, 1, 2), -minor(0, 2, 1, 2), minor(0, 1, 1, 2)],
            [-minor(1, 2, 0, 2), minor(0, 2, 0, 2), -minor(0, 1, 0, 2)],
            [minor(1, 2, 0, 1), -minor(0, 2, 0, 1), minor(0, 1, 0, 1)],
        ];
        let det = m[0][0] * adj[0][0] + m[0][1] * adj[1][0] + m[0][2] * adj[2][0];
        if det.abs() < 1e-9 {
            return None;
        }
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = adj[r][c] / det;
            }
        }
        Some(Self(out))
    }
}

/// Fill of a panel surface, beneath its shine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    pub top: Rgb,
    pub bottom: Rgb,
    pub alpha: f32,
    pub border: Option<Rgb>,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            top: Rgb::new(0x1f, 0x29, 0x37),
            bottom: Rgb::new(0x11, 0x18, 0x27),
            alpha: 0.8,
            border: Some(Rgb::new(0x3f, 0x3f, 0x46)),
        }
    }
}

/// Screen-space corners of `bounds` under the panel's current transform,
/// clockwise from top-left.
pub fn panel_quad(panel: &Panel, bounds: Bounds) -> [(f32, f32); 4] {
    let transform = panel.transform();
    let (cx, cy) = bounds.center();
    let (hw, hh) = (bounds.width / 2.0, bounds.height / 2.0);
    [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(x, y)| {
        let (px, py) = transform.apply(x, y);
        (cx + px, cy + py)
    })
}

pub fn draw_panel(panel: &Panel, bounds: Bounds, style: &PanelStyle, buffer: &mut PixelBuffer) {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return;
    }
    let quad = panel_quad(panel, bounds);
    let Some(inverse) = Homography::square_to_quad(quad).inverse() else {
        return;
    };

    let shine = panel.shine();
    let shine_alpha = panel.rendered_shine() * panel.config().shine.intensity;
    let shine_x = shine.x / 100.0 * bounds.width;
    let shine_y = shine.y / 100.0 * bounds.height;
    let corners = [
        (0.0, 0.0),
        (bounds.width, 0.0),
        (bounds.width, bounds.height),
        (0.0, bounds.height),
    ];
    let farthest = corners
        .into_iter()
        .map(|(x, y)| (x - shine_x).hypot(y - shine_y))
        .fold(0.0_f32, f32::max);
    let shine_radius = farthest * panel.config().shine.radius / 100.0;

    let (min_x, max_x) = pixel_span(quad.map(|p| p.0), buffer.width());
    let (min_y, max_y) = pixel_span(quad.map(|p| p.1), buffer.height());

    // Border width in unit-square space.
    let edge_u = 1.0 / bounds.width;
    let edge_v = 1.0 / bounds.height;

    for py in min_y..max_y {
        for px in min_x..max_x {
            let Some((u, v)) = inverse.apply(px as f32 + 0.5, py as f32 + 0.5) else {
                continue;
            };
            if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
                continue;
            }

            let on_edge = u < edge_u || v < edge_v || u > 1.0 - edge_u || v > 1.0 - edge_v;
            match style.border {
                Some(border) if on_edge => buffer.blend(px, py, border, 1.0),
                _ => buffer.blend(px, py, style.top.lerp(style.bottom, v), style.alpha),
            }

            if shine_alpha > 0.0 && shine_radius > 0.0 {
                let dx = u * bounds.width - shine_x;
                let dy = v * bounds.height - shine_y;
                let falloff = (1.0 - dx.hypot(dy) / shine_radius).max(0.0);
                buffer.blend(px, py, Rgb::WHITE, shine_alpha * falloff);
            }
        }
    }
}

/// Whole-pixel range covering `values`, clipped to `0..limit`.
fn pixel_span(values: [f32; 4], limit: u32) -> (i64, i64) {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let start = min.floor().max(0.0) as i64;
    (start, max.ceil().min(limit as f32) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldConfig, ScreenPoint};
    use crate::panel::PanelConfig;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn trail_alpha_fades_with_age_and_speed() {
        assert_eq!(trail_alpha(0, 1.0), 0.0);
        assert!((trail_alpha(0, 10.0) - 1.0).abs() < 1e-6);
        assert!((trail_alpha(5, 10.0) - 0.5).abs() < 1e-6);
        assert_eq!(trail_alpha(0, 20.0), 1.0);
        assert_eq!(trail_alpha(10, 20.0), 0.0);
    }

    #[test]
    fn homography_round_trips_a_trapezoid() {
        let quad = [(10.0, 10.0), (110.0, 0.0), (120.0, 90.0), (0.0, 100.0)];
        let h = Homography::square_to_quad(quad);
        assert!(close(h.apply(0.0, 0.0).unwrap(), quad[0]));
        assert!(close(h.apply(1.0, 0.0).unwrap(), quad[1]));
        assert!(close(h.apply(1.0, 1.0).unwrap(), quad[2]));
        assert!(close(h.apply(0.0, 1.0).unwrap(), quad[3]));

        let inv = h.inverse().unwrap();
        let mid = h.apply(0.3, 0.6).unwrap();
        assert!(close(inv.apply(mid.0, mid.1).unwrap(), (0.3, 0.6)));
    }

    #[test]
    fn neutral_panel_quad_is_its_bounds() {
        let panel = Panel::default();
        let quad = panel_quad(&panel, Bounds::new(0.0, 0.0, 200.0, 100.0));
        let expected = [(0.0, 0.0), (200.0, 0.0), (200.0, 100.0), (0.0, 100.0)];
        for (got, want) in quad.iter().zip(expected) {
            assert!(close(*got, want));
        }
    }

    #[test]
    fn panel_fill_stays_inside_bounds() {
        let mut data = vec![0u8; 64 * 64 * 4];
        let mut buffer = PixelBuffer::new(&mut data, 64, 64, 256);
        buffer.clear(Rgb::BLACK);
        let style = PanelStyle {
            top: Rgb::new(200, 0, 0),
            bottom: Rgb::new(200, 0, 0),
            alpha: 1.0,
            border: None,
        };
        let bounds = Bounds::new(16.0, 16.0, 32.0, 32.0);
        draw_panel(&Panel::default(), bounds, &style, &mut buffer);
        assert_eq!(buffer.pixel(32, 32), Some(Rgb::new(200, 0, 0)));
        assert_eq!(buffer.pixel(4, 4), Some(Rgb::BLACK));
        assert_eq!(buffer.pixel(60, 32), Some(Rgb::BLACK));
    }

    #[test]
    fn shine_brightens_under_pointer() {
        let bounds = Bounds::new(0.0, 0.0, 64.0, 64.0);
        let style = PanelStyle {
            top: Rgb::BLACK,
            bottom: Rgb::BLACK,
            alpha: 1.0,
            border: None,
        };
        let config = PanelConfig::default()
            .inspect_strength(0.0)
            .scale_strength(1.0)
            .shine(50.0, 0.5);
        let mut panel = Panel::new(config);
        panel.track(16.0, 16.0, bounds);
        panel.tick(1.0);

        let mut data = vec![0u8; 64 * 64 * 4];
        let mut buffer = PixelBuffer::new(&mut data, 64, 64, 256);
        draw_panel(&panel, bounds, &style, &mut buffer);
        let near = buffer.pixel(16, 16).unwrap();
        let far = buffer.pixel(60, 60).unwrap();
        assert!(near.r > 100);
        assert_eq!(far, Rgb::BLACK);
    }

    #[test]
    fn field_draws_something_on_black() {
        let viewport = Viewport::new(64, 64);
        let config = FieldConfig {
            star_count: 300,
            seed: Some(3),
            ..Default::default()
        };
        let mut field = FieldSimulation::new(config, viewport);
        field.step(viewport);
        let mut data = vec![0u8; 64 * 64 * 4];
        let mut buffer = PixelBuffer::new(&mut data, 64, 64, 256);
        buffer.clear(Rgb::BLACK);
        draw_field(&field, viewport, &mut buffer);
        let lit = (0..64)
            .flat_map(|y| (0..64).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.pixel(x, y) != Some(Rgb::BLACK))
            .count();
        assert!(lit > 0);
    }

    fn streaked_field(viewport: Viewport) -> FieldSimulation {
        let config = FieldConfig {
            star_count: 1,
            seed: Some(5),
            ..Default::default()
        };
        let mut field = FieldSimulation::new(config, viewport);
        let particle = &mut field.particles_mut()[0];
        particle.x = 0.0;
        particle.y = 0.0;
        particle.depth = 999.0;
        particle.size = 1.0;
        particle.color = Rgb::WHITE;
        particle.trail.push(ScreenPoint { x: 10.0, y: 32.0 });
        field.set_speed(10.0);
        field
    }

    fn lit_along_trail(field: &FieldSimulation, viewport: Viewport) -> (usize, bool) {
        let mut data = vec![0u8; 64 * 64 * 4];
        let mut buffer = PixelBuffer::new(&mut data, 64, 64, 256);
        buffer.clear(Rgb::BLACK);
        draw_field(field, viewport, &mut buffer);
        // The glow reaches x = 26 on this row; everything left of it is trail.
        let lit = (12..=22)
            .filter(|&x| buffer.pixel(x, 32) != Some(Rgb::BLACK))
            .count();
        (lit, buffer.pixel(32, 32) != Some(Rgb::BLACK))
    }

    #[test]
    fn paused_field_hides_frozen_streaks() {
        let viewport = Viewport::new(64, 64);
        let mut field = streaked_field(viewport);

        let (lit, head) = lit_along_trail(&field, viewport);
        assert!(lit >= 8, "only {lit} trail pixels lit");
        assert!(head);

        field.set_paused(true);
        assert_eq!(field.particles()[0].trail.len(), 1);
        let (lit, head) = lit_along_trail(&field, viewport);
        assert_eq!(lit, 0);
        assert!(head);
    }
}
