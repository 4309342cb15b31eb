use std::path::{Path, PathBuf};

use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::ttf::{Font, Sdl2TtfContext};
use starfolio_core::{PixelBuffer, Rgb};

const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextSize {
    Small,
    Body,
    Title,
    Heading,
    Display,
}

impl TextSize {
    fn points(self) -> u16 {
        match self {
            TextSize::Small => 14,
            TextSize::Body => 18,
            TextSize::Title => 24,
            TextSize::Heading => 40,
            TextSize::Display => 72,
        }
    }

    const ALL: [TextSize; 5] = [
        TextSize::Small,
        TextSize::Body,
        TextSize::Title,
        TextSize::Heading,
        TextSize::Display,
    ];
}

/// Renders strings into the frame buffer. Without a usable font every call
/// is a no-op that still reports a plausible size, so layout stays stable.
pub struct TextPainter {
    fonts: Vec<(TextSize, Font<'static, 'static>)>,
}

impl TextPainter {
    pub fn new(body: Option<&Path>, heading: Option<&Path>) -> Self {
        let context: &'static Sdl2TtfContext = match sdl2::ttf::init() {
            Ok(context) => Box::leak(Box::new(context)),
            Err(e) => {
                log::warn!("text disabled, ttf init failed: {e}");
                return Self { fonts: Vec::new() };
            }
        };
        let Some(body) = pick_font(body) else {
            log::warn!("text disabled, no font found; pass --font");
            return Self { fonts: Vec::new() };
        };
        let heading = heading
            .map(Path::to_path_buf)
            .unwrap_or_else(|| body.clone());

        let mut fonts = Vec::new();
        for size in TextSize::ALL {
            let path = if matches!(size, TextSize::Heading | TextSize::Display) {
                &heading
            } else {
                &body
            };
            match context.load_font(path, size.points()) {
                Ok(font) => fonts.push((size, font)),
                Err(e) => log::warn!(
                    "could not load {} at {}pt: {e}",
                    path.display(),
                    size.points()
                ),
            }
        }
        log::info!("text from {}", body.display());
        Self { fonts }
    }

    fn font(&self, size: TextSize) -> Option<&Font<'static, 'static>> {
        self.fonts
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, font)| font)
    }

    pub fn line_height(&self, size: TextSize) -> f32 {
        match self.font(size) {
            Some(font) => font.recommended_line_spacing() as f32,
            None => size.points() as f32 * 1.4,
        }
    }

    pub fn measure(&self, text: &str, size: TextSize) -> (f32, f32) {
        match self.font(size).and_then(|font| font.size_of(text).ok()) {
            Some((w, h)) => (w as f32, h as f32),
            None => {
                let width = text.chars().count() as f32 * size.points() as f32 * 0.55;
                (width, self.line_height(size))
            }
        }
    }

    /// Greedy wrap to `max_width` pixels.
    pub fn wrap(&self, text: &str, size: TextSize, max_width: f32) -> Vec<String> {
        let (sample, _) = self.measure("abcdefghijklmnopqrstuvwxyz", size);
        let columns = ((max_width / (sample / 26.0).max(1.0)) as usize).max(1);
        textwrap::wrap(text, columns)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }

    /// Height a wrapped paragraph will take.
    pub fn paragraph_height(&self, text: &str, size: TextSize, max_width: f32) -> f32 {
        self.wrap(text, size, max_width).len() as f32 * self.line_height(size)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        buffer: &mut PixelBuffer,
        text: &str,
        x: f32,
        y: f32,
        size: TextSize,
        color: Rgb,
        alpha: f32,
    ) {
        if text.is_empty() {
            return;
        }
        let Some(font) = self.font(size) else {
            return;
        };
        let surface = match font.render(text).blended(Color::RGBA(255, 255, 255, 255)) {
            Ok(surface) => surface,
            Err(e) => {
                log::debug!("render {text:?}: {e}");
                return;
            }
        };
        let Ok(surface) = surface.convert_format(PixelFormatEnum::ARGB8888) else {
            return;
        };
        let (w, h) = (surface.width() as usize, surface.height() as usize);
        let pitch = surface.pitch() as usize;
        let (ox, oy) = (x.round() as i64, y.round() as i64);
        surface.with_lock(|pixels| {
            for row in 0..h {
                for col in 0..w {
                    let coverage = coverage_at(pixels, pitch, row, col);
                    if coverage > 0 {
                        let a = alpha * coverage as f32 / 255.0;
                        buffer.blend(ox + col as i64, oy + row as i64, color, a);
                    }
                }
            }
        });
    }

    /// Draws wrapped text and returns the height used.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_wrapped(
        &self,
        buffer: &mut PixelBuffer,
        text: &str,
        x: f32,
        y: f32,
        max_width: f32,
        size: TextSize,
        color: Rgb,
        alpha: f32,
    ) -> f32 {
        let line_height = self.line_height(size);
        let lines = self.wrap(text, size, max_width);
        for (i, line) in lines.iter().enumerate() {
            let line_y = y + i as f32 * line_height;
            self.draw(buffer, line, x, line_y, size, color, alpha);
        }
        lines.len() as f32 * line_height
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_centered(
        &self,
        buffer: &mut PixelBuffer,
        text: &str,
        cx: f32,
        y: f32,
        size: TextSize,
        color: Rgb,
        alpha: f32,
    ) {
        let (w, _) = self.measure(text, size);
        self.draw(buffer, text, cx - w / 2.0, y, size, color, alpha);
    }
}

fn pick_font(requested: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = requested {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        log::warn!("font {} not found, trying system fonts", path.display());
    }
    FALLBACK_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Glyph coverage of one pixel of a blended ARGB8888 surface. The format is a
/// packed u32, so alpha is the last byte of each pixel on little-endian hosts.
fn coverage_at(pixels: &[u8], pitch: usize, row: usize, col: usize) -> u8 {
    pixels.get(row * pitch + col * 4 + 3).copied().unwrap_or(0)
}
