use starfolio_core::content::tag_gradient;
use starfolio_core::{Bounds, Panel, PanelStyle, PixelBuffer, Rgb};

use crate::text::{TextPainter, TextSize};

pub const TEXT: Rgb = Rgb::WHITE;
pub const MUTED: Rgb = Rgb::new(0x9c, 0xa3, 0xaf);
pub const DIM: Rgb = Rgb::new(0x6b, 0x72, 0x80);
pub const BLUE: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
pub const PURPLE: Rgb = Rgb::new(0x8b, 0x5c, 0xf6);
pub const ZINC: Rgb = Rgb::new(0x27, 0x27, 0x2a);
pub const PROSE: Rgb = Rgb::new(0xd1, 0xd5, 0xdb);

pub fn fill(buffer: &mut PixelBuffer, b: Bounds, color: Rgb, alpha: f32) {
    buffer.fill_rect(b.left, b.top, b.width, b.height, color, alpha);
}

pub fn outline(buffer: &mut PixelBuffer, b: Bounds, color: Rgb, alpha: f32) {
    buffer.fill_rect(b.left, b.top, b.width, 1.0, color, alpha);
    buffer.fill_rect(b.left, b.bottom() - 1.0, b.width, 1.0, color, alpha);
    buffer.fill_rect(b.left, b.top, 1.0, b.height, color, alpha);
    buffer.fill_rect(b.right() - 1.0, b.top, 1.0, b.height, color, alpha);
}

/// Clickable label. Bounds are in page coordinates.
#[derive(Clone, Debug)]
pub struct Button {
    pub label: String,
    pub bounds: Bounds,
    pub size: TextSize,
    hovered: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, size: TextSize) -> Self {
        Self {
            label: label.into(),
            bounds: Bounds::default(),
            size,
            hovered: false,
        }
    }

    /// Sizes the button around its label with its top-left at `(x, y)`.
    pub fn place(&mut self, text: &TextPainter, x: f32, y: f32) -> Bounds {
        let (w, h) = text.measure(&self.label, self.size);
        self.bounds = Bounds::new(x, y, w + 40.0, h + 20.0);
        self.bounds
    }

    pub fn place_centered(&mut self, text: &TextPainter, cx: f32, y: f32) -> Bounds {
        let bounds = self.place(text, 0.0, y);
        self.bounds = bounds.offset(cx - bounds.width / 2.0, 0.0);
        self.bounds
    }

    pub fn hover(&mut self, x: f32, y: f32) -> bool {
        self.hovered = self.bounds.contains(x, y);
        self.hovered
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
    }

    pub fn draw(&self, buffer: &mut PixelBuffer, text: &TextPainter, scroll: f32, accent: Rgb) {
        let b = self.bounds.offset(0.0, -scroll);
        let background = if self.hovered {
            Rgb::new(0x37, 0x41, 0x51)
        } else {
            Rgb::new(0x11, 0x18, 0x27)
        };
        fill(buffer, b, background, 0.9);
        outline(buffer, b, accent, if self.hovered { 1.0 } else { 0.7 });
        let (w, h) = text.measure(&self.label, self.size);
        let color = if self.hovered { accent } else { TEXT };
        let (x, y) = (b.left + (b.width - w) / 2.0, b.top + (b.height - h) / 2.0);
        text.draw(buffer, &self.label, x, y, self.size, color, 1.0);
    }
}

/// Tilting panel at a fixed place on the page.
#[derive(Default)]
pub struct Card {
    pub panel: Panel,
    pub bounds: Bounds,
}

impl Card {
    pub fn new(panel: Panel) -> Self {
        Self {
            panel,
            bounds: Bounds::default(),
        }
    }

    pub fn track(&mut self, x: f32, y: f32) {
        self.panel.track(x, y, self.bounds);
    }

    pub fn release(&mut self) {
        if self.panel.is_hovered() {
            self.panel.pointer_left();
        }
    }

    pub fn on_screen(&self, scroll: f32) -> Bounds {
        self.bounds.offset(0.0, -scroll)
    }

    pub fn paint(&self, buffer: &mut PixelBuffer, scroll: f32, style: &PanelStyle) {
        crate::paint_panel(&self.panel, self.on_screen(scroll), style, buffer);
    }
}

/// Indices of `cards` back to front.
pub fn paint_order(cards: &[Card]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..cards.len()).collect();
    order.sort_by_key(|&i| cards[i].panel.z_index());
    order
}

/// Space a [`section_title`] takes.
pub fn title_height(text: &TextPainter) -> f32 {
    text.measure("My", TextSize::Heading).1 + 8.0
}

/// Centred gradient heading; returns the height it took.
pub fn section_title(
    buffer: &mut PixelBuffer,
    text: &TextPainter,
    title: &str,
    cx: f32,
    y: f32,
) -> f32 {
    let (w, h) = text.measure(title, TextSize::Heading);
    let x = cx - w / 2.0;
    let color = BLUE.lerp(PURPLE, 0.5);
    text.draw(buffer, title, x, y, TextSize::Heading, color, 1.0);
    buffer.fill_gradient(x, y + h + 4.0, w, 3.0, BLUE, PURPLE, 0.8);
    h + 8.0
}

/// Flowing technology chips. Returns the height used.
#[allow(clippy::too_many_arguments)]
pub fn chips(
    mut buffer: Option<&mut PixelBuffer>,
    text: &TextPainter,
    techs: &[String],
    x: f32,
    y: f32,
    max_width: f32,
    coloured: bool,
) -> f32 {
    let (mut cx, mut cy) = (x, y);
    let line = text.line_height(TextSize::Small) + 8.0;
    for tech in techs {
        let (w, h) = text.measure(tech, TextSize::Small);
        let chip = w + 16.0;
        if cx > x && cx + chip > x + max_width {
            cx = x;
            cy += line + 6.0;
        }
        if let Some(buffer) = buffer.as_deref_mut() {
            let (from, to) = if coloured {
                tag_gradient(tech)
            } else {
                (ZINC, ZINC)
            };
            buffer.fill_gradient(cx, cy, chip, line, from, to, 0.9);
            let ty = cy + (line - h) / 2.0;
            text.draw(buffer, tech, cx + 8.0, ty, TextSize::Small, TEXT, 1.0);
        }
        cx += chip + 8.0;
    }
    if techs.is_empty() {
        0.0
    } else {
        cy - y + line
    }
}
