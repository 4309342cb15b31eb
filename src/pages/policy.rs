use starfolio_core::markdown::{self, Block};
use starfolio_core::{layout, PixelBuffer, Viewport};

use super::widgets::{Button, BLUE, DIM, MUTED, PROSE, TEXT, ZINC};
use super::{Nav, Ui};
use crate::text::{TextPainter, TextSize};

const MAX_WIDTH: f32 = 768.0;
const INDENT: f32 = 24.0;

/// Privacy policy of one app, rendered from markdown.
pub struct PolicyPage {
    title: String,
    blocks: Vec<Block>,
    viewport: Viewport,
    back: Button,
    height: f32,
}

impl PolicyPage {
    pub fn new(app_title: &str, markdown: &str, viewport: Viewport) -> Self {
        let blocks = markdown::parse(markdown);
        log::debug!("privacy policy for {app_title}: {} blocks", blocks.len());
        Self {
            title: app_title.to_string(),
            blocks,
            viewport,
            back: Button::new(format!("Back to {app_title}"), TextSize::Body),
            height: 0.0,
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, scroll: f32) {
        self.back.hover(x, y + scroll);
    }

    pub fn clicked(&mut self, x: f32, y: f32, scroll: f32) -> Option<Nav> {
        self.back.contains(x, y + scroll).then_some(Nav::Back)
    }

    pub fn draw(&mut self, buffer: &mut PixelBuffer, ui: &mut Ui, scroll: f32) {
        let text = ui.text;
        let (left, width) = layout::content_column(self.viewport.width as f32, MAX_WIDTH, 16.0);
        let back = self.back.place(text, left, 32.0);
        self.back.draw(buffer, text, scroll, BLUE);

        let mut y = back.bottom() + 48.0 - scroll;
        text.draw(buffer, &self.title, left, y, TextSize::Small, DIM, 1.0);
        y += text.line_height(TextSize::Small) + 8.0;
        for block in &self.blocks {
            y += draw_block(buffer, text, block, left, y, width) + 12.0;
        }
        self.height = y + scroll + 64.0;
    }
}

/// Draws one block at `(x, y)` and returns its height.
fn draw_block(
    buffer: &mut PixelBuffer,
    text: &TextPainter,
    block: &Block,
    x: f32,
    y: f32,
    width: f32,
) -> f32 {
    match block {
        Block::Heading {
            level,
            text: heading,
        } => {
            let size = match level {
                1 => TextSize::Heading,
                2 => TextSize::Title,
                _ => TextSize::Body,
            };
            let top = if *level > 1 { 16.0 } else { 0.0 };
            top + text.draw_wrapped(buffer, heading, x, y + top, width, size, TEXT, 1.0)
        }
        Block::Paragraph(paragraph) => {
            text.draw_wrapped(buffer, paragraph, x, y, width, TextSize::Body, PROSE, 1.0)
        }
        Block::ListItem { depth, text: item } => {
            let indent = INDENT * *depth as f32;
            let bullet_y = y + text.line_height(TextSize::Body) / 2.0;
            buffer.fill_circle(x + indent - 10.0, bullet_y, 2.5, MUTED, 1.0);
            let (x, width) = (x + indent, width - indent);
            text.draw_wrapped(buffer, item, x, y, width, TextSize::Body, MUTED, 1.0)
        }
        Block::Code(code) => {
            let line_height = text.line_height(TextSize::Small);
            let lines: Vec<&str> = code.lines().collect();
            let height = lines.len() as f32 * line_height + 16.0;
            buffer.fill_rect(x, y, width, height, ZINC, 0.8);
            for (i, line) in lines.iter().enumerate() {
                let line_y = y + 8.0 + i as f32 * line_height;
                text.draw(buffer, line, x + 8.0, line_y, TextSize::Small, TEXT, 1.0);
            }
            height
        }
        Block::Rule => {
            buffer.fill_rect(x, y + 8.0, width, 1.0, ZINC, 1.0);
            17.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_button_returns() {
        let viewport = Viewport::new(800, 600);
        let mut page = PolicyPage::new("Car Care Log", "# Policy\n\nText.", viewport);
        assert_eq!(page.blocks.len(), 2);
        page.back.bounds = starfolio_core::Bounds::new(10.0, 10.0, 100.0, 40.0);
        assert!(matches!(page.clicked(20.0, 20.0, 0.0), Some(Nav::Back)));
        assert!(page.clicked(20.0, 20.0, 200.0).is_none());
    }
}
