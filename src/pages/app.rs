use starfolio_core::carousel::Carousel;
use starfolio_core::content::MobileApp;
use starfolio_core::layout::{self, Columns};
use starfolio_core::route::Route;
use starfolio_core::{Bounds, PanelStyle, PixelBuffer, Rgb, Viewport};

use super::widgets::{self, Button, Card, BLUE, DIM, MUTED, PURPLE, TEXT, ZINC};
use super::{Nav, Ui};
use crate::text::{TextPainter, TextSize};

const MAX_WIDTH: f32 = 1152.0;
const PADDING: f32 = 16.0;
const SHOT_HEIGHT: f32 = 560.0;
const FEATURE_HEIGHT: f32 = 180.0;
const ARROW: f32 = 48.0;

/// Details of one mobile app: pitch, screenshots and features.
pub struct AppPage {
    app: MobileApp,
    viewport: Viewport,
    carousel: Carousel,
    back: Button,
    policy: Option<Button>,
    store: Option<Button>,
    support: Option<Button>,
    github: Option<Button>,
    preview: Bounds,
    shot: Bounds,
    previous: Bounds,
    next: Bounds,
    dots: Vec<Bounds>,
    features: Vec<Card>,
    features_top: f32,
    height: f32,
}

impl AppPage {
    pub fn new(app: MobileApp, viewport: Viewport) -> Self {
        let features = app.features.iter().map(|_| Card::default()).collect();
        let button = |link: &Option<String>, label: &str| {
            link.as_ref().map(|_| Button::new(label, TextSize::Body))
        };
        Self {
            carousel: Carousel::new(app.screenshots.len()),
            back: Button::new("Back to Portfolio", TextSize::Body),
            policy: button(&app.privacy_policy, "Privacy Policy"),
            store: button(&app.app_store_link, "Download on App Store"),
            support: button(&app.support_email, "Support"),
            github: button(&app.github_link, "View on GitHub"),
            app,
            viewport,
            preview: Bounds::default(),
            shot: Bounds::default(),
            previous: Bounds::default(),
            next: Bounds::default(),
            dots: Vec::new(),
            features,
            features_top: 0.0,
            height: 0.0,
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn next_screenshot(&mut self) {
        self.carousel.next();
    }

    pub fn previous_screenshot(&mut self) {
        self.carousel.previous();
    }

    fn buttons_mut(&mut self) -> impl Iterator<Item = &mut Button> {
        std::iter::once(&mut self.back)
            .chain(self.policy.as_mut())
            .chain(self.store.as_mut())
            .chain(self.support.as_mut())
            .chain(self.github.as_mut())
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, scroll: f32) {
        let py = y + scroll;
        self.buttons_mut().for_each(|b| {
            b.hover(x, py);
        });
        self.features.iter_mut().for_each(|card| card.track(x, py));
    }

    pub fn clicked(&mut self, x: f32, y: f32, scroll: f32) -> Option<Nav> {
        let py = y + scroll;
        if self.back.contains(x, py) {
            return Some(Nav::Back);
        }
        if self.policy.as_ref().is_some_and(|b| b.contains(x, py)) {
            let id = self.app.id.clone();
            return Some(Nav::Go(Route::PrivacyPolicy { id }));
        }
        if self.store.as_ref().is_some_and(|b| b.contains(x, py)) {
            return self.app.app_store_link.clone().map(Nav::Open);
        }
        if self.support.as_ref().is_some_and(|b| b.contains(x, py)) {
            let email = self.app.support_email.as_ref()?;
            return Some(Nav::Open(format!("mailto:{email}")));
        }
        if self.github.as_ref().is_some_and(|b| b.contains(x, py)) {
            return self.app.github_link.clone().map(Nav::Open);
        }
        if self.previous.contains(x, py) {
            self.carousel.previous();
        } else if self.next.contains(x, py) {
            self.carousel.next();
        } else if let Some(dot) = self.dots.iter().position(|d| d.contains(x, py)) {
            self.carousel.select(dot);
        }
        None
    }

    pub fn tick(&mut self, dt: f32) {
        for card in &mut self.features {
            card.panel.tick(dt);
        }
    }

    fn layout(&mut self, text: &TextPainter) {
        let vw = self.viewport.width as f32;
        let (left, width) = layout::content_column(vw, MAX_WIDTH, PADDING);
        let mut y = 32.0;

        let back = self.back.place(text, left, y);
        if let Some(policy) = self.policy.as_mut() {
            let (w, _) = text.measure(&policy.label, policy.size);
            policy.place(text, left + width - w - 40.0, y);
        }
        y = back.bottom() + 48.0;

        let columns = layout::grid_columns(self.viewport.width, Columns::SPLIT);
        let (body_left, body_width) = if columns > 1 {
            let half = (width - 48.0) / 2.0;
            self.preview = Bounds::new(left, y, half, 480.0);
            (left + half + 48.0, half)
        } else {
            self.preview = Bounds::new(left, y, width, 320.0);
            y = self.preview.bottom() + 32.0;
            (left, width)
        };

        let mut body_y = y + text.line_height(TextSize::Heading) + 16.0;
        for paragraph in self.app.detailed_description.split("\n\n") {
            body_y += text.paragraph_height(paragraph, TextSize::Body, body_width) + 12.0;
        }
        let techs = &self.app.technologies;
        let chips = widgets::chips(None, text, techs, 0.0, 0.0, body_width, false);
        body_y += 12.0 + chips + 24.0;
        let mut x = body_left;
        let links = [&mut self.store, &mut self.support, &mut self.github];
        for button in links.into_iter().flatten() {
            x = button.place(text, x, body_y).right() + 16.0;
        }
        body_y += text.line_height(TextSize::Body) + 20.0;
        y = body_y.max(self.preview.bottom()) + 96.0;

        y += widgets::title_height(text) + 64.0;
        if !self.carousel.is_empty() {
            let shot_width = width.min(SHOT_HEIGHT * 0.6);
            self.shot = Bounds::new(vw / 2.0 - shot_width / 2.0, y, shot_width, SHOT_HEIGHT);
            let arrow_y = y + SHOT_HEIGHT / 2.0 - ARROW / 2.0;
            self.previous = Bounds::new(self.shot.left - ARROW - 24.0, arrow_y, ARROW, ARROW);
            self.next = Bounds::new(self.shot.right() + 24.0, arrow_y, ARROW, ARROW);
            let title = text.line_height(TextSize::Title);
            let description = text.line_height(TextSize::Body) * 3.0;
            y = self.shot.bottom() + 24.0 + title + description;
            let count = self.carousel.len() as f32;
            let dots_left = vw / 2.0 - (count * 24.0) / 2.0;
            let dot = |i: usize| Bounds::new(dots_left + i as f32 * 24.0, y, 24.0, 24.0);
            self.dots = (0..self.carousel.len()).map(dot).collect();
            y += 24.0 + 96.0;
        } else {
            self.dots.clear();
            self.previous = Bounds::default();
            self.next = Bounds::default();
        }

        self.features_top = y;
        y += widgets::title_height(text) + 64.0;
        let columns = layout::grid_columns(self.viewport.width, Columns::PROJECTS);
        let area = Bounds::new(left, y, width, 0.0);
        let count = self.features.len();
        let cells = layout::grid(area, count, columns, 24.0, FEATURE_HEIGHT);
        for (card, cell) in self.features.iter_mut().zip(cells) {
            card.bounds = cell;
        }
        y += layout::grid_height(count, columns, 24.0, FEATURE_HEIGHT) + 96.0;
        self.height = y;
    }

    pub fn draw(&mut self, buffer: &mut PixelBuffer, ui: &mut Ui, scroll: f32) {
        self.layout(ui.text);
        let text = ui.text;
        let cx = self.viewport.width as f32 / 2.0;

        self.back.draw(buffer, text, scroll, BLUE);
        if let Some(policy) = &self.policy {
            policy.draw(buffer, text, scroll, PURPLE);
        }

        let preview = self.preview.offset(0.0, -scroll);
        match ui.images.get(&self.app.image_url) {
            Some(picture) => crate::paint_picture(picture, preview, 1.0, buffer),
            None => widgets::fill(buffer, preview, ZINC, 0.6),
        }

        let columns = layout::grid_columns(self.viewport.width, Columns::SPLIT);
        let p = self.preview;
        let (x, mut y) = if columns > 1 {
            (p.right() + 48.0, p.top - scroll)
        } else {
            (p.left, p.bottom() + 32.0 - scroll)
        };
        let width = p.width;
        let title = &self.app.title;
        let heading = BLUE.lerp(PURPLE, 0.5);
        text.draw(buffer, title, x, y, TextSize::Heading, heading, 1.0);
        y += text.line_height(TextSize::Heading) + 16.0;
        for body in self.app.detailed_description.split("\n\n") {
            let used = text.draw_wrapped(buffer, body, x, y, width, TextSize::Body, MUTED, 1.0);
            y += used + 12.0;
        }
        let techs = &self.app.technologies;
        widgets::chips(Some(buffer), text, techs, x, y + 12.0, width, false);
        let links = [&self.store, &self.support, &self.github];
        for button in links.into_iter().flatten() {
            button.draw(buffer, text, scroll, BLUE);
        }

        if !self.carousel.is_empty() {
            let top = self.shot.top - widgets::title_height(text) - 64.0 - scroll;
            widgets::section_title(buffer, text, "App Experience", cx, top);
            self.draw_carousel(buffer, ui, scroll);
        }

        widgets::section_title(buffer, text, "Key Features", cx, self.features_top - scroll);
        let style = PanelStyle::default();
        for i in widgets::paint_order(&self.features) {
            let card = &self.features[i];
            let feature = &self.app.features[i];
            card.paint(buffer, scroll, &style);
            let b = card.on_screen(scroll).inset(24.0);
            let header = &feature.header;
            text.draw(buffer, header, b.left, b.top, TextSize::Title, TEXT, 1.0);
            let y = b.top + text.line_height(TextSize::Title) + 12.0;
            text.draw_wrapped(
                buffer,
                &feature.description,
                b.left,
                y,
                b.width,
                TextSize::Small,
                MUTED,
                1.0,
            );
        }
    }

    fn draw_carousel(&self, buffer: &mut PixelBuffer, ui: &mut Ui, scroll: f32) {
        let Some(index) = self.carousel.index() else {
            return;
        };
        let text = ui.text;
        let shot = &self.app.screenshots[index];
        let frame = self.shot.offset(0.0, -scroll);
        let (cx, cy) = frame.center();
        widgets::fill(buffer, frame, Rgb::new(0x18, 0x18, 0x1b), 1.0);
        match ui.images.get(&shot.image) {
            Some(picture) => crate::paint_picture(picture, frame.inset(8.0), 1.0, buffer),
            None => text.draw_centered(buffer, &shot.title, cx, cy, TextSize::Body, DIM, 1.0),
        }
        widgets::outline(buffer, frame, ZINC, 1.0);

        for (bounds, pointing_left) in [(self.previous, true), (self.next, false)] {
            let (cx, cy) = bounds.offset(0.0, -scroll).center();
            buffer.fill_circle(cx, cy, ARROW / 2.0, ZINC, 0.9);
            let dx = if pointing_left { 6.0 } else { -6.0 };
            buffer.line(cx + dx, cy - 10.0, cx - dx, cy, 3.0, TEXT, 1.0);
            buffer.line(cx - dx, cy, cx + dx, cy + 10.0, 3.0, TEXT, 1.0);
        }

        let y = frame.bottom() + 24.0;
        text.draw_centered(buffer, &shot.title, cx, y, TextSize::Title, TEXT, 1.0);
        let width = (self.viewport.width as f32 - 32.0).min(640.0);
        let line_height = text.line_height(TextSize::Body);
        let lines = text.wrap(&shot.description, TextSize::Body, width);
        for (i, line) in lines.iter().take(3).enumerate() {
            let line_y = y + text.line_height(TextSize::Title) + i as f32 * line_height;
            text.draw_centered(buffer, line, cx, line_y, TextSize::Body, MUTED, 1.0);
        }

        for (i, dot) in self.dots.iter().enumerate() {
            let (cx, cy) = dot.offset(0.0, -scroll).center();
            let color = if i == index { BLUE } else { DIM };
            buffer.fill_circle(cx, cy, 5.0, color, 1.0);
        }
    }
}
