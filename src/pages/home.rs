use std::cell::{Cell, RefCell};
use std::f32::consts::TAU;
use std::rc::Rc;

use starfolio_core::content::{MobileApp, Portfolio, Project};
use starfolio_core::hero::{HeroAction, HeroState};
use starfolio_core::layout::{self, Columns};
use starfolio_core::route::Route;
use starfolio_core::{
    BackgroundConfig, Bounds, Panel, PanelConfig, PanelStyle, PixelBuffer, Rgb, StarfieldBackground,
    Viewport,
};

use super::widgets::{self, Button, Card, BLUE, DIM, MUTED, PROSE, PURPLE, TEXT, ZINC};
use super::{Nav, Ui};
use crate::text::{TextPainter, TextSize};

const MAX_WIDTH: f32 = 1152.0;
const PADDING: f32 = 16.0;
const SECTION_PAD: f32 = 96.0;
const TITLE_GAP: f32 = 64.0;
const FADE: f32 = 96.0;
const MOBILE_WIDTH: u32 = 640;
const SKILL_HEIGHT: f32 = 200.0;
const PROJECT_HEIGHT: f32 = 300.0;
const CARD_PAD: f32 = 24.0;

const APPS_INTRO: &str =
    "Here are some of my iOS applications that I have built and published to the App Store.";
const MORE_PROJECTS: &str = "View More Projects on GitHub";
const CONTACT_INTRO: &str = "Send me an email or message me on Upwork!";

/// Expanded project view; bounds are in window coordinates.
struct Overlay {
    index: usize,
    card: Bounds,
    close: Bounds,
    live: Button,
    github: Option<Button>,
}

pub struct HomePage {
    portfolio: Rc<Portfolio>,
    background: StarfieldBackground,
    hero: HeroState,
    viewport: Viewport,
    clock: f32,
    cta: Button,
    pause: Bounds,
    chevron: Bounds,
    skills: Vec<Card>,
    projects: Vec<Card>,
    apps: Vec<Card>,
    app_columns: usize,
    more_projects: Option<Button>,
    contact: Vec<Button>,
    hovered_project: Rc<Cell<Option<usize>>>,
    expanded: Rc<Cell<Option<usize>>>,
    overlay: Option<Overlay>,
    pending: Rc<RefCell<Option<Nav>>>,
    skills_top: f32,
    apps_top: f32,
    height: f32,
}

impl HomePage {
    pub fn new(
        portfolio: Rc<Portfolio>,
        background: &BackgroundConfig,
        viewport: Viewport,
    ) -> Self {
        let hovered_project = Rc::new(Cell::new(None));
        let expanded = Rc::new(Cell::new(None));
        let pending = Rc::new(RefCell::new(None));

        let skills = portfolio.skills.iter().map(|_| Card::default()).collect();
        let projects = (0..portfolio.projects.len())
            .map(|i| {
                let enter = hovered_project.clone();
                let leave = hovered_project.clone();
                let open = expanded.clone();
                let config = PanelConfig::default().inspect_strength(0.8);
                Card::new(
                    Panel::new(config)
                        .on_mouse_enter(move || enter.set(Some(i)))
                        .on_mouse_leave(move || leave.set(None))
                        .on_click(move || open.set(Some(i))),
                )
            })
            .collect();
        let apps = portfolio
            .apps
            .iter()
            .map(|app| {
                let (pending, id) = (pending.clone(), app.id.clone());
                let config = PanelConfig::default()
                    .inspect_strength(0.1)
                    .scale_strength(1.01)
                    .shine(15.0, 0.05);
                let panel = Panel::new(config).on_click(move || {
                    let id = id.clone();
                    *pending.borrow_mut() = Some(Nav::Go(Route::AppDetails { id }));
                });
                Card::new(panel)
            })
            .collect();
        let more_projects = portfolio
            .more_projects_link
            .as_ref()
            .map(|_| Button::new(MORE_PROJECTS, TextSize::Body));
        let contact = portfolio
            .contact
            .iter()
            .map(|link| Button::new(link.label.clone(), TextSize::Body))
            .collect();

        Self {
            hero: HeroState::new(portfolio.mailto()),
            background: StarfieldBackground::mount(background, viewport),
            portfolio,
            viewport,
            clock: 0.0,
            cta: Button::new("Email Me", TextSize::Title),
            pause: Bounds::default(),
            chevron: Bounds::default(),
            skills,
            projects,
            apps,
            app_columns: 1,
            more_projects,
            contact,
            hovered_project,
            expanded,
            overlay: None,
            pending,
            skills_top: 0.0,
            apps_top: 0.0,
            height: 0.0,
        }
    }

    pub fn background_mut(&mut self) -> &mut StarfieldBackground {
        &mut self.background
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn apps_top(&self) -> f32 {
        self.apps_top
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.background.resized(viewport);
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.hero.toggle_pause();
        self.background.set_paused(paused);
    }

    /// Closes the expanded project, if any.
    pub fn escape(&mut self) -> bool {
        self.expanded.take().is_some()
    }

    fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.skills
            .iter_mut()
            .chain(self.projects.iter_mut())
            .chain(self.apps.iter_mut())
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, scroll: f32) {
        self.background.pointer_moved(x, y);
        if self.expanded.get().is_some() {
            self.hero.set_cta_hovered(false);
            self.cards_mut().for_each(Card::release);
            if let Some(overlay) = self.overlay.as_mut() {
                overlay.live.hover(x, y);
                if let Some(github) = overlay.github.as_mut() {
                    github.hover(x, y);
                }
            }
            return;
        }

        let py = y + scroll;
        let over_cta = self.cta.hover(x, py);
        self.hero.set_cta_hovered(over_cta);
        self.cards_mut().for_each(|card| card.track(x, py));
        if let Some(button) = self.more_projects.as_mut() {
            button.hover(x, py);
        }
        for button in &mut self.contact {
            button.hover(x, py);
        }
    }

    pub fn clicked(&mut self, x: f32, y: f32, scroll: f32) -> Option<Nav> {
        if let Some(index) = self.expanded.get() {
            let project = &self.portfolio.projects[index];
            match self.overlay.as_ref().filter(|o| o.index == index) {
                Some(overlay) if overlay.live.contains(x, y) => {
                    return Some(Nav::Open(project.link.clone()));
                }
                Some(overlay) if overlay.github.as_ref().is_some_and(|b| b.contains(x, y)) => {
                    return project.github_link.clone().map(Nav::Open);
                }
                Some(overlay) if overlay.card.contains(x, y) && !overlay.close.contains(x, y) => {}
                _ => self.expanded.set(None),
            }
            return None;
        }

        let py = y + scroll;
        if self.pause.contains(x, py) {
            self.toggle_pause();
            return None;
        }
        if self.chevron.contains(x, py) {
            return Some(self.hero_action(self.hero.chevron_clicked()));
        }
        if self.cta.contains(x, py) {
            self.hero.cta_clicked();
            return None;
        }
        for card in self.cards_mut() {
            if card.panel.is_hovered() {
                card.panel.clicked();
            }
        }
        if let Some(nav) = self.pending.borrow_mut().take() {
            return Some(nav);
        }
        if self.more_projects.iter().any(|b| b.contains(x, py)) {
            return self.portfolio.more_projects_link.clone().map(Nav::Open);
        }
        let contact = self.contact.iter().position(|b| b.contains(x, py))?;
        Some(Nav::Open(self.portfolio.contact[contact].href.clone()))
    }

    fn hero_action(&self, action: HeroAction) -> Nav {
        match action {
            HeroAction::OpenLink(link) => Nav::Open(link),
            HeroAction::ScrollToSkills => Nav::Scroll(self.skills_top),
        }
    }

    pub fn tick(&mut self, dt: f32) -> Option<Nav> {
        self.clock += dt;
        let action = self.hero.tick(dt);
        self.background.set_hyperdrive(self.hero.hyperdrive());
        self.cards_mut().for_each(|card| card.panel.tick(dt));
        action.map(|action| self.hero_action(action))
    }

    fn layout(&mut self, text: &TextPainter) {
        let (vw, vh) = (self.viewport.width as f32, self.viewport.height as f32);
        let (left, width) = layout::content_column(vw, MAX_WIDTH, PADDING);
        let title = widgets::title_height(text) + TITLE_GAP;

        self.pause = Bounds::new(vw - 64.0, 16.0, 48.0, 48.0);
        self.cta.place_centered(text, vw / 2.0, vh / 2.0 + 40.0);
        self.chevron = Bounds::new(vw / 2.0 - 20.0, vh - 72.0, 40.0, 40.0);

        self.skills_top = vh;
        let mut y = vh + SECTION_PAD + title;
        let columns = layout::grid_columns(self.viewport.width, Columns::SKILLS);
        let area = Bounds::new(left, y, width, 0.0);
        let cells = layout::grid(area, self.skills.len(), columns, 24.0, SKILL_HEIGHT);
        for (card, cell) in self.skills.iter_mut().zip(cells) {
            card.bounds = cell;
        }
        y += layout::grid_height(self.skills.len(), columns, 24.0, SKILL_HEIGHT) + SECTION_PAD;

        y += SECTION_PAD + title;
        let columns = layout::grid_columns(self.viewport.width, Columns::PROJECTS);
        let area = Bounds::new(left, y, width, 0.0);
        let cells = layout::grid(area, self.projects.len(), columns, 32.0, PROJECT_HEIGHT);
        for (card, cell) in self.projects.iter_mut().zip(cells) {
            card.bounds = cell;
        }
        y += layout::grid_height(self.projects.len(), columns, 32.0, PROJECT_HEIGHT);
        if let Some(button) = self.more_projects.as_mut() {
            y += TITLE_GAP;
            y = button.place_centered(text, vw / 2.0, y).bottom();
        }
        y += SECTION_PAD;

        self.apps_top = y;
        y += SECTION_PAD + title;
        y += text.paragraph_height(APPS_INTRO, TextSize::Title, width.min(768.0)) + TITLE_GAP;
        self.app_columns = layout::grid_columns(self.viewport.width, Columns::SPLIT);
        for (card, app) in self.apps.iter_mut().zip(&self.portfolio.apps) {
            let height = app_card_height(text, app, width, self.app_columns);
            card.bounds = Bounds::new(left, y, width, height);
            y += height + 32.0;
        }
        y += SECTION_PAD;

        y += title + text.line_height(TextSize::Body) + 48.0;
        let gap = 24.0;
        let width_of = |b: &Button| text.measure(&b.label, b.size).0 + 40.0;
        let gaps = self.contact.len().saturating_sub(1) as f32 * gap;
        let row = self.contact.iter().map(width_of).sum::<f32>() + gaps;
        let mut x = vw / 2.0 - row / 2.0;
        let mut bottom = y;
        for button in &mut self.contact {
            let placed = button.place(text, x, y);
            x = placed.right() + gap;
            bottom = bottom.max(placed.bottom());
        }
        y = bottom + 48.0 + text.line_height(TextSize::Small) + SECTION_PAD;
        self.height = y;

        self.overlay = match self.expanded.get() {
            Some(index) => {
                let previous = self.overlay.take().filter(|o| o.index == index);
                Some(self.layout_overlay(text, index, previous))
            }
            None => None,
        };
    }

    fn layout_overlay(
        &self,
        text: &TextPainter,
        index: usize,
        previous: Option<Overlay>,
    ) -> Overlay {
        let project = &self.portfolio.projects[index];
        let (vw, vh) = (self.viewport.width as f32, self.viewport.height as f32);
        let width = (vw - 32.0).clamp(0.0, 768.0);
        let inner = width - 64.0;
        let height = 32.0
            + text.line_height(TextSize::Heading)
            + text.line_height(TextSize::Small)
            + 16.0
            + text.paragraph_height(&project.long_description, TextSize::Body, inner)
            + 24.0
            + text.line_height(TextSize::Title)
            + widgets::chips(None, text, &project.technologies, 0.0, 0.0, inner, true)
            + 24.0
            + text.line_height(TextSize::Body)
            + 20.0
            + 32.0;
        let top = ((vh - height) / 2.0).max(16.0);
        let card = Bounds::new((vw - width) / 2.0, top, width, height);

        let (mut live, mut github) = match previous {
            Some(o) => (o.live, o.github),
            None => {
                let github = Button::new("View on GitHub", TextSize::Body);
                let live = Button::new("View Live", TextSize::Body);
                (live, project.github_link.as_ref().map(|_| github))
            }
        };
        let buttons_y = card.bottom() - 32.0 - text.line_height(TextSize::Body) - 20.0;
        let placed = live.place(text, card.left + 32.0, buttons_y);
        if let Some(github) = github.as_mut() {
            github.place(text, placed.right() + 16.0, buttons_y);
        }
        let close = Bounds::new(card.right() - 48.0, card.top + 16.0, 32.0, 32.0);
        Overlay {
            index,
            card,
            close,
            live,
            github,
        }
    }

    pub fn draw(&mut self, buffer: &mut PixelBuffer, ui: &mut Ui, scroll: f32) {
        self.layout(ui.text);
        let text = ui.text;
        let (vw, vh) = (self.viewport.width as f32, self.viewport.height as f32);
        let cx = vw / 2.0;

        self.draw_hero(buffer, text, scroll);

        let title_y = |top: f32| top + SECTION_PAD - scroll;
        widgets::section_title(buffer, text, "My Skills", cx, title_y(self.skills_top));
        let style = PanelStyle::default();
        for i in widgets::paint_order(&self.skills) {
            let card = &self.skills[i];
            card.paint(buffer, scroll, &style);
            let skill = &self.portfolio.skills[i];
            let b = card.on_screen(scroll).inset(CARD_PAD);
            let (mid, name) = (b.center().0, &skill.name);
            text.draw_centered(buffer, name, mid, b.top + 16.0, TextSize::Title, TEXT, 1.0);
            let details_y = b.top + 24.0 + text.line_height(TextSize::Title);
            centered_lines(buffer, text, &skill.details, mid, details_y, b.width, MUTED);
        }

        if let Some(first) = self.projects.first() {
            let top = first.bounds.top - widgets::title_height(text) - TITLE_GAP - SECTION_PAD;
            widgets::section_title(buffer, text, "My Projects", cx, title_y(top));
        }
        for i in widgets::paint_order(&self.projects) {
            let hovered = self.hovered_project.get() == Some(i);
            self.draw_project(buffer, text, i, hovered, scroll, &style);
        }
        if let Some(button) = &self.more_projects {
            button.draw(buffer, text, scroll, BLUE);
        }

        let (_, width) = layout::content_column(vw, MAX_WIDTH, PADDING);
        let apps_title = title_y(self.apps_top);
        let title_h = widgets::section_title(buffer, text, "My iOS Applications", cx, apps_title);
        let intro_width = width.min(768.0);
        centered_lines_sized(
            buffer,
            text,
            APPS_INTRO,
            cx,
            apps_title + title_h + TITLE_GAP,
            intro_width,
            TextSize::Title,
            MUTED,
        );
        let app_style = PanelStyle {
            top: Rgb::new(0x18, 0x18, 0x1b),
            bottom: Rgb::new(0x18, 0x18, 0x1b),
            alpha: 0.5,
            border: Some(ZINC),
        };
        for i in widgets::paint_order(&self.apps) {
            self.draw_app(buffer, ui, i, scroll, &app_style);
        }

        if let Some(first) = self.contact.first() {
            let heading = widgets::title_height(text);
            let intro = text.line_height(TextSize::Body);
            let top = first.bounds.top - scroll - 48.0 - intro - heading;
            widgets::section_title(buffer, text, "Let's Connect", cx, top);
            let y = top + heading + 24.0;
            text.draw_centered(buffer, CONTACT_INTRO, cx, y, TextSize::Body, MUTED, 1.0);
            let mut bottom = first.bounds.bottom();
            for button in &self.contact {
                button.draw(buffer, text, scroll, BLUE);
                bottom = bottom.max(button.bounds.bottom());
            }
            let location = &self.portfolio.location;
            let location_y = bottom - scroll + 48.0;
            text.draw_centered(buffer, location, cx, location_y, TextSize::Small, DIM, 1.0);
        }

        if let Some(overlay) = &self.overlay {
            self.draw_overlay(buffer, text, overlay, vw, vh);
        }
    }

    fn draw_hero(&self, buffer: &mut PixelBuffer, text: &TextPainter, scroll: f32) {
        let (vw, vh) = (self.viewport.width as f32, self.viewport.height as f32);
        if scroll >= vh {
            return;
        }
        for row in 0..vh as u32 {
            let t = row as f32 / vh;
            let alpha = 0.5 * (1.0 - (2.0 * t - 1.0).abs());
            buffer.fill_rect(0.0, row as f32 - scroll, vw, 1.0, Rgb::BLACK, alpha);
        }
        for row in 0..FADE as u32 {
            let alpha = row as f32 / FADE;
            let y = vh - FADE + row as f32 - scroll;
            buffer.fill_rect(0.0, y, vw, 1.0, Rgb::BLACK, alpha);
        }

        let phase = 0.5 + 0.5 * (self.clock * TAU / self.hero.shimmer_period()).sin();
        let shimmer = BLUE.lerp(PURPLE, phase).lerp(TEXT, 0.3);
        let (cx, cy) = (vw / 2.0, vh / 2.0 - scroll);
        let owner = &self.portfolio.owner;
        text.draw_centered(
            buffer,
            &owner.name,
            cx,
            cy - 160.0,
            TextSize::Display,
            shimmer,
            1.0,
        );
        text.draw_centered(
            buffer,
            &owner.tagline,
            cx,
            cy - 40.0,
            TextSize::Title,
            MUTED,
            1.0,
        );

        self.cta.draw(buffer, text, scroll, BLUE);
        if self.cta.is_hovered() {
            let b = self.cta.bounds.offset(0.0, -scroll);
            let tip = Bounds::new(b.right() + 16.0, b.center().1 - 16.0, 120.0, 32.0);
            widgets::fill(buffer, tip, Rgb::new(0x1f, 0x29, 0x37), 1.0);
            let (x, y) = (tip.left + 12.0, tip.top + 6.0);
            text.draw(buffer, "I'll respond!", x, y, TextSize::Small, TEXT, 1.0);
        }

        let pause = self.pause.offset(0.0, -scroll);
        let (px, py) = pause.center();
        buffer.fill_circle(px, py, 24.0, TEXT, 1.0);
        buffer.fill_circle(px, py, 22.0, Rgb::BLACK, 0.85);
        if self.hero.is_paused() {
            buffer.line(px - 5.0, py - 8.0, px - 5.0, py + 8.0, 2.0, TEXT, 1.0);
            buffer.line(px - 5.0, py - 8.0, px + 8.0, py, 2.0, TEXT, 1.0);
            buffer.line(px - 5.0, py + 8.0, px + 8.0, py, 2.0, TEXT, 1.0);
        } else {
            buffer.fill_rect(px - 7.0, py - 8.0, 4.0, 16.0, TEXT, 1.0);
            buffer.fill_rect(px + 3.0, py - 8.0, 4.0, 16.0, TEXT, 1.0);
        }

        let bounce = 5.0 - 5.0 * (self.clock * TAU / 1.5).cos();
        let (ax, ay) = self.chevron.offset(0.0, bounce - scroll).center();
        buffer.line(ax - 12.0, ay - 6.0, ax, ay + 6.0, 3.0, TEXT, 1.0);
        buffer.line(ax, ay + 6.0, ax + 12.0, ay - 6.0, 3.0, TEXT, 1.0);

        if self.viewport.width < MOBILE_WIDTH {
            let hint = "Psst...View this page on a computer, it's way cooler.";
            let y = vh - 120.0 - scroll;
            centered_lines_sized(buffer, text, hint, cx, y, vw - 32.0, TextSize::Small, DIM);
        }
    }

    fn draw_project(
        &self,
        buffer: &mut PixelBuffer,
        text: &TextPainter,
        i: usize,
        hovered: bool,
        scroll: f32,
        style: &PanelStyle,
    ) {
        let card = &self.projects[i];
        let project: &Project = &self.portfolio.projects[i];
        card.paint(buffer, scroll, style);
        let b = card.on_screen(scroll).inset(CARD_PAD);
        let color = if hovered { BLUE } else { TEXT };
        let title = &project.title;
        text.draw(buffer, title, b.left, b.top, TextSize::Title, color, 1.0);
        let y = b.top + text.line_height(TextSize::Title) + 16.0;
        text.draw_wrapped(
            buffer,
            &project.description,
            b.left,
            y,
            b.width,
            TextSize::Small,
            MUTED,
            1.0,
        );

        let techs = &project.technologies;
        let date_h = text.line_height(TextSize::Small);
        let chips_h = widgets::chips(None, text, techs, 0.0, 0.0, b.width, true);
        let chips_y = b.bottom() - date_h - 8.0 - chips_h;
        widgets::chips(Some(buffer), text, techs, b.left, chips_y, b.width, true);
        let (date, date_y) = (&project.date, b.bottom() - date_h);
        text.draw(buffer, date, b.left, date_y, TextSize::Small, DIM, 1.0);
    }

    fn draw_app(
        &self,
        buffer: &mut PixelBuffer,
        ui: &mut Ui,
        i: usize,
        scroll: f32,
        style: &PanelStyle,
    ) {
        let text = ui.text;
        let card = &self.apps[i];
        let app = &self.portfolio.apps[i];
        card.paint(buffer, scroll, style);
        let b = card.on_screen(scroll).inset(CARD_PAD);

        let (image, body) = if self.app_columns > 1 {
            let half = (b.width - 32.0) / 2.0;
            let image = Bounds::new(b.left, b.top, half, b.height);
            let body = Bounds::new(b.left + half + 32.0, b.top, half, b.height);
            (image, body)
        } else {
            let image = Bounds::new(b.left, b.top, b.width, 240.0);
            let body = Bounds::new(b.left, image.bottom() + 24.0, b.width, b.height - 264.0);
            (image, body)
        };
        match ui.images.get(&app.image_url) {
            Some(picture) => crate::paint_picture(picture, image, 1.0, buffer),
            None => widgets::fill(buffer, image, ZINC, 0.6),
        }

        let (x, width) = (body.left, body.width);
        let mut y = body.top;
        text.draw(buffer, &app.title, x, y, TextSize::Heading, TEXT, 1.0);
        y += text.line_height(TextSize::Heading) + 16.0;
        let description = &app.description;
        y += text.draw_wrapped(buffer, description, x, y, width, TextSize::Body, MUTED, 1.0) + 16.0;
        y += widgets::chips(Some(buffer), text, &app.technologies, x, y, width, false) + 16.0;
        let more = if card.panel.is_hovered() {
            "Learn More  >>"
        } else {
            "Learn More  >"
        };
        text.draw(buffer, more, x, y, TextSize::Body, BLUE, 1.0);
    }

    fn draw_overlay(
        &self,
        buffer: &mut PixelBuffer,
        text: &TextPainter,
        overlay: &Overlay,
        vw: f32,
        vh: f32,
    ) {
        let project = &self.portfolio.projects[overlay.index];
        buffer.fill_rect(0.0, 0.0, vw, vh, Rgb::BLACK, 0.8);
        let b = overlay.card;
        let (top, bottom) = (Rgb::new(0x1f, 0x29, 0x37), Rgb::new(0x11, 0x18, 0x27));
        buffer.fill_gradient(b.left, b.top, b.width, b.height, top, bottom, 1.0);
        widgets::outline(buffer, b, Rgb::new(0x3f, 0x3f, 0x46), 1.0);

        let (cx, cy) = overlay.close.center();
        buffer.line(cx - 8.0, cy - 8.0, cx + 8.0, cy + 8.0, 2.0, MUTED, 1.0);
        buffer.line(cx - 8.0, cy + 8.0, cx + 8.0, cy - 8.0, 2.0, MUTED, 1.0);

        let inner = b.width - 64.0;
        let x = b.left + 32.0;
        let mut y = b.top + 32.0;
        text.draw(buffer, &project.title, x, y, TextSize::Heading, TEXT, 1.0);
        y += text.line_height(TextSize::Heading);
        text.draw(buffer, &project.date, x, y, TextSize::Small, DIM, 1.0);
        y += text.line_height(TextSize::Small) + 16.0;
        let description = &project.long_description;
        let used = text.draw_wrapped(buffer, description, x, y, inner, TextSize::Body, PROSE, 1.0);
        y += used + 24.0;
        let label = "Technologies used:";
        text.draw(buffer, label, x, y, TextSize::Title, TEXT, 1.0);
        y += text.line_height(TextSize::Title);
        widgets::chips(Some(buffer), text, &project.technologies, x, y, inner, true);

        overlay.live.draw(buffer, text, 0.0, BLUE);
        if let Some(github) = &overlay.github {
            github.draw(buffer, text, 0.0, PURPLE);
        }
    }
}

fn app_card_height(text: &TextPainter, app: &MobileApp, width: f32, columns: usize) -> f32 {
    let inner = width - CARD_PAD * 2.0;
    let body_width = if columns > 1 {
        (inner - 32.0) / 2.0
    } else {
        inner
    };
    let body = text.line_height(TextSize::Heading)
        + 16.0
        + text.paragraph_height(&app.description, TextSize::Body, body_width)
        + 16.0
        + widgets::chips(None, text, &app.technologies, 0.0, 0.0, body_width, false)
        + 16.0
        + text.line_height(TextSize::Body);
    let content = if columns > 1 {
        body.max(360.0)
    } else {
        240.0 + 24.0 + body
    };
    content + CARD_PAD * 2.0
}

fn centered_lines(
    buffer: &mut PixelBuffer,
    text: &TextPainter,
    s: &str,
    cx: f32,
    y: f32,
    width: f32,
    color: Rgb,
) {
    centered_lines_sized(buffer, text, s, cx, y, width, TextSize::Small, color);
}

#[allow(clippy::too_many_arguments)]
fn centered_lines_sized(
    buffer: &mut PixelBuffer,
    text: &TextPainter,
    s: &str,
    cx: f32,
    y: f32,
    width: f32,
    size: TextSize,
    color: Rgb,
) {
    let line_height = text.line_height(size);
    for (i, line) in text.wrap(s, size, width).iter().enumerate() {
        let line_y = y + i as f32 * line_height;
        text.draw_centered(buffer, line, cx, line_y, size, color, 1.0);
    }
}
