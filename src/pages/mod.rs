mod app;
mod home;
mod policy;
mod widgets;

use std::rc::Rc;

use starfolio_core::content::Portfolio;
use starfolio_core::layout::Scroller;
use starfolio_core::route::{Resolved, Route};
use starfolio_core::{BackgroundConfig, PixelBuffer, StarfieldBackground, Viewport};

use self::app::AppPage;
use self::home::HomePage;
use self::policy::PolicyPage;
use self::widgets::{Button, BLUE, TEXT};
use crate::images::ImageCache;
use crate::text::{TextPainter, TextSize};

/// What a page asks the site to do after an input.
#[derive(Clone, Debug, PartialEq)]
pub enum Nav {
    Go(Route),
    Back,
    Open(String),
    Scroll(f32),
}

pub struct Ui<'a> {
    pub text: &'a TextPainter,
    pub images: &'a mut ImageCache,
}

struct MissingPage {
    message: String,
    back: Button,
}

enum ActivePage {
    Home(Box<HomePage>),
    App(AppPage),
    Policy(PolicyPage),
    Missing(MissingPage),
}

/// The page currently on screen and the route that produced it.
pub struct Site {
    portfolio: Rc<Portfolio>,
    background: BackgroundConfig,
    viewport: Viewport,
    route: Route,
    page: ActivePage,
    scroller: Scroller,
    pointer: (f32, f32),
    reveal_apps: bool,
}

impl Site {
    pub fn new(
        portfolio: Portfolio,
        background: BackgroundConfig,
        route: Route,
        viewport: Viewport,
    ) -> Self {
        let portfolio = Rc::new(portfolio);
        let page = build_page(&portfolio, &background, viewport, &route);
        Self {
            portfolio,
            background,
            viewport,
            route,
            page,
            scroller: Scroller::new(),
            pointer: (0.0, 0.0),
            reveal_apps: false,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn scroll(&self) -> f32 {
        self.scroller.offset()
    }

    /// Replaces the page. Leaving home drops its background.
    pub fn navigate(&mut self, route: Route) {
        log::info!("{} -> {}", self.route, route);
        self.reveal_apps = matches!(self.route, Route::AppDetails { .. }) && route == Route::Home;
        self.page = build_page(&self.portfolio, &self.background, self.viewport, &route);
        self.route = route;
        self.scroller.reset();
    }

    pub fn back(&mut self) -> bool {
        let parent = match (&self.page, self.route.parent()) {
            (ActivePage::Missing(_), _) => Some(Route::Home),
            (_, parent) => parent,
        };
        match parent {
            Some(route) if route != self.route => {
                self.navigate(route);
                true
            }
            _ => false,
        }
    }

    /// Acts on a page request; links to open are handed back to the caller.
    pub fn apply(&mut self, nav: Nav) -> Option<String> {
        match nav {
            Nav::Go(route) => self.navigate(route),
            Nav::Back => {
                self.back();
            }
            Nav::Open(link) => return Some(link),
            Nav::Scroll(y) => self.scroller.scroll_to(y),
        }
        None
    }

    pub fn background_mut(&mut self) -> Option<&mut StarfieldBackground> {
        match &mut self.page {
            ActivePage::Home(home) => Some(home.background_mut()),
            _ => None,
        }
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        match &mut self.page {
            ActivePage::Home(home) => home.resized(viewport),
            ActivePage::App(app) => app.resized(viewport),
            ActivePage::Policy(policy) => policy.resized(viewport),
            ActivePage::Missing(_) => {}
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
        let scroll = self.scroller.offset();
        match &mut self.page {
            ActivePage::Home(home) => home.pointer_moved(x, y, scroll),
            ActivePage::App(app) => app.pointer_moved(x, y, scroll),
            ActivePage::Policy(policy) => policy.pointer_moved(x, y, scroll),
            ActivePage::Missing(missing) => {
                missing.back.hover(x, y);
            }
        }
    }

    pub fn clicked(&mut self, x: f32, y: f32) -> Option<String> {
        let scroll = self.scroller.offset();
        let nav = match &mut self.page {
            ActivePage::Home(home) => home.clicked(x, y, scroll),
            ActivePage::App(app) => app.clicked(x, y, scroll),
            ActivePage::Policy(policy) => policy.clicked(x, y, scroll),
            ActivePage::Missing(missing) => {
                missing.back.contains(x, y).then_some(Nav::Go(Route::Home))
            }
        }?;
        self.apply(nav)
    }

    pub fn scrolled(&mut self, delta: f32) {
        self.scroller.scroll_by(delta);
        let (x, y) = self.pointer;
        self.pointer_moved(x, y);
    }

    pub fn toggle_pause(&mut self) {
        if let ActivePage::Home(home) = &mut self.page {
            home.toggle_pause();
        }
    }

    /// Returns whether the key was used to dismiss something.
    pub fn escape(&mut self) -> bool {
        match &mut self.page {
            ActivePage::Home(home) => home.escape(),
            _ => false,
        }
    }

    pub fn step_carousel(&mut self, forward: bool) {
        if let ActivePage::App(app) = &mut self.page {
            if forward {
                app.next_screenshot();
            } else {
                app.previous_screenshot();
            }
        }
    }

    pub fn tick(&mut self, dt: f32) -> Option<String> {
        self.scroller.tick();
        let nav = match &mut self.page {
            ActivePage::Home(home) => home.tick(dt),
            ActivePage::App(app) => {
                app.tick(dt);
                None
            }
            _ => None,
        }?;
        self.apply(nav)
    }

    pub fn draw(&mut self, buffer: &mut PixelBuffer, ui: &mut Ui) {
        let scroll = self.scroller.offset();
        let (vw, vh) = (self.viewport.width as f32, self.viewport.height as f32);
        let height = match &mut self.page {
            ActivePage::Home(home) => {
                home.draw(buffer, ui, scroll);
                home.height()
            }
            ActivePage::App(app) => {
                app.draw(buffer, ui, scroll);
                app.height()
            }
            ActivePage::Policy(policy) => {
                policy.draw(buffer, ui, scroll);
                policy.height()
            }
            ActivePage::Missing(missing) => {
                let (cx, cy) = (vw / 2.0, vh / 2.0);
                let message = &missing.message;
                ui.text.draw_centered(buffer, message, cx, cy - 48.0, TextSize::Title, TEXT, 1.0);
                missing.back.place_centered(ui.text, cx, cy);
                missing.back.draw(buffer, ui.text, 0.0, BLUE);
                vh
            }
        };
        self.scroller.set_extent(height, vh);

        if self.reveal_apps {
            if let ActivePage::Home(home) = &self.page {
                self.scroller.scroll_to(home.apps_top());
            }
            self.reveal_apps = false;
        }
    }
}

fn build_page(
    portfolio: &Rc<Portfolio>,
    background: &BackgroundConfig,
    viewport: Viewport,
    route: &Route,
) -> ActivePage {
    match route.resolve(portfolio) {
        Ok(Resolved::Home) => {
            let home = HomePage::new(portfolio.clone(), background, viewport);
            ActivePage::Home(Box::new(home))
        }
        Ok(Resolved::App(app)) => ActivePage::App(AppPage::new(app.clone(), viewport)),
        Ok(Resolved::PrivacyPolicy { app, markdown }) => {
            ActivePage::Policy(PolicyPage::new(&app.title, markdown, viewport))
        }
        Err(missing) => {
            log::warn!("{route}: {missing}");
            ActivePage::Missing(MissingPage {
                message: missing.to_string(),
                back: Button::new("Back to Portfolio", TextSize::Body),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfolio_core::FieldConfig;

    fn site(path: &str) -> Site {
        let background = BackgroundConfig {
            field: FieldConfig {
                star_count: 16,
                seed: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        let portfolio = Portfolio::builtin().unwrap();
        let viewport = Viewport::new(800, 600);
        Site::new(portfolio, background, Route::parse(path), viewport)
    }

    #[test]
    fn background_lives_only_on_home() {
        let mut site = site("/");
        assert!(site.background_mut().is_some());
        site.navigate(Route::parse("/ios-apps/car-care-log"));
        assert!(site.background_mut().is_none());
        assert!(site.back());
        assert_eq!(site.route(), &Route::Home);
        assert!(site.background_mut().is_some());
    }

    #[test]
    fn policy_backs_out_to_its_app() {
        let mut site = site("/ios-apps/car-care-log/privacy-policy");
        assert!(matches!(site.page, ActivePage::Policy(_)));
        site.apply(Nav::Back);
        assert_eq!(site.route(), &Route::parse("/ios-apps/car-care-log"));
        assert!(site.back());
        assert!(!site.back());
    }

    #[test]
    fn unknown_app_shows_not_found() {
        let mut site = site("/ios-apps/ghost");
        match &site.page {
            ActivePage::Missing(missing) => assert_eq!(missing.message, "App not found"),
            _ => panic!("expected the not-found page"),
        }
        assert!(site.back());
        assert_eq!(site.route(), &Route::Home);
    }

    #[test]
    fn links_are_handed_back() {
        let mut site = site("/");
        let link = "mailto:a@b.c".to_string();
        assert_eq!(site.apply(Nav::Open(link.clone())), Some(link));
        assert_eq!(site.apply(Nav::Scroll(100.0)), None);
    }
}
