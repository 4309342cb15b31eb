/// How long a click keeps hyperdrive engaged before the link opens.
pub const CLICK_LATCH_SECS: f32 = 1.0;
/// Shimmer period of the title, in seconds.
pub const SHIMMER_CRUISE_SECS: f32 = 8.0;
pub const SHIMMER_HYPERDRIVE_SECS: f32 = 2.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeroAction {
    OpenLink(String),
    ScrollToSkills,
}

/// Landing-section controls that drive the starfield.
#[derive(Clone, Debug)]
pub struct HeroState {
    link: String,
    cta_hovered: bool,
    latch: Option<f32>,
    paused: bool,
}

impl HeroState {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            cta_hovered: false,
            latch: None,
            paused: false,
        }
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn set_cta_hovered(&mut self, hovered: bool) {
        self.cta_hovered = hovered;
    }

    /// Starts the one-second latch. Repeated clicks while latched are ignored.
    pub fn cta_clicked(&mut self) {
        if self.latch.is_none() {
            self.latch = Some(CLICK_LATCH_SECS);
        }
    }

    pub fn is_clicked(&self) -> bool {
        self.latch.is_some()
    }

    pub fn hyperdrive(&self) -> bool {
        self.cta_hovered || self.is_clicked()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        let state = if self.paused { "paused" } else { "resumed" };
        log::info!("animations {state}");
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause_label(&self) -> &'static str {
        if self.paused {
            "Resume animations"
        } else {
            "Pause animations"
        }
    }

    pub fn shimmer_period(&self) -> f32 {
        if self.hyperdrive() {
            SHIMMER_HYPERDRIVE_SECS
        } else {
            SHIMMER_CRUISE_SECS
        }
    }

    pub fn chevron_clicked(&self) -> HeroAction {
        HeroAction::ScrollToSkills
    }

    /// Advances the click latch; yields the link once it runs out.
    pub fn tick(&mut self, dt: f32) -> Option<HeroAction> {
        let remaining = self.latch? - dt;
        if remaining > 0.0 {
            self.latch = Some(remaining);
            return None;
        }
        self.latch = None;
        Some(HeroAction::OpenLink(self.link.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_engages_hyperdrive() {
        let mut hero = HeroState::new("mailto:a@b.c");
        assert!(!hero.hyperdrive());
        hero.set_cta_hovered(true);
        assert!(hero.hyperdrive());
        assert_eq!(hero.shimmer_period(), SHIMMER_HYPERDRIVE_SECS);
        hero.set_cta_hovered(false);
        assert!(!hero.hyperdrive());
    }

    #[test]
    fn click_latches_for_a_second_then_opens() {
        let mut hero = HeroState::new("mailto:a@b.c");
        hero.cta_clicked();
        hero.set_cta_hovered(false);
        assert!(hero.hyperdrive());
        assert_eq!(hero.tick(0.5), None);
        hero.cta_clicked();
        assert!(hero.hyperdrive());
        let open = HeroAction::OpenLink("mailto:a@b.c".into());
        assert_eq!(hero.tick(0.6), Some(open));
        assert!(!hero.hyperdrive());
        assert_eq!(hero.tick(1.0), None);
    }

    #[test]
    fn pause_toggles() {
        let mut hero = HeroState::new("x");
        assert_eq!(hero.pause_label(), "Pause animations");
        assert!(hero.toggle_pause());
        assert_eq!(hero.pause_label(), "Resume animations");
        assert!(!hero.toggle_pause());
    }

    #[test]
    fn chevron_scrolls_to_skills() {
        let hero = HeroState::new("x");
        assert_eq!(hero.chevron_clicked(), HeroAction::ScrollToSkills);
    }
}
