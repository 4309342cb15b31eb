use std::fmt;

use serde::{Deserialize, Serialize};

/// Depth of the `perspective()` applied in front of every panel.
pub const PERSPECTIVE: f32 = 1000.0;
/// Pixels of pointer offset per degree of tilt at strength 1.
pub const TILT_DIVISOR: f32 = 20.0;
/// Stacking order of a hovered panel, or one above its baseline if higher.
pub const HOVER_Z_INDEX: i32 = 10;
/// Seconds for the rendered shine to fade in or out.
pub const SHINE_FADE_SECS: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShineConfig {
    /// Falloff radius, percent of the farthest-corner distance.
    pub radius: f32,
    /// Peak white alpha at the pointer.
    pub intensity: f32,
}

impl Default for ShineConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            intensity: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    pub inspect_strength: f32,
    pub scale_strength: f32,
    pub z_index: i32,
    pub shine: ShineConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            inspect_strength: 1.0,
            scale_strength: 1.05,
            z_index: 1,
            shine: ShineConfig::default(),
        }
    }
}

impl PanelConfig {
    pub fn inspect_strength(mut self, strength: f32) -> Self {
        self.inspect_strength = strength;
        self
    }

    pub fn scale_strength(mut self, scale: f32) -> Self {
        self.scale_strength = scale;
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn shine(mut self, radius: f32, intensity: f32) -> Self {
        self.shine = ShineConfig { radius, intensity };
        self
    }
}

/// Axis-aligned rectangle in window coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    pub fn inset(&self, amount: f32) -> Self {
        Self {
            left: self.left + amount,
            top: self.top + amount,
            width: (self.width - amount * 2.0).max(0.0),
            height: (self.height - amount * 2.0).max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    /// Degrees.
    pub rotate_x: f32,
    /// Degrees.
    pub rotate_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shine {
    /// Percent of the panel width.
    pub x: f32,
    /// Percent of the panel height.
    pub y: f32,
    pub opacity: f32,
}

impl Default for Shine {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            opacity: 0.0,
        }
    }
}

/// `perspective() rotateX() rotateY() scale()` about the panel centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelTransform {
    pub perspective: f32,
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
}

impl PanelTransform {
    pub const IDENTITY: PanelTransform = PanelTransform {
        perspective: PERSPECTIVE,
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// Maps a point given relative to the panel centre (y down) to its
    /// projected offset from the centre.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let (x, y, z) = (x * self.scale, y * self.scale, 0.0_f32);

        let (sin_y, cos_y) = self.rotate_y.to_radians().sin_cos();
        let (x, z) = (x * cos_y + z * sin_y, -x * sin_y + z * cos_y);

        let (sin_x, cos_x) = self.rotate_x.to_radians().sin_cos();
        let (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);

        let w = (self.perspective - z).max(f32::EPSILON);
        let k = self.perspective / w;
        (x * k, y * k)
    }

    pub fn css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale({})",
            self.perspective, self.rotate_x, self.rotate_y, self.scale
        )
    }
}

type Callback = Box<dyn FnMut()>;

/// Tilt-and-shine surface that reacts to the pointer.
///
/// Angles come purely from the latest pointer position relative to the
/// bounds passed with that event, so moving or resizing the panel between
/// events needs no bookkeeping.
pub struct Panel {
    config: PanelConfig,
    tilt: Tilt,
    shine: Shine,
    hovered: bool,
    rendered_shine: f32,
    on_mouse_enter: Option<Callback>,
    on_mouse_leave: Option<Callback>,
    on_click: Option<Callback>,
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("config", &self.config)
            .field("tilt", &self.tilt)
            .field("shine", &self.shine)
            .field("hovered", &self.hovered)
            .field("rendered_shine", &self.rendered_shine)
            .finish_non_exhaustive()
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

impl Panel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            tilt: Tilt::default(),
            shine: Shine::default(),
            hovered: false,
            rendered_shine: 0.0,
            on_mouse_enter: None,
            on_mouse_leave: None,
            on_click: None,
        }
    }

    pub fn on_mouse_enter(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_mouse_enter = Some(Box::new(f));
        self
    }

    pub fn on_mouse_leave(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_mouse_leave = Some(Box::new(f));
        self
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn tilt(&self) -> Tilt {
        self.tilt
    }

    pub fn shine(&self) -> Shine {
        self.shine
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Shine opacity as currently drawn, trailing the state by the fade.
    pub fn rendered_shine(&self) -> f32 {
        self.rendered_shine
    }

    pub fn pointer_moved(&mut self, px: f32, py: f32, bounds: Bounds) {
        let (cx, cy) = bounds.center();
        let k = self.config.inspect_strength;
        self.tilt = Tilt {
            rotate_x: (py - cy) / TILT_DIVISOR * k,
            rotate_y: (cx - px) / TILT_DIVISOR * k,
        };
        if bounds.width > 0.0 && bounds.height > 0.0 {
            self.shine = Shine {
                x: (px - bounds.left) / bounds.width * 100.0,
                y: (py - bounds.top) / bounds.height * 100.0,
                opacity: 1.0,
            };
        }
    }

    pub fn pointer_entered(&mut self) {
        self.hovered = true;
        if let Some(f) = self.on_mouse_enter.as_mut() {
            f();
        }
    }

    pub fn pointer_left(&mut self) {
        self.hovered = false;
        self.tilt = Tilt::default();
        self.shine.opacity = 0.0;
        if let Some(f) = self.on_mouse_leave.as_mut() {
            f();
        }
    }

    pub fn clicked(&mut self) {
        if let Some(f) = self.on_click.as_mut() {
            f();
        }
    }

    /// Turns a raw pointer position into enter / move / leave transitions.
    /// Returns whether the pointer is over the panel.
    pub fn track(&mut self, px: f32, py: f32, bounds: Bounds) -> bool {
        let inside = bounds.contains(px, py);
        match (inside, self.hovered) {
            (true, false) => {
                self.pointer_entered();
                self.pointer_moved(px, py, bounds);
            }
            (true, true) => self.pointer_moved(px, py, bounds),
            (false, true) => self.pointer_left(),
            (false, false) => {}
        }
        inside
    }

    /// Advances the shine fade by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let step = dt / SHINE_FADE_SECS;
        let target = self.shine.opacity;
        if self.rendered_shine < target {
            self.rendered_shine = (self.rendered_shine + step).min(target);
        } else {
            self.rendered_shine = (self.rendered_shine - step).max(target);
        }
    }

    pub fn transform(&self) -> PanelTransform {
        PanelTransform {
            perspective: PERSPECTIVE,
            rotate_x: self.tilt.rotate_x,
            rotate_y: self.tilt.rotate_y,
            scale: if self.hovered {
                self.config.scale_strength
            } else {
                1.0
            },
        }
    }

    pub fn z_index(&self) -> i32 {
        if self.hovered {
            self.config.z_index.max(HOVER_Z_INDEX - 1).saturating_add(1)
        } else {
            self.config.z_index
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    const BOX: Bounds = Bounds {
        left: 0.0,
        top: 0.0,
        width: 200.0,
        height: 200.0,
    };

    #[test]
    fn right_edge_leans_toward_pointer() {
        let mut panel = Panel::default();
        panel.pointer_entered();
        panel.pointer_moved(200.0, 100.0, BOX);
        assert_eq!(panel.tilt().rotate_x, 0.0);
        assert!(panel.tilt().rotate_y < 0.0);
        assert_eq!(panel.tilt().rotate_y, -5.0);

        panel.pointer_left();
        assert_eq!(panel.tilt(), Tilt::default());
        assert_eq!(panel.shine().opacity, 0.0);
    }

    #[test]
    fn tilt_signs_follow_pointer_quadrant() {
        let mut panel = Panel::default();
        for (px, py) in [
            (20.0, 30.0),
            (180.0, 30.0),
            (20.0, 170.0),
            (180.0, 170.0),
            (150.0, 60.0),
        ] {
            panel.pointer_moved(px, py, BOX);
            let tilt = panel.tilt();
            assert_eq!(tilt.rotate_x < 0.0, py < 100.0, "x leans with pointer");
            assert_eq!(tilt.rotate_y < 0.0, px > 100.0, "y leans with pointer");
        }
    }

    #[test]
    fn tilt_scales_linearly_with_strength() {
        let mut base = Panel::default();
        let mut strong = Panel::new(PanelConfig::default().inspect_strength(2.5));
        base.pointer_moved(37.0, 151.0, BOX);
        strong.pointer_moved(37.0, 151.0, BOX);
        let (strong, base) = (strong.tilt(), base.tilt());
        assert!((strong.rotate_x - base.rotate_x * 2.5).abs() < 1e-4);
        assert!((strong.rotate_y - base.rotate_y * 2.5).abs() < 1e-4);
    }

    #[test]
    fn leave_always_resets_to_neutral() {
        for (px, py) in [(0.0, 0.0), (200.0, 200.0), (13.0, 187.0)] {
            let mut panel = Panel::new(PanelConfig::default().inspect_strength(3.0));
            panel.track(px, py, BOX);
            panel.pointer_left();
            assert_eq!(panel.tilt(), Tilt::default());
            assert_eq!(panel.shine().opacity, 0.0);
            assert!(!panel.is_hovered());
            assert_eq!(panel.transform().scale, 1.0);
        }
    }

    #[test]
    fn shine_tracks_pointer_in_percent() {
        let mut panel = Panel::default();
        panel.pointer_moved(150.0, 50.0, Bounds::new(100.0, 0.0, 100.0, 200.0));
        let shine = panel.shine();
        assert_eq!((shine.x, shine.y, shine.opacity), (50.0, 25.0, 1.0));
    }

    #[test]
    fn shine_fades_over_transition() {
        let mut panel = Panel::default();
        panel.track(50.0, 50.0, BOX);
        panel.tick(SHINE_FADE_SECS / 2.0);
        assert!((panel.rendered_shine() - 0.5).abs() < 1e-5);
        panel.tick(SHINE_FADE_SECS);
        assert_eq!(panel.rendered_shine(), 1.0);
        panel.track(500.0, 500.0, BOX);
        assert_eq!(panel.shine().opacity, 0.0);
        assert_eq!(panel.rendered_shine(), 1.0);
        panel.tick(SHINE_FADE_SECS);
        assert_eq!(panel.rendered_shine(), 0.0);
    }

    #[test]
    fn callbacks_fire_on_enter_leave_click() {
        let entered = Rc::new(Cell::new(0));
        let left = Rc::new(Cell::new(0));
        let clicked = Rc::new(Cell::new(0));
        let (e, l, c) = (entered.clone(), left.clone(), clicked.clone());
        let mut panel = Panel::default()
            .on_mouse_enter(move || e.set(e.get() + 1))
            .on_mouse_leave(move || l.set(l.get() + 1))
            .on_click(move || c.set(c.get() + 1));

        panel.track(10.0, 10.0, BOX);
        panel.track(20.0, 20.0, BOX);
        panel.clicked();
        panel.track(300.0, 20.0, BOX);
        panel.track(310.0, 20.0, BOX);

        assert_eq!((entered.get(), left.get(), clicked.get()), (1, 1, 1));
    }

    #[test]
    fn hovered_panel_is_scaled_and_raised() {
        let mut panel = Panel::new(PanelConfig::default().z_index(3).scale_strength(1.01));
        assert_eq!(panel.z_index(), 3);
        panel.pointer_entered();
        assert_eq!(panel.z_index(), HOVER_Z_INDEX);
        assert_eq!(panel.transform().scale, 1.01);

    }

    #[test]
    fn hovered_panel_rises_above_high_baseline_sibling() {
        let mut hovered = Panel::new(PanelConfig::default().z_index(50));
        let sibling = Panel::new(PanelConfig::default().z_index(50));
        hovered.pointer_entered();
        assert!(hovered.z_index() > sibling.z_index());
        assert_eq!(hovered.z_index(), 51);
    }

    #[test]
    fn identity_transform_keeps_points() {
        let (x, y) = PanelTransform::IDENTITY.apply(-100.0, 40.0);
        assert!((x + 100.0).abs() < 1e-4 && (y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn negative_rotate_y_brings_right_edge_forward() {
        let t = PanelTransform {
            rotate_y: -10.0,
            ..PanelTransform::IDENTITY
        };
        let (right, _) = t.apply(100.0, 0.0);
        let (left, _) = t.apply(-100.0, 0.0);
        assert!(right > -left);
    }

    #[test]
    fn css_string() {
        let t = PanelTransform {
            rotate_x: 2.5,
            rotate_y: -5.0,
            scale: 1.05,
            ..PanelTransform::IDENTITY
        };
        assert_eq!(
            t.css(),
            "perspective(1000px) rotateX(2.5deg) rotateY(-5deg) scale(1.05)"
        );
    }
}
