use crate::field::Viewport;

pub const DEFAULT_AMPLITUDE: f32 = 40.0;

/// Pointer-driven offset of the backdrop layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    offset: (f32, f32),
    amplitude: f32,
    paused: bool,
}

impl Default for Parallax {
    fn default() -> Self {
        Self::new(DEFAULT_AMPLITUDE)
    }
}

impl Parallax {
    pub fn new(amplitude: f32) -> Self {
        Self {
            offset: (0.0, 0.0),
            amplitude,
            paused: false,
        }
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, viewport: Viewport) {
        if self.paused || viewport.width == 0 || viewport.height == 0 {
            return;
        }
        self.offset = (
            x / viewport.width as f32 * self.amplitude,
            y / viewport.height as f32 * self.amplitude,
        );
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Translation applied to the backdrop; none while paused.
    pub fn translation(&self) -> (f32, f32) {
        if self.paused {
            (0.0, 0.0)
        } else {
            self.offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800,
        height: 400,
    };

    #[test]
    fn offset_follows_pointer_fraction() {
        let mut parallax = Parallax::default();
        parallax.pointer_moved(400.0, 100.0, VIEW);
        assert_eq!(parallax.translation(), (20.0, 10.0));
        parallax.pointer_moved(800.0, 400.0, VIEW);
        assert_eq!(parallax.translation(), (40.0, 40.0));
    }

    #[test]
    fn paused_layer_is_untranslated_and_frozen() {
        let mut parallax = Parallax::default();
        parallax.pointer_moved(400.0, 200.0, VIEW);
        parallax.set_paused(true);
        assert_eq!(parallax.translation(), (0.0, 0.0));
        parallax.pointer_moved(0.0, 0.0, VIEW);
        parallax.set_paused(false);
        assert_eq!(parallax.translation(), (20.0, 20.0));
    }

    #[test]
    fn degenerate_viewport_is_ignored() {
        let mut parallax = Parallax::default();
        parallax.pointer_moved(10.0, 10.0, Viewport::new(0, 0));
        assert_eq!(parallax.translation(), (0.0, 0.0));
    }
}
