use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backdrop::Backdrop;
use crate::draw;
use crate::field::{FieldConfig, FieldSimulation, Viewport};
use crate::parallax::{Parallax, DEFAULT_AMPLITUDE};
use crate::raster::{PixelBuffer, Rgb};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundConfig {
    pub field: FieldConfig,
    pub parallax_amplitude: f32,
    /// PNG drawn beneath the stars.
    pub backdrop: Option<PathBuf>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            parallax_amplitude: DEFAULT_AMPLITUDE,
            backdrop: None,
        }
    }
}

/// Full-viewport starfield with its parallax backdrop.
///
/// Everything it owns is released when it is dropped, which is the only
/// way to stop it; the host simply stops calling [`frame`](Self::frame).
#[derive(Debug)]
pub struct StarfieldBackground {
    field: FieldSimulation,
    parallax: Parallax,
    backdrop: Option<Backdrop>,
    viewport: Viewport,
    frames: u64,
}

impl StarfieldBackground {
    pub fn mount(config: &BackgroundConfig, viewport: Viewport) -> Self {
        let backdrop = config.backdrop.as_deref().and_then(Backdrop::load);
        let Viewport { width, height } = viewport;
        log::debug!("starfield mounted at {width}x{height}");
        Self {
            field: FieldSimulation::new(config.field.clone(), viewport),
            parallax: Parallax::new(config.parallax_amplitude),
            backdrop,
            viewport,
            frames: 0,
        }
    }

    pub fn field(&self) -> &FieldSimulation {
        &self.field
    }

    pub fn parallax(&self) -> &Parallax {
        &self.parallax
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn set_hyperdrive(&mut self, engaged: bool) {
        self.field.set_hyperdrive(engaged);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.field.set_paused(paused);
        self.parallax.set_paused(paused);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.parallax.pointer_moved(x, y, self.viewport);
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// One animation frame. Without a surface nothing is simulated or drawn.
    pub fn frame(&mut self, surface: Option<&mut PixelBuffer>) {
        let Some(buffer) = surface else {
            return;
        };
        self.field.step(self.viewport);

        buffer.clear(Rgb::BLACK);
        if let Some(backdrop) = &self.backdrop {
            backdrop.draw(self.parallax.translation(), self.viewport, buffer);
        }
        draw::draw_field(&self.field, self.viewport, buffer);
        self.frames += 1;
    }
}

impl Drop for StarfieldBackground {
    fn drop(&mut self) {
        log::debug!("starfield unmounted after {} frames", self.frames);
    }
}
