//! Rendering and interaction core of the portfolio: the receding starfield
//! background, the tilting panels and the page state the host drives.
//!
//! The `#[no_mangle]` functions below are the surface the host calls every
//! frame; built as a dylib they can be swapped while the window stays open.

pub mod backdrop;
pub mod background;
pub mod carousel;
pub mod content;
pub mod draw;
pub mod error;
pub mod field;
pub mod frame;
pub mod hero;
pub mod layout;
pub mod markdown;
pub mod panel;
pub mod parallax;
pub mod raster;
pub mod route;

pub use background::{BackgroundConfig, StarfieldBackground};
pub use draw::PanelStyle;
pub use error::{Error, Result};
pub use field::{FieldConfig, FieldSimulation, Viewport};
pub use panel::{Bounds, Panel, PanelConfig};
pub use raster::{Picture, PixelBuffer, Rgb};

#[no_mangle]
pub fn advance_background(background: &mut StarfieldBackground, surface: Option<&mut PixelBuffer>) {
    background.frame(surface);
}

#[no_mangle]
pub fn paint_panel(panel: &Panel, bounds: Bounds, style: &PanelStyle, surface: &mut PixelBuffer) {
    draw::draw_panel(panel, bounds, style, surface);
}

/// Draws `picture` letterboxed inside `bounds`.
#[no_mangle]
pub fn paint_picture(picture: &Picture, bounds: Bounds, alpha: f32, surface: &mut PixelBuffer) {
    let fitted = layout::contain(bounds, picture.width, picture.height);
    surface.blit(
        picture,
        fitted.left,
        fitted.top,
        fitted.width,
        fitted.height,
        alpha,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picture_is_letterboxed() {
        let picture = Picture {
            width: 1,
            height: 1,
            pixels: vec![Rgb::WHITE],
        };
        let mut data = vec![0u8; 8 * 4 * 4];
        let mut surface = PixelBuffer::new(&mut data, 8, 4, 32);
        let bounds = Bounds::new(0.0, 0.0, 8.0, 4.0);
        paint_picture(&picture, bounds, 1.0, &mut surface);
        assert_eq!(surface.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(surface.pixel(3, 2), Some(Rgb::WHITE));
        assert_eq!(surface.pixel(7, 3), Some(Rgb::BLACK));
    }

    #[test]
    fn exported_frame_matches_component() {
        let config = BackgroundConfig {
            field: FieldConfig {
                star_count: 8,
                seed: Some(1),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut background = StarfieldBackground::mount(&config, Viewport::new(8, 8));
        advance_background(&mut background, None);
        assert_eq!(background.frames(), 0);
        let mut data = vec![0u8; 8 * 8 * 4];
        let mut surface = PixelBuffer::new(&mut data, 8, 8, 32);
        advance_background(&mut background, Some(&mut surface));
        assert_eq!(background.frames(), 1);
    }
}
