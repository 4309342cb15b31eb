use std::path::Path;

use crate::error::{Error, Result};
use crate::field::Viewport;
use crate::raster::{PixelBuffer, Picture, Rgb};

/// Extra image beyond each viewport edge so the parallax shift never
/// uncovers the canvas.
pub const BLEED: f32 = 40.0;

pub const BRIGHTNESS: f32 = 0.3;
pub const SATURATION: f32 = 1.5;

/// Decodes a PNG into straight RGB.
pub fn decode_png(bytes: &[u8]) -> Result<Picture> {
    let mut decoder = png::Decoder::new(bytes);
    let transformations = png::Transformations::EXPAND | png::Transformations::STRIP_16;
    decoder.set_transformations(transformations);
    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    let data = &buffer[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => return Err(Error::Layout(info.color_type, info.bit_depth)),
    };

    let pixels = data
        .chunks_exact(channels)
        .map(|px| match channels {
            1 | 2 => Rgb::new(px[0], px[0], px[0]),
            _ => Rgb::new(px[0], px[1], px[2]),
        })
        .collect();
    Ok(Picture {
        width: info.width,
        height: info.height,
        pixels,
    })
}

pub fn load_png(path: &Path) -> Result<Picture> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    decode_png(&bytes)
}

/// `brightness()` followed by `saturate()`, as the CSS filter functions
/// define them.
pub fn filter(color: Rgb, brightness: f32, saturation: f32) -> Rgb {
    let r = color.r as f32 * brightness;
    let g = color.g as f32 * brightness;
    let b = color.b as f32 * brightness;
    let s = saturation;
    let out_r = (0.213 + 0.787 * s) * r + (0.715 - 0.715 * s) * g + (0.072 - 0.072 * s) * b;
    let out_g = (0.213 - 0.213 * s) * r + (0.715 + 0.285 * s) * g + (0.072 - 0.072 * s) * b;
    let out_b = (0.213 - 0.213 * s) * r + (0.715 - 0.715 * s) * g + (0.072 + 0.928 * s) * b;
    let clamp = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Rgb::new(clamp(out_r), clamp(out_g), clamp(out_b))
}

/// The dimmed nebula image beneath the starfield.
#[derive(Clone, Debug)]
pub struct Backdrop {
    picture: Picture,
}

impl Backdrop {
    pub fn from_picture(mut picture: Picture) -> Self {
        for px in picture.pixels.iter_mut() {
            *px = filter(*px, BRIGHTNESS, SATURATION);
        }
        Self { picture }
    }

    /// Loads the layer; any failure leaves the layer blank.
    pub fn load(path: &Path) -> Option<Self> {
        match load_png(path) {
            Ok(picture) => {
                log::debug!(
                    "backdrop {} loaded ({}x{})",
                    path.display(),
                    picture.width,
                    picture.height
                );
                Some(Self::from_picture(picture))
            }
            Err(e) => {
                log::warn!("backdrop unavailable, drawing without it: {e}");
                None
            }
        }
    }

    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    /// Covers the viewport plus [`BLEED`] on every side, shifted by `translation`.
    pub fn draw(&self, translation: (f32, f32), viewport: Viewport, buffer: &mut PixelBuffer) {
        let (tx, ty) = translation;
        buffer.blit(
            &self.picture,
            tx - BLEED,
            ty - BLEED,
            viewport.width as f32 + BLEED * 2.0,
            viewport.height as f32 + BLEED * 2.0,
            1.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn decodes_rgba_and_grayscale() {
        let pixels = [255, 0, 0, 255, 0, 0, 255, 128];
        let rgba = encode(2, 1, png::ColorType::Rgba, &pixels);
        let picture = decode_png(&rgba).unwrap();
        assert_eq!((picture.width, picture.height), (2, 1));
        assert_eq!(picture.pixels, [Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]);

        let gray = encode(1, 1, png::ColorType::Grayscale, &[77]);
        assert_eq!(decode_png(&gray).unwrap().pixels, [Rgb::new(77, 77, 77)]);
    }

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        assert!(decode_png(b"not a png").is_err());
    }

    #[test]
    fn missing_file_leaves_layer_blank() {
        let missing = Path::new("/definitely/not/here.png");
        assert!(Backdrop::load(missing).is_none());
    }

    #[test]
    fn filter_dims_and_keeps_grey_neutral() {
        let grey = filter(Rgb::new(200, 200, 200), BRIGHTNESS, SATURATION);
        assert_eq!(grey, Rgb::new(60, 60, 60));
        let red = filter(Rgb::new(200, 0, 0), BRIGHTNESS, SATURATION);
        assert!(red.r > 60);
        assert_eq!(red.g, 0);
    }

    #[test]
    fn draw_covers_viewport_under_any_translation() {
        let picture = Picture {
            width: 1,
            height: 1,
            pixels: vec![Rgb::WHITE],
        };
        let backdrop = Backdrop::from_picture(picture);
        let mut data = vec![0u8; 8 * 8 * 4];
        let mut buffer = PixelBuffer::new(&mut data, 8, 8, 32);
        backdrop.draw((40.0, 40.0), Viewport::new(8, 8), &mut buffer);
        assert_eq!(buffer.pixel(0, 0), Some(Rgb::new(77, 77, 77)));
        assert_eq!(buffer.pixel(7, 7), Some(Rgb::new(77, 77, 77)));
    }
}
