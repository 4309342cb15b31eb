mod images;
mod pages;
mod settings;
mod text;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use starfolio_core::content::Portfolio;
use starfolio_core::frame::{FramePacer, FrameStats};
use starfolio_core::route::Route;
use starfolio_core::{PixelBuffer, Rgb, Viewport};

use crate::images::ImageCache;
use crate::pages::{Site, Ui};
use crate::settings::{Args, Settings};
use crate::text::TextPainter;

#[cfg(feature = "reload")]
#[hot_lib_reloader::hot_module(
    dylib = "starfolio_core",
    file_watch_debounce = 20,
    lib_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug")
)]
mod hot_lib {
    pub use starfolio_core::*;
    hot_functions_from_file!("lib/src/lib.rs");

    #[lib_updated]
    pub fn was_updated() -> bool {}
}

#[cfg(feature = "reload")]
pub(crate) use hot_lib::{advance_background, paint_panel, paint_picture};
#[cfg(not(feature = "reload"))]
pub(crate) use starfolio_core::{advance_background, paint_panel, paint_picture};

const WHEEL_STEP: f32 = 60.0;

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("starfolio", LevelFilter::Info)
        .filter_module("starfolio_core", LevelFilter::Info)
        .init();
}

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let args = Args::parse();
    let settings = Settings::resolve(&args)?;
    let portfolio = match &settings.content {
        Some(path) => Portfolio::load(path)?,
        None => Portfolio::builtin().context("built-in portfolio")?,
    };
    run(settings, portfolio)
}

fn run(settings: Settings, portfolio: Portfolio) -> anyhow::Result<()> {
    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;

    let window = video_subsystem
        .window(&settings.title, settings.width, settings.height)
        .position_centered()
        .resizable()
        .build()?;

    let mut canvas = window.into_canvas().build()?;
    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;

    let text = TextPainter::new(settings.font.as_deref(), settings.heading_font.as_deref());
    let mut images = ImageCache::new(settings.assets.clone());

    let format = PixelFormatEnum::ARGB8888;
    let new_texture = |w, h| texture_creator.create_texture_streaming(format, w, h);
    let (mut width, mut height) = canvas.output_size().map_err(anyhow::Error::msg)?;
    let mut texture = new_texture(width, height)?;
    let mut offscreen = vec![0u8; width as usize * height as usize * 4];

    let route = Route::parse(&settings.route);
    log::info!("opening {route} at {width}x{height}");
    let viewport = Viewport::new(width, height);
    let mut site = Site::new(portfolio, settings.background.clone(), route, viewport);

    let mut pacer = FramePacer::new(settings.fps);
    let mut stats = FrameStats::new(u64::from(settings.fps.max(1)) * 5);

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    if !site.escape() {
                        break 'running;
                    }
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    repeat: false,
                    ..
                } => site.toggle_pause(),
                Event::KeyDown {
                    keycode: Some(Keycode::Backspace),
                    ..
                } => {
                    site.back();
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Left),
                    ..
                } => site.step_carousel(false),
                Event::KeyDown {
                    keycode: Some(Keycode::Right),
                    ..
                } => site.step_carousel(true),
                Event::MouseMotion { x, y, .. } => site.pointer_moved(x as f32, y as f32),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    if let Some(link) = site.clicked(x as f32, y as f32) {
                        open_link(&link);
                    }
                }
                Event::MouseWheel { y, .. } => site.scrolled(-y as f32 * WHEEL_STEP),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (w, h) = canvas.output_size().map_err(anyhow::Error::msg)?;
                    if (w, h) != (width, height) && w > 0 && h > 0 {
                        (width, height) = (w, h);
                        texture = new_texture(width, height)?;
                        offscreen = vec![0u8; width as usize * height as usize * 4];
                        site.resized(Viewport::new(width, height));
                        log::debug!("resized to {width}x{height}");
                    }
                }
                _ => {}
            }
        }

        #[cfg(feature = "reload")]
        note_reload();

        let dt = pacer.wait();
        if let Some(link) = site.tick(dt) {
            open_link(&link);
        }

        let scroll = site.scroll();
        let has_background = match site.background_mut() {
            Some(background) => {
                let pitch = width as usize * 4;
                let mut surface = PixelBuffer::new(&mut offscreen, width, height, pitch);
                advance_background(background, Some(&mut surface));
                true
            }
            None => false,
        };

        let mut ui = Ui {
            text: &text,
            images: &mut images,
        };
        texture
            .with_lock(None, |bytes: &mut [u8], pitch: usize| {
                PixelBuffer::new(bytes, width, height, pitch).clear(Rgb::BLACK);
                if has_background {
                    composite_background(bytes, pitch, &offscreen, width, height, scroll);
                }
                let mut buffer = PixelBuffer::new(bytes, width, height, pitch);
                site.draw(&mut buffer, &mut ui);
            })
            .map_err(anyhow::Error::msg)?;

        canvas
            .copy(&texture, None, None)
            .map_err(anyhow::Error::msg)?;
        canvas.present();
        stats.record();
    }

    log::info!("closing after {} frames", stats.frames());
    Ok(())
}

#[cfg(feature = "reload")]
fn note_reload() {
    if hot_lib::was_updated() {
        log::info!("core library reloaded");
    }
}

/// Copies the background into the hero area, shifted up by the page scroll.
fn composite_background(
    dst: &mut [u8],
    pitch: usize,
    src: &[u8],
    width: u32,
    height: u32,
    scroll: f32,
) {
    let row_bytes = width as usize * 4;
    let shift = scroll.max(0.0) as usize;
    for row in 0..(height as usize).saturating_sub(shift) {
        let from = (row + shift) * row_bytes;
        let to = row * pitch;
        let target = dst.get_mut(to..to + row_bytes);
        if let (Some(dst), Some(src)) = (target, src.get(from..from + row_bytes)) {
            dst.copy_from_slice(src);
        }
    }
}

fn open_link(link: &str) {
    log::info!("opening {link}");
    if let Err(e) = open::that(link) {
        log::warn!("could not open {link}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_scrolls_with_the_hero() {
        let (width, height) = (2u32, 3u32);
        let src: Vec<u8> = (0..height as u8).flat_map(|row| [row; 8]).collect();
        let pitch = 12;
        let mut dst = vec![0xffu8; pitch * height as usize];
        composite_background(&mut dst, pitch, &src, width, height, 1.0);
        assert_eq!(&dst[0..8], &[1; 8]);
        assert_eq!(&dst[12..20], &[2; 8]);
        assert_eq!(&dst[8..12], &[0xff; 4]);
        assert_eq!(&dst[24..32], &[0xff; 8]);
    }
}
