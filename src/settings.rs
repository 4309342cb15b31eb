use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use starfolio_core::BackgroundConfig;

#[derive(Parser, Debug, Default)]
#[command(
    name = "starfolio",
    about = "Portfolio with a starfield you can fly through"
)]
pub struct Args {
    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Portfolio content; the built-in copy is used when absent
    #[arg(long)]
    pub content: Option<PathBuf>,
    /// TrueType font for body text
    #[arg(long)]
    pub font: Option<PathBuf>,
    /// Page to open, e.g. /ios-apps/car-care-log
    #[arg(long)]
    pub route: Option<String>,
    /// Seed for the starfield
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub title: String,
    pub route: String,
    pub content: Option<PathBuf>,
    /// Directory screenshots and previews are resolved against.
    pub assets: PathBuf,
    pub font: Option<PathBuf>,
    pub heading_font: Option<PathBuf>,
    pub background: BackgroundConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            fps: starfolio_core::frame::DEFAULT_FPS,
            title: "ArenB".to_string(),
            route: "/".to_string(),
            content: None,
            assets: PathBuf::from("assets"),
            font: None,
            heading_font: None,
            background: BackgroundConfig::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", path.display()))
    }

    /// File values first, then anything given on the command line.
    pub fn resolve(args: &Args) -> anyhow::Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply(args);
        Ok(settings)
    }

    fn apply(&mut self, args: &Args) {
        if let Some(content) = &args.content {
            self.content = Some(content.clone());
        }
        if let Some(font) = &args.font {
            self.font = Some(font.clone());
        }
        if let Some(route) = &args.route {
            self.route = route.clone();
        }
        if let Some(seed) = args.seed {
            self.background.field.seed = Some(seed);
        }
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(height) = args.height {
            self.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_override_file() {
        let json = r#"{"width": 640, "route": "/ios-apps/x"}"#;
        let mut settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.height, 800);
        let args = Args::parse_from(["starfolio", "--width", "1024", "--seed", "9"]);
        settings.apply(&args);
        assert_eq!(settings.width, 1024);
        assert_eq!(settings.route, "/ios-apps/x");
        assert_eq!(settings.background.field.seed, Some(9));
    }

    #[test]
    fn nested_background_settings() {
        let json = r#"{"background": {"field": {"starCount": 12}, "parallaxAmplitude": 10}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.background.field.star_count, 12);
        assert_eq!(settings.background.parallax_amplitude, 10.0);
        assert!(settings.background.backdrop.is_none());
    }

    #[test]
    fn missing_config_is_an_error() {
        let args = Args {
            config: Some(PathBuf::from("/no/such/settings.json")),
            ..Default::default()
        };
        assert!(Settings::resolve(&args).is_err());
    }
}
