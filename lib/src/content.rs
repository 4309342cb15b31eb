use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::Rgb;

const BUILTIN: &str = include_str!("../assets/portfolio.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub name: String,
    pub tagline: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub details: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub date: String,
    pub technologies: Vec<String>,
    pub link: String,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub header: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub id: String,
    pub image: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileApp {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub technologies: Vec<String>,
    pub features: Vec<Feature>,
    #[serde(default)]
    pub app_store_link: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    pub detailed_description: String,
    #[serde(default)]
    pub support_email: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    /// Markdown.
    #[serde(default)]
    pub privacy_policy: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLink {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub owner: Owner,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub apps: Vec<MobileApp>,
    pub contact: Vec<ContactLink>,
    #[serde(default)]
    pub more_projects_link: Option<String>,
    #[serde(default)]
    pub location: String,
}

impl Portfolio {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path, e))?;
        let portfolio = Self::parse(&json)?;
        log::info!(
            "loaded {} skills, {} projects, {} apps from {}",
            portfolio.skills.len(),
            portfolio.projects.len(),
            portfolio.apps.len(),
            path.display()
        );
        Ok(portfolio)
    }

    /// The copy compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN)
    }

    pub fn app(&self, id: &str) -> Option<&MobileApp> {
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.owner.email)
    }
}

/// Left and right colours of a technology chip.
pub fn tag_gradient(tech: &str) -> (Rgb, Rgb) {
    let (from, to) = match tech {
        "React" => ("#60a5fa", "#2563eb"),
        "Node.js" => ("#4ade80", "#16a34a"),
        "MongoDB" => ("#22c55e", "#15803d"),
        "Express" => ("#9ca3af", "#4b5563"),
        "Vue.js" => ("#34d399", "#059669"),
        "Firebase" => ("#facc15", "#ca8a04"),
        "Vuex" => ("#4ade80", "#16a34a"),
        "Tailwind CSS" => ("#22d3ee", "#0891b2"),
        "D3.js" => ("#fb923c", "#ea580c"),
        "TypeScript" => ("#3b82f6", "#1d4ed8"),
        "Material-UI" => ("#818cf8", "#4f46e5"),
        _ => ("#9ca3af", "#4b5563"),
    };
    let grey = Rgb::new(0x9c, 0xa3, 0xaf);
    (
        Rgb::from_hex(from).unwrap_or(grey),
        Rgb::from_hex(to).unwrap_or(grey),
    )
}
