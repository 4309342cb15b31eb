use std::collections::HashMap;
use std::path::PathBuf;

use starfolio_core::backdrop;
use starfolio_core::Picture;

/// Pictures decoded on first use; failures are remembered so a missing file
/// is reported once.
pub struct ImageCache {
    root: PathBuf,
    pictures: HashMap<String, Option<Picture>>,
}

impl ImageCache {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            pictures: HashMap::new(),
        }
    }

    pub fn get(&mut self, name: &str) -> Option<&Picture> {
        let root = &self.root;
        self.pictures
            .entry(name.to_string())
            .or_insert_with(|| {
                let path = root.join(name.trim_start_matches('/'));
                match backdrop::load_png(&path) {
                    Ok(picture) => Some(picture),
                    Err(e) => {
                        log::warn!("image {}: {e}", path.display());
                        None
                    }
                }
            })
            .as_ref()
    }
}
