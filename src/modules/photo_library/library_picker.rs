use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::config::PhotoLibraryConfig;
use crate::features::log_form::dtos::PhotoRef;
use crate::features::photos::PhotoPicker;
use crate::shared::constants::is_image_extension;

/// Photo picker over a directory of image files
///
/// The caller stages the names the user typed; the next pick resolves them
/// against the library root, keeps existing image files in the order given,
/// and truncates to the selection limit.
pub struct LibraryPhotoPicker {
    root: PathBuf,
    staged: Vec<String>,
}

impl LibraryPhotoPicker {
    pub fn new(config: &PhotoLibraryConfig) -> Self {
        Self {
            root: config.library_dir.clone(),
            staged: Vec::new(),
        }
    }

    /// Queue names for the next pick, replacing anything queued before
    pub fn stage(&mut self, names: Vec<String>) {
        self.staged = names;
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        let candidate = Path::new(name);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        }
    }
}

async fn is_image_file(path: &Path) -> bool {
    let has_image_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(is_image_extension);

    has_image_extension
        && tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
}

#[async_trait]
impl PhotoPicker for LibraryPhotoPicker {
    async fn request_permission(&mut self) -> bool {
        match tokio::fs::read_dir(&self.root).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Photo library {} not readable: {}", self.root.display(), e);
                false
            }
        }
    }

    async fn pick_images(&mut self, max_count: usize) -> Option<Vec<PhotoRef>> {
        let staged = std::mem::take(&mut self.staged);
        let mut picked = Vec::new();

        for name in staged {
            if picked.len() >= max_count {
                debug!("Selection limit {} reached, ignoring {}", max_count, name);
                continue;
            }

            let path = self.resolve(&name);
            if is_image_file(&path).await {
                picked.push(PhotoRef::new(path.to_string_lossy().into_owned()));
            } else {
                warn!("Skipping {}: not an image file", path.display());
            }
        }

        if picked.is_empty() {
            None
        } else {
            Some(picked)
        }
    }
}
