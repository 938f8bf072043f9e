use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::assets::raster::OverlayImage;
use crate::config::booth::{BoothConfig, normalize_rel_path};
use crate::foundation::error::{BoothError, BoothResult};

/// Where an overlay image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayResource {
    /// Encoded image file on disk.
    File(PathBuf),
    /// Encoded image bytes already in memory (embedded or downloaded).
    Encoded {
        /// Display name used in logs and errors.
        name: String,
        /// Encoded image bytes.
        bytes: Arc<[u8]>,
    },
}

impl OverlayResource {
    /// Read and decode the resource.
    ///
    /// Fails with [`BoothError::Load`] when the resource is missing or corrupt.
    pub async fn fetch(&self) -> BoothResult<OverlayImage> {
        let decoded = match self {
            Self::File(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    BoothError::load(format!("read overlay '{}': {e}", path.display()))
                })?;
                decode_image(&bytes)
            }
            Self::Encoded { bytes, .. } => decode_image(bytes),
        };
        decoded.map_err(|e| BoothError::load(format!("decode overlay '{self}': {e}")))
    }
}

impl fmt::Display for OverlayResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Encoded { name, .. } => f.write_str(name),
        }
    }
}

/// Ordered, non-empty set of overlays with one active selection.
///
/// The selection is independent of the capture session: resetting a session keeps the overlay.
/// Changing the selection only commits once the new image has loaded, so a failed load leaves the
/// previous overlay active.
#[derive(Debug)]
pub struct OverlayLibrary {
    resources: Vec<OverlayResource>,
    index: usize,
    current: Option<OverlayImage>,
}

impl OverlayLibrary {
    /// Create a library positioned at index 0 with nothing loaded yet.
    pub fn new(resources: Vec<OverlayResource>) -> BoothResult<Self> {
        if resources.is_empty() {
            return Err(BoothError::validation(
                "overlay library must not be empty",
            ));
        }
        Ok(Self {
            resources,
            index: 0,
            current: None,
        })
    }

    /// Build a library from the config's overlay paths, resolved against `assets_root`.
    pub fn from_config(cfg: &BoothConfig, assets_root: &Path) -> BoothResult<Self> {
        let resources = cfg
            .overlays
            .iter()
            .map(|p| normalize_rel_path(p).map(|rel| OverlayResource::File(assets_root.join(rel))))
            .collect::<BoothResult<Vec<_>>>()?;
        Self::new(resources)
    }

    /// Number of overlays.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Always `false`: libraries are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Index of the active overlay.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Active overlay image, once loaded.
    pub fn current(&self) -> Option<&OverlayImage> {
        self.current.as_ref()
    }

    /// Resource at `index`.
    pub fn resource(&self, index: usize) -> Option<&OverlayResource> {
        self.resources.get(index)
    }

    /// Index that [`OverlayLibrary::next`] moves to.
    pub fn next_index(&self) -> usize {
        (self.index + 1) % self.len()
    }

    /// Index that [`OverlayLibrary::previous`] moves to.
    pub fn previous_index(&self) -> usize {
        (self.index + self.len() - 1) % self.len()
    }

    /// Fetch and decode the overlay at `index` without changing the selection.
    pub async fn load(&self, index: usize) -> BoothResult<OverlayImage> {
        let resource = self.resources.get(index).ok_or_else(|| {
            BoothError::load(format!(
                "overlay index {index} out of range (library has {})",
                self.len()
            ))
        })?;
        resource.fetch().await
    }

    /// Load the overlay at `index` and make it active.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn select(&mut self, index: usize) -> BoothResult<&OverlayImage> {
        let img = self.load(index).await?;
        tracing::debug!(overlay = %self.resources[index], "overlay selected");
        self.index = index;
        let img: &OverlayImage = self.current.insert(img);
        Ok(img)
    }

    /// Load the current index if nothing has been loaded yet.
    pub async fn ensure_loaded(&mut self) -> BoothResult<&OverlayImage> {
        if self.current.is_none() {
            let img = self.load(self.index).await?;
            self.current = Some(img);
        }
        self.current
            .as_ref()
            .ok_or_else(|| BoothError::load("overlay not loaded"))
    }

    /// Cycle forward, wrapping at the end.
    pub async fn next(&mut self) -> BoothResult<&OverlayImage> {
        self.select(self.next_index()).await
    }

    /// Cycle backward, wrapping at the start.
    pub async fn previous(&mut self) -> BoothResult<&OverlayImage> {
        self.select(self.previous_index()).await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/library.rs"]
mod tests;
