use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::foundation::core::{Canvas, FitStrategy, Slot};
use crate::foundation::error::{BoothError, BoothResult};

/// Geometry consumed by the compositor: output size, slot rectangles, and fit rule.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StripLayout {
    /// Output strip size.
    pub canvas: Canvas,
    /// Slot rectangles in fill order.
    pub slots: Vec<Slot>,
    /// How frames are fitted into their slots.
    #[serde(default)]
    pub fit: FitStrategy,
}

impl StripLayout {
    /// Number of slots (`N`).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Validate canvas and slot geometry.
    pub fn validate(&self) -> BoothResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.slots.is_empty() {
            return Err(BoothError::validation("layout must declare at least one slot"));
        }
        for (i, slot) in self.slots.iter().enumerate() {
            slot.validate()
                .map_err(|e| BoothError::validation(format!("slot {i}: {e}")))?;
        }
        Ok(())
    }
}

impl Default for StripLayout {
    /// Reference layout: a `300x900` strip with three stacked 4:3 slots.
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 300,
                height: 900,
            },
            slots: vec![
                Slot::new(15.0, 199.0, 270.0, 202.5),
                Slot::new(15.0, 408.0, 270.0, 202.5),
                Slot::new(15.0, 617.0, 270.0, 202.5),
            ],
            fit: FitStrategy::Cover,
        }
    }
}

/// Countdown shown before each snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CountdownConfig {
    /// Number of ticks; `0` captures immediately.
    pub seconds: u32,
    /// Wall-clock duration of one tick in milliseconds.
    pub step_ms: u64,
}

impl CountdownConfig {
    /// Duration of one tick.
    pub fn step(self) -> Duration {
        Duration::from_millis(self.step_ms)
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            seconds: 3,
            step_ms: 800,
        }
    }
}

/// Complete booth configuration, loadable from JSON.
///
/// Overlay paths are relative to an assets root, usually the directory holding the config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoothConfig {
    /// Strip geometry.
    #[serde(flatten)]
    pub layout: StripLayout,
    /// Countdown before each capture.
    #[serde(default)]
    pub countdown: CountdownConfig,
    /// Overlay image paths, in cycling order.
    pub overlays: Vec<String>,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            layout: StripLayout::default(),
            countdown: CountdownConfig::default(),
            overlays: vec![
                "assets/template1.png".to_string(),
                "assets/template2.png".to_string(),
                "assets/template3.png".to_string(),
            ],
        }
    }
}

impl BoothConfig {
    /// Parse a booth config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BoothResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BoothError::validation(format!("parse booth config JSON: {e}")))
    }

    /// Parse a booth config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BoothError::validation(format!("open booth config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate layout geometry and overlay paths.
    pub fn validate(&self) -> BoothResult<()> {
        self.layout.validate()?;
        if self.overlays.is_empty() {
            return Err(BoothError::validation(
                "config must list at least one overlay",
            ));
        }
        for p in &self.overlays {
            normalize_rel_path(p)?;
        }
        Ok(())
    }
}

/// Normalize and validate config-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> BoothResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BoothError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(BoothError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BoothError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BoothError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/config/booth.rs"]
mod tests;
