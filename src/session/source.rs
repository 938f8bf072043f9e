use std::future::Future;
use std::path::PathBuf;

use crate::assets::decode::decode_image;
use crate::assets::raster::CapturedFrame;
use crate::config::booth::CountdownConfig;
use crate::foundation::error::{BoothError, BoothResult};

/// Camera-side collaborator that supplies still frames on demand.
///
/// Contract: fail with [`BoothError::Device`] when the device is unavailable or the frame is
/// invalid, and return frames already oriented for display (mirrored for a front-facing
/// preview). The compositor never mirrors.
pub trait FrameSource {
    /// Grab one frame.
    fn acquire(&mut self) -> impl Future<Output = BoothResult<CapturedFrame>>;
}

/// Timer collaborator run before each snapshot, typically driving an on-screen countdown.
pub trait Countdown {
    /// Count down `cfg.seconds` ticks of `cfg.step()` each.
    fn run(&mut self, cfg: CountdownConfig) -> impl Future<Output = ()>;
}

/// Countdown that sleeps the current thread for each tick and logs the remaining count.
///
/// The future never yields: the whole countdown blocks the calling thread, so nothing else on a
/// single-threaded executor (a [`crate::CaptureSession::reset`], for one) runs until it ends.
/// Suitable for blocking executors such as `pollster::block_on`; interactive front ends should
/// supply a [`Countdown`] backed by their own timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepCountdown;

impl Countdown for SleepCountdown {
    async fn run(&mut self, cfg: CountdownConfig) {
        for remaining in (1..=cfg.seconds).rev() {
            tracing::info!(remaining, "countdown");
            std::thread::sleep(cfg.step());
        }
    }
}

/// Countdown that completes immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCountdown;

impl Countdown for NoCountdown {
    async fn run(&mut self, _cfg: CountdownConfig) {}
}

/// Frame source that plays back still image files in order, standing in for a camera.
#[derive(Clone, Debug)]
pub struct FileFrameSource {
    paths: Vec<PathBuf>,
    next: usize,
    mirror: bool,
}

impl FileFrameSource {
    /// Play back `paths` in order.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            next: 0,
            mirror: false,
        }
    }

    /// Mirror every frame horizontally, like a front-facing camera preview.
    pub fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Files not yet delivered.
    pub fn remaining(&self) -> usize {
        self.paths.len().saturating_sub(self.next)
    }

    fn read_next(&mut self) -> BoothResult<CapturedFrame> {
        let path = self
            .paths
            .get(self.next)
            .ok_or_else(|| BoothError::device("frame source exhausted"))?;
        self.next += 1;

        let bytes = std::fs::read(path)
            .map_err(|e| BoothError::device(format!("read frame '{}': {e}", path.display())))?;
        let frame = decode_image(&bytes)
            .map_err(|e| BoothError::device(format!("decode frame '{}': {e}", path.display())))?;
        Ok(if self.mirror { frame.mirrored() } else { frame })
    }
}

impl FrameSource for FileFrameSource {
    async fn acquire(&mut self) -> BoothResult<CapturedFrame> {
        self.read_next()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/source.rs"]
mod tests;
