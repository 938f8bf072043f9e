use std::path::Path;

use crate::assets::raster::CapturedFrame;
use crate::compose::compositor::render;
use crate::compose::output::StripFrame;
use crate::config::booth::{BoothConfig, CountdownConfig, StripLayout};
use crate::foundation::error::{BoothError, BoothResult};
use crate::overlay::library::OverlayLibrary;
use crate::session::state::{CaptureOutcome, CaptureTicket, DerivedFlags, SessionState};

/// Coarse lifecycle phase of a [`CaptureSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Not started, or disposed; the camera is not live.
    Idle,
    /// Live and waiting for a capture.
    Ready,
    /// One capture is in flight.
    Capturing,
    /// Every slot is filled.
    Complete,
}

/// Photo-booth capture session: owns the captured frames and keeps the composited strip current.
///
/// Every operation that changes frames or the overlay re-renders the strip, so [`Self::strip`]
/// always reflects the current state. Invalid requests that a UI can race into (capturing while
/// busy or full, retaking an empty strip) are silent no-ops.
///
/// Captures are two-phase: [`Self::begin_capture`] hands out a [`CaptureTicket`] and
/// [`Self::finish_capture`] resolves it. The session is never borrowed while the countdown runs or
/// the camera delivers a frame, so [`Self::reset`] can land in between; the ticket's epoch then no
/// longer matches and the late frame is dropped. [`crate::capture`] drives both phases.
#[derive(Debug)]
pub struct CaptureSession {
    layout: StripLayout,
    countdown: CountdownConfig,
    overlays: OverlayLibrary,
    state: SessionState,
    started: bool,
    strip: StripFrame,
}

impl CaptureSession {
    /// Create an idle session.
    pub fn new(
        layout: StripLayout,
        countdown: CountdownConfig,
        overlays: OverlayLibrary,
    ) -> BoothResult<Self> {
        layout.validate()?;
        let state = SessionState::new(layout.slot_count());
        let strip = render(&layout, state.frames(), overlays.current());
        Ok(Self {
            layout,
            countdown,
            overlays,
            state,
            started: false,
            strip,
        })
    }

    /// Create an idle session from a config whose overlay paths are relative to `assets_root`.
    pub fn from_config(cfg: &BoothConfig, assets_root: &Path) -> BoothResult<Self> {
        cfg.validate()?;
        let overlays = OverlayLibrary::from_config(cfg, assets_root)?;
        Self::new(cfg.layout.clone(), cfg.countdown, overlays)
    }

    /// Strip geometry.
    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    /// Countdown run before each capture.
    pub fn countdown(&self) -> CountdownConfig {
        self.countdown
    }

    /// Overlay library and its selection.
    pub fn overlays(&self) -> &OverlayLibrary {
        &self.overlays
    }

    /// Frames, cursor, busy flag, and epoch.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Derived UI flags.
    pub fn flags(&self) -> DerivedFlags {
        self.state.flags()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if !self.started {
            SessionPhase::Idle
        } else if self.state.is_busy() {
            SessionPhase::Capturing
        } else if self.state.is_complete() {
            SessionPhase::Complete
        } else {
            SessionPhase::Ready
        }
    }

    /// Most recent render.
    pub fn strip(&self) -> &StripFrame {
        &self.strip
    }

    /// Go live with an empty strip. No-op when already started.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.state.reset();
        self.rerender();
        tracing::info!(epoch = self.state.epoch(), "session started");
    }

    /// Stop the session: frames and any in-flight capture are discarded.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn dispose(&mut self) {
        self.started = false;
        self.state.reset();
        self.rerender();
        tracing::info!(epoch = self.state.epoch(), "session disposed");
    }

    /// Clear every slot. Always permitted; a capture still in flight will be discarded.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        let was_busy = self.state.is_busy();
        self.state.reset();
        self.rerender();
        tracing::info!(epoch = self.state.epoch(), was_busy, "session reset");
    }

    /// Start a capture into the cursor slot.
    ///
    /// Returns `None` without side effects when idle, busy, or full.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn begin_capture(&mut self) -> Option<CaptureTicket> {
        if !self.started {
            tracing::debug!("capture ignored: session idle");
            return None;
        }
        let ticket = self.state.begin();
        match &ticket {
            Some(t) => tracing::debug!(slot = t.slot(), epoch = t.epoch(), "capture started"),
            None => tracing::debug!(
                busy = self.state.is_busy(),
                cursor = self.state.cursor(),
                "capture ignored"
            ),
        }
        ticket
    }

    /// Resolve a capture started by [`Self::begin_capture`].
    ///
    /// On success the frame fills the ticket's slot and the strip is re-rendered. On failure the
    /// busy flag is cleared, no frame changes, no render happens, and the error is returned. A
    /// ticket from before the last reset, or one issued by another session, resolves to
    /// [`CaptureOutcome::Stale`] either way.
    #[tracing::instrument(level = "debug", skip(self, ticket, result), fields(slot = ticket.slot(), epoch = ticket.epoch()))]
    pub fn finish_capture(
        &mut self,
        ticket: CaptureTicket,
        result: BoothResult<CapturedFrame>,
    ) -> BoothResult<CaptureOutcome> {
        match result {
            Ok(frame) => {
                let outcome = self.state.commit(ticket, frame);
                match outcome {
                    CaptureOutcome::Committed { slot } => {
                        self.rerender();
                        tracing::info!(slot, filled = self.state.filled(), "frame captured");
                    }
                    _ => tracing::debug!("stale capture discarded"),
                }
                Ok(outcome)
            }
            Err(err) => {
                if self.state.abort(ticket) {
                    tracing::warn!(error = %err, "capture failed");
                    Err(err)
                } else {
                    tracing::debug!(error = %err, "stale capture failure discarded");
                    Ok(CaptureOutcome::Stale)
                }
            }
        }
    }

    /// Release a capture whose result will never arrive.
    pub(crate) fn abandon_capture(&mut self, ticket: CaptureTicket) {
        if self.state.abort(ticket) {
            tracing::debug!("capture abandoned");
        }
    }

    /// Clear the most recently filled slot so the next capture refills it.
    ///
    /// Returns the cleared slot, or `None` when nothing is filled or a capture is in flight.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn retake(&mut self) -> Option<usize> {
        let slot = self.state.retake()?;
        self.rerender();
        tracing::info!(slot, "retake");
        Some(slot)
    }

    /// Load the selected overlay if nothing is loaded yet, then re-render.
    pub async fn load_overlay(&mut self) -> BoothResult<()> {
        self.overlays.ensure_loaded().await?;
        self.rerender();
        Ok(())
    }

    /// Switch to the next overlay and re-render with the current frames.
    pub async fn next_overlay(&mut self) -> BoothResult<usize> {
        self.overlays.next().await?;
        self.rerender();
        Ok(self.overlays.index())
    }

    /// Switch to the previous overlay and re-render with the current frames.
    pub async fn previous_overlay(&mut self) -> BoothResult<usize> {
        self.overlays.previous().await?;
        self.rerender();
        Ok(self.overlays.index())
    }

    /// Switch to the overlay at `index` and re-render with the current frames.
    pub async fn select_overlay(&mut self, index: usize) -> BoothResult<()> {
        self.overlays.select(index).await?;
        self.rerender();
        Ok(())
    }

    /// Encode the finished strip as PNG.
    ///
    /// Fails unless every slot is filled and no capture is in flight.
    pub fn export_png(&self) -> BoothResult<Vec<u8>> {
        self.ensure_exportable()?;
        self.strip.encode_png()
    }

    /// Write the finished strip to `path` as PNG, creating parent directories.
    ///
    /// Same preconditions as [`Self::export_png`]; nothing is written when they fail.
    pub fn write_png(&self, path: impl AsRef<Path>) -> BoothResult<()> {
        self.ensure_exportable()?;
        self.strip.write_png(path)
    }

    fn ensure_exportable(&self) -> BoothResult<()> {
        let flags = self.flags();
        if !flags.can_export {
            return Err(BoothError::validation(format!(
                "strip not ready for export ({} of {} slots filled, busy: {})",
                flags.filled,
                self.state.slot_count(),
                self.state.is_busy()
            )));
        }
        Ok(())
    }

    fn rerender(&mut self) {
        self.strip = render(&self.layout, self.state.frames(), self.overlays.current());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/machine.rs"]
mod tests;
