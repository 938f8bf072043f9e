use std::sync::atomic::{AtomicU64, Ordering};

use crate::assets::raster::CapturedFrame;

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

/// Epochs are unique across every session in the process, so a ticket only ever matches the
/// state that issued it.
fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Proof that a capture was started, consumed when its result is committed or dropped.
///
/// A ticket remembers the session epoch it was issued under. Every reset bumps the epoch, so a
/// capture that resolves after a reset carries a stale ticket and its frame is discarded.
#[derive(Debug, PartialEq, Eq)]
pub struct CaptureTicket {
    epoch: u64,
    slot: usize,
}

impl CaptureTicket {
    /// Epoch the capture started under.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Slot the frame is destined for.
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Result of resolving a capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A capture was already in flight or the strip is full; nothing happened.
    Ignored,
    /// The frame was stored in `slot`.
    Committed {
        /// Slot the frame now occupies.
        slot: usize,
    },
    /// The session was reset while the capture was in flight; the result was dropped.
    Stale,
}

/// Read-only flags derived from the session for UI state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivedFlags {
    /// Number of occupied slots.
    pub filled: usize,
    /// Every slot is occupied.
    pub is_complete: bool,
    /// A capture may start now.
    pub can_capture: bool,
    /// There is a photo to retake.
    pub can_retake: bool,
    /// The strip is complete and idle, ready to export.
    pub can_export: bool,
    /// Slot a retake would clear; UIs anchor the retake control next to it.
    pub retake_slot: Option<usize>,
}

/// Frames, fill cursor, busy flag, and epoch of one capture session.
#[derive(Clone, Debug)]
pub struct SessionState {
    frames: Vec<Option<CapturedFrame>>,
    cursor: usize,
    busy: bool,
    epoch: u64,
}

impl SessionState {
    /// Empty state for `slots` slots.
    pub fn new(slots: usize) -> Self {
        Self {
            frames: vec![None; slots],
            cursor: 0,
            busy: false,
            epoch: next_epoch(),
        }
    }

    /// Number of slots (`N`).
    pub fn slot_count(&self) -> usize {
        self.frames.len()
    }

    /// Frames by slot index.
    pub fn frames(&self) -> &[Option<CapturedFrame>] {
        &self.frames
    }

    /// Index of the next slot to fill, in `[0, N]`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// A capture is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Current session epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of occupied slots.
    pub fn filled(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }

    /// All slots are occupied.
    pub fn is_complete(&self) -> bool {
        self.filled() == self.slot_count()
    }

    /// Slot a retake clears: the last one filled.
    pub fn trailing_slot(&self) -> Option<usize> {
        self.filled().checked_sub(1)
    }

    /// Derived UI flags.
    pub fn flags(&self) -> DerivedFlags {
        let filled = self.filled();
        let is_complete = filled == self.slot_count();
        DerivedFlags {
            filled,
            is_complete,
            can_capture: !self.busy && !is_complete,
            can_retake: filled > 0,
            can_export: is_complete && !self.busy,
            retake_slot: self.trailing_slot(),
        }
    }

    /// Mark a capture in flight, or `None` when busy or full.
    pub(crate) fn begin(&mut self) -> Option<CaptureTicket> {
        if self.busy || self.cursor >= self.slot_count() {
            return None;
        }
        self.busy = true;
        Some(CaptureTicket {
            epoch: self.epoch,
            slot: self.cursor,
        })
    }

    /// The ticket is the one this state issued for the capture in flight.
    fn is_current(&self, ticket: &CaptureTicket) -> bool {
        self.busy && ticket.epoch == self.epoch && ticket.slot == self.cursor
    }

    /// Store a captured frame unless the ticket predates the last reset or was issued elsewhere.
    pub(crate) fn commit(&mut self, ticket: CaptureTicket, frame: CapturedFrame) -> CaptureOutcome {
        if !self.is_current(&ticket) {
            return CaptureOutcome::Stale;
        }
        let Some(slot) = self.frames.get_mut(ticket.slot) else {
            return CaptureOutcome::Stale;
        };
        *slot = Some(frame);
        self.cursor = ticket.slot + 1;
        self.busy = false;
        CaptureOutcome::Committed { slot: ticket.slot }
    }

    /// Clear the busy flag after a failed or abandoned capture.
    ///
    /// Returns `false` for stale or foreign tickets, which leave this state untouched.
    pub(crate) fn abort(&mut self, ticket: CaptureTicket) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.busy = false;
        true
    }

    /// Clear the trailing occupied slot and point the cursor at it.
    pub(crate) fn retake(&mut self) -> Option<usize> {
        if self.busy {
            return None;
        }
        let slot = self.trailing_slot()?;
        self.frames[slot] = None;
        self.cursor = slot;
        Some(slot)
    }

    /// Drop all frames and invalidate in-flight captures.
    pub(crate) fn reset(&mut self) {
        self.frames.iter_mut().for_each(|f| *f = None);
        self.cursor = 0;
        self.busy = false;
        self.epoch = next_epoch();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
