//! photostrip drives a photo-booth session and composites the captured photos into a printable
//! strip.
//!
//! The crate covers the stateful core of a booth:
//!
//! - a [`CaptureSession`] that tracks which slots are filled, keeps captures exclusive, supports
//!   retaking the last photo, and discards captures that resolve after a reset;
//! - a pure [`render`] compositor that fits each frame into its slot ([`FitStrategy::Cover`] or
//!   [`FitStrategy::Contain`]) and draws the selected overlay on top;
//! - an [`OverlayLibrary`] of decorative frames, cycled forward and backward.
//!
//! Camera access and the countdown display are collaborators behind the [`FrameSource`] and
//! [`Countdown`] traits. All futures are executor-agnostic and expected to run on one thread; the
//! bundled CLI drives them with `pollster`.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: [`capture`] runs the countdown, acquires a frame, and commits it to the cursor
//!    slot.
//! 2. **Compose**: the session re-renders a premultiplied [`StripFrame`] after every change.
//! 3. **Export**: [`CaptureSession::export_png`] encodes the completed strip.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod config;
mod foundation;
mod overlay;
mod session;

pub use crate::assets::decode::decode_image;
pub use crate::assets::raster::{CapturedFrame, OverlayImage, RasterImage};
pub use crate::compose::compositor::render;
pub use crate::compose::fit::fit_rect;
pub use crate::compose::output::StripFrame;
pub use crate::config::booth::{BoothConfig, CountdownConfig, StripLayout};
pub use crate::foundation::core::{Canvas, FitStrategy, Point, Rect, Size, Slot};
pub use crate::foundation::error::{BoothError, BoothResult};
pub use crate::overlay::library::{OverlayLibrary, OverlayResource};
pub use crate::session::driver::capture;
pub use crate::session::machine::{CaptureSession, SessionPhase};
pub use crate::session::source::{
    Countdown, FileFrameSource, FrameSource, NoCountdown, SleepCountdown,
};
pub use crate::session::state::{CaptureOutcome, CaptureTicket, DerivedFlags, SessionState};
