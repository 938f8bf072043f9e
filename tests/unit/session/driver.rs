use std::io::Cursor;
use std::pin::pin;
use std::sync::Arc;
use std::task::{Context, Waker};

use super::*;
use crate::assets::raster::RasterImage;
use crate::config::booth::{CountdownConfig, StripLayout};
use crate::foundation::error::BoothError;
use crate::overlay::library::{OverlayLibrary, OverlayResource};
use crate::session::source::NoCountdown;

struct Scripted<F>(F);

impl<F: FnMut() -> BoothResult<CapturedFrame>> FrameSource for Scripted<F> {
    async fn acquire(&mut self) -> BoothResult<CapturedFrame> {
        (self.0)()
    }
}

struct NeverSource;

impl FrameSource for NeverSource {
    async fn acquire(&mut self) -> BoothResult<CapturedFrame> {
        std::future::pending().await
    }
}

fn frame() -> CapturedFrame {
    RasterImage::filled(8, 6, [255, 255, 0, 255]).unwrap()
}

fn started_session() -> RefCell<CaptureSession> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let overlays = OverlayLibrary::new(vec![OverlayResource::Encoded {
        name: "clear".to_string(),
        bytes: Arc::from(buf),
    }])
    .unwrap();
    let mut s =
        CaptureSession::new(StripLayout::default(), CountdownConfig::default(), overlays).unwrap();
    s.start();
    RefCell::new(s)
}

#[test]
fn captures_commit_in_slot_order() {
    let cell = started_session();
    let mut src = Scripted(|| Ok(frame()));
    for slot in 0..3 {
        let out = pollster::block_on(capture(&cell, &mut NoCountdown, &mut src)).unwrap();
        assert_eq!(out, CaptureOutcome::Committed { slot });
    }
    let out = pollster::block_on(capture(&cell, &mut NoCountdown, &mut src)).unwrap();
    assert_eq!(out, CaptureOutcome::Ignored);
    assert!(cell.borrow().flags().is_complete);
}

#[test]
fn trigger_while_in_flight_is_dropped() {
    let cell = started_session();
    let mut nested = None;
    let mut src = Scripted(|| {
        // A second button press lands while the camera is still delivering.
        let mut other = Scripted(|| Ok(frame()));
        nested = Some(pollster::block_on(capture(&cell, &mut NoCountdown, &mut other)));
        assert_eq!(cell.borrow().state().filled(), 0);
        Ok(frame())
    });

    let out = pollster::block_on(capture(&cell, &mut NoCountdown, &mut src)).unwrap();
    assert_eq!(out, CaptureOutcome::Committed { slot: 0 });
    assert_eq!(nested.unwrap().unwrap(), CaptureOutcome::Ignored);
    assert_eq!(cell.borrow().state().filled(), 1);
    assert_eq!(cell.borrow().state().cursor(), 1);
}

#[test]
fn reset_before_completion_discards_frame() {
    let cell = started_session();
    let mut src = Scripted(|| {
        cell.borrow_mut().reset();
        Ok(frame())
    });

    let out = pollster::block_on(capture(&cell, &mut NoCountdown, &mut src)).unwrap();
    assert_eq!(out, CaptureOutcome::Stale);
    let s = cell.borrow();
    assert!(s.state().frames().iter().all(Option::is_none));
    assert_eq!(s.state().cursor(), 0);
    assert!(!s.state().is_busy());
}

#[test]
fn device_error_is_surfaced_once() {
    let cell = started_session();
    let mut calls = 0;
    let mut src = Scripted(|| {
        calls += 1;
        Err(BoothError::device("no camera"))
    });

    let err = pollster::block_on(capture(&cell, &mut NoCountdown, &mut src)).unwrap_err();
    assert!(err.is_device());
    assert_eq!(calls, 1);
    assert!(!cell.borrow().state().is_busy());
    assert!(cell.borrow().flags().can_capture);
}

#[test]
fn dropping_an_in_flight_capture_releases_busy() {
    let cell = started_session();
    let mut src = NeverSource;
    let mut countdown = NoCountdown;
    {
        let mut fut = pin!(capture(&cell, &mut countdown, &mut src));
        let mut cx = Context::from_waker(Waker::noop());
        assert!(fut.as_mut().poll(&mut cx).is_pending());
        assert!(cell.borrow().state().is_busy());
    }
    assert!(!cell.borrow().state().is_busy());
    assert!(cell.borrow().flags().can_capture);
}
