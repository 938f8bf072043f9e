use std::cell::RefCell;

use crate::assets::raster::CapturedFrame;
use crate::foundation::error::BoothResult;
use crate::session::machine::CaptureSession;
use crate::session::source::{Countdown, FrameSource};
use crate::session::state::{CaptureOutcome, CaptureTicket};

/// Run one capture: countdown, then a frame from `source`, then commit.
///
/// The session is borrowed only between suspension points, so other code sharing the cell (a
/// reset button, an overlay switch) can run while the countdown or the camera is pending. A reset
/// in that window turns the result into [`CaptureOutcome::Stale`]. Calling this while another
/// capture is in flight, or with a full strip, returns [`CaptureOutcome::Ignored`].
///
/// Dropping the returned future before it completes releases the busy flag.
pub async fn capture<C, S>(
    session: &RefCell<CaptureSession>,
    countdown: &mut C,
    source: &mut S,
) -> BoothResult<CaptureOutcome>
where
    C: Countdown,
    S: FrameSource,
{
    let (ticket, cfg) = {
        let mut s = session.borrow_mut();
        match s.begin_capture() {
            Some(ticket) => (ticket, s.countdown()),
            None => return Ok(CaptureOutcome::Ignored),
        }
    };
    let in_flight = InFlight {
        session,
        ticket: Some(ticket),
    };

    countdown.run(cfg).await;
    let result = source.acquire().await;
    in_flight.finish(result)
}

/// Releases the busy flag if a capture future is dropped mid-flight.
struct InFlight<'a> {
    session: &'a RefCell<CaptureSession>,
    ticket: Option<CaptureTicket>,
}

impl InFlight<'_> {
    fn finish(mut self, result: BoothResult<CapturedFrame>) -> BoothResult<CaptureOutcome> {
        match self.ticket.take() {
            Some(ticket) => self.session.borrow_mut().finish_capture(ticket, result),
            None => Ok(CaptureOutcome::Stale),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take()
            && let Ok(mut s) = self.session.try_borrow_mut()
        {
            s.abandon_capture(ticket);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
