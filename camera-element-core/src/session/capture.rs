use std::path::PathBuf;

use crate::dispatch::generation::{Generation, GenerationCounter};
use crate::dispatch::main_queue::{MainHandle, MainMessage};
use crate::models::capture_result::{CaptureResult, SavedImage};
use crate::models::error::CaptureError;
use crate::session::binder::SessionHandle;
use crate::storage::output::OutputLocation;

/// Resolution callback for one capture request.
pub type CaptureReply = Box<dyn FnOnce(Result<CaptureResult, CaptureError>) + Send + 'static>;

/// Identifies one capture request against the session it was issued on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTicket {
    request: Generation,
    session: Generation,
}

impl CaptureTicket {
    pub fn session(&self) -> Generation {
        self.session
    }
}

struct InFlight {
    ticket: CaptureTicket,
    path: PathBuf,
    reply: CaptureReply,
}

/// Single-flight still capture.
///
/// A request while another is outstanding fails fast with `Busy` instead
/// of queueing behind the hardware pipeline.
pub struct CaptureCoordinator {
    output: OutputLocation,
    requests: GenerationCounter,
    in_flight: Option<InFlight>,
}

impl CaptureCoordinator {
    pub fn new(output: OutputLocation) -> Self {
        Self {
            output,
            requests: GenerationCounter::new(),
            in_flight: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a capture on `session`.
    ///
    /// Precondition failures resolve `reply` immediately, without touching
    /// hardware, and are also returned. On `Ok`, `reply` fires once the
    /// matching `CaptureFinished` message is handed to [`Self::complete`].
    pub fn capture(
        &mut self,
        permitted: bool,
        session: Option<&SessionHandle>,
        main: &MainHandle,
        reply: CaptureReply,
    ) -> Result<CaptureTicket, CaptureError> {
        match self.start(permitted, session, main) {
            Ok((ticket, path)) => {
                self.in_flight = Some(InFlight { ticket, path, reply });
                Ok(ticket)
            }
            Err(e) => {
                log::debug!("capture() rejected: {}", e);
                reply(Err(e.clone()));
                Err(e)
            }
        }
    }

    fn start(
        &mut self,
        permitted: bool,
        session: Option<&SessionHandle>,
        main: &MainHandle,
    ) -> Result<(CaptureTicket, PathBuf), CaptureError> {
        if !permitted {
            return Err(CaptureError::PermissionDenied);
        }
        let Some(session) = session else {
            return Err(CaptureError::NotReady("camera is not initialised yet".into()));
        };
        if self.in_flight.is_some() {
            return Err(CaptureError::Busy);
        }

        let path = self.output.next_file()?;
        let ticket = CaptureTicket {
            request: self.requests.advance(),
            session: session.id(),
        };
        log::info!("capture() — writing {}", path.display());

        let main = main.clone();
        session.device().take_picture(
            &path,
            Box::new(move |outcome| {
                main.post(MainMessage::CaptureFinished { ticket, outcome });
            }),
        );
        Ok((ticket, path))
    }

    /// Settle the in-flight request on the main context.
    ///
    /// Returns `None` for a completion that no longer matches the in-flight
    /// request (it was aborted, or is a duplicate); such completions have no
    /// effect.
    pub fn complete(
        &mut self,
        ticket: CaptureTicket,
        outcome: Result<SavedImage, String>,
    ) -> Option<Result<CaptureResult, CaptureError>> {
        if self.in_flight.as_ref().map(|f| f.ticket) != Some(ticket) {
            log::debug!("Dropping stale capture completion {:?}", ticket);
            return None;
        }
        let in_flight = self.in_flight.take()?;

        let result = match outcome {
            Ok(saved) => Ok(CaptureResult::from_saved(&in_flight.path, &saved)),
            Err(message) => {
                log::error!("Still capture failed: {}", message);
                Err(CaptureError::HardwareFailure(message))
            }
        };
        (in_flight.reply)(result.clone());
        Some(result)
    }

    /// Resolve the in-flight request (if any) as `NotReady`.
    ///
    /// Used when its session is torn down or replaced; the platform's late
    /// completion is then dropped by [`Self::complete`].
    pub fn abort(&mut self, reason: &str) {
        if let Some(in_flight) = self.in_flight.take() {
            log::warn!("Aborting in-flight capture: {}", reason);
            (in_flight.reply)(Err(CaptureError::NotReady(reason.to_string())));
        }
    }
}
