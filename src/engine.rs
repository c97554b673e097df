use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::detector::{DetectError, FaceDetector};
use crate::isp::{ExposureControl, OverlaySink};
use crate::policy::{largest_face, FacePolicy};
use crate::types::{FaceRect, Frame, FrameError, SurfaceFormat};

/// What happened to one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameOutcome {
    /// A face passed the acceptance filter and was forwarded to the exposure
    /// collaborator (and overlay, when present).
    FaceReported(FaceRect),
    /// Nothing qualified; exposure weights were reset and the overlay cleared.
    NoFace,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine is not running")]
    Stopped,

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("face detection failed")]
    Detect(#[source] DetectError),

    #[error("detector lock poisoned")]
    DetectorPoisoned,
}

/// Face-assisted auto-exposure context.
///
/// Owns the detector handle, the exposure collaborator, an optional overlay,
/// the acceptance policy, and the running flag - the state the original
/// control plane kept in module-level globals. Dropping the engine releases
/// the detector.
///
/// Frame processing is expected from a single capture-callback thread at a
/// time; the detector sits behind a mutex so a second caller serializes
/// rather than corrupting the external handle.
pub struct FaceAec {
    detector: Mutex<Box<dyn FaceDetector>>,
    exposure: Box<dyn ExposureControl>,
    overlay: Option<Box<dyn OverlaySink>>,
    policy: FacePolicy,
    running: AtomicBool,
}

impl FaceAec {
    /// Builds an engine around an already-initialized detector. The engine
    /// starts stopped; call [`FaceAec::start`] once setup has finished.
    #[must_use]
    pub fn new(
        detector: Box<dyn FaceDetector>,
        exposure: Box<dyn ExposureControl>,
        policy: FacePolicy,
    ) -> Self {
        Self {
            detector: Mutex::new(detector),
            exposure,
            overlay: None,
            policy: policy.validated(),
            running: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: Box<dyn OverlaySink>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn policy(&self) -> FacePolicy {
        self.policy
    }

    /// Entry point for the capture pipeline: adapts a raw surface buffer into
    /// a detector frame and processes it.
    ///
    /// Frames in anything other than 4:2:0 semi-planar YCbCr are rejected
    /// before detection, with no signal to the collaborators.
    pub fn process_surface(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        surface: SurfaceFormat,
    ) -> Result<FrameOutcome, EngineError> {
        if !self.is_running() {
            return Err(EngineError::Stopped);
        }

        let Some(format) = surface.to_pixel_format() else {
            warn!(%surface, "unsupported surface format");
            return Err(EngineError::Frame(FrameError::UnsupportedSurface(surface)));
        };

        let frame = Frame::new(data, width, height, format)?;
        self.process_frame(&frame)
    }

    /// Runs detection on one frame and emits exactly one signal pair to the
    /// collaborators: the accepted rectangle, or "no face".
    ///
    /// A per-frame detector failure also counts as "no face" - the reset is
    /// emitted and the error returned so the caller can log it. Nothing is
    /// retried.
    pub fn process_frame(&self, frame: &Frame<'_>) -> Result<FrameOutcome, EngineError> {
        if !self.is_running() {
            return Err(EngineError::Stopped);
        }

        let faces = {
            let mut detector = self
                .detector
                .lock()
                .map_err(|_| EngineError::DetectorPoisoned)?;
            match detector.detect(frame) {
                Ok(faces) => faces,
                Err(err) => {
                    self.emit_no_face();
                    return Err(EngineError::Detect(err));
                }
            }
        };

        let Some(face) = largest_face(&faces) else {
            self.emit_no_face();
            return Ok(FrameOutcome::NoFace);
        };

        match self.policy.evaluate(face, frame.width(), frame.height()) {
            Ok(()) => {
                let rect = face.rect;
                if let Some(overlay) = &self.overlay {
                    overlay.paint_box(rect);
                }
                self.exposure.weight_region(rect);
                debug!(
                    left = rect.left,
                    top = rect.top,
                    right = rect.right,
                    bottom = rect.bottom,
                    score = face.score,
                    "face accepted for exposure weighting"
                );
                Ok(FrameOutcome::FaceReported(rect))
            }
            Err(reason) => {
                debug!(%reason, candidates = faces.len(), "face rejected");
                self.emit_no_face();
                Ok(FrameOutcome::NoFace)
            }
        }
    }

    fn emit_no_face(&self) {
        if let Some(overlay) = &self.overlay {
            overlay.clear();
        }
        self.exposure.reset_weights();
    }
}
