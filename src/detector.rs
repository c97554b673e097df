use thiserror::Error;

use crate::types::{Face, Frame};

/// Status codes of the vendor detector ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorStatus {
    Success,
    Fail,
    BadParam,
    AuthFail,
    NotSupported,
    Unknown(i32),
}

impl DetectorStatus {
    #[must_use]
    pub const fn from_raw(code: i32) -> Self {
        match code {
            0 => Self::Success,
            -1 => Self::Fail,
            -2 => Self::BadParam,
            -99 => Self::AuthFail,
            -98 => Self::NotSupported,
            other => Self::Unknown(other),
        }
    }

    pub const fn into_result(self) -> Result<(), DetectError> {
        match self {
            Self::Success => Ok(()),
            Self::Fail => Err(DetectError::Failed),
            Self::BadParam => Err(DetectError::BadParam),
            Self::AuthFail => Err(DetectError::AuthFailed),
            Self::NotSupported => Err(DetectError::UnsupportedDevice),
            Self::Unknown(code) => Err(DetectError::UnknownStatus(code)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    #[error("detector call failed")]
    Failed,

    #[error("bad parameter passed to the detector")]
    BadParam,

    #[error("detector authorization failed (missing or invalid license)")]
    AuthFailed,

    #[error("detector does not support this device")]
    UnsupportedDevice,

    #[error("detector returned unknown status code {0}")]
    UnknownStatus(i32),

    #[error("detector library returned a null handle")]
    NullHandle,

    #[error("detector data path is not representable on the C ABI: {0}")]
    InvalidDataPath(String),
}

/// The opaque face-detection boundary.
///
/// Implementations wrap an external, licensed detection library; this crate
/// never sees its internals. One call covers one frame and returns at most
/// [`crate::MAX_DETECTIONS`] candidates, all of which are discarded once the
/// frame has been acted on.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame<'_>) -> Result<Vec<Face>, DetectError>;
}
