// lib.rs - face-assisted auto-exposure control plane

#![cfg_attr(not(feature = "rockchip"), forbid(unsafe_code))]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod detector;
pub mod engine;
pub mod isp;
pub mod policy;
pub mod types;

#[cfg(feature = "rockchip")]
pub mod rockchip;

/// Upper bound on faces returned by one detector call, fixed by the vendor ABI.
pub const MAX_DETECTIONS: usize = 128;

/// A face must score strictly above this to drive exposure weighting.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.9;

/// A face must be at least `image_width / DEFAULT_MIN_WIDTH_DIVISOR` wide.
pub const DEFAULT_MIN_WIDTH_DIVISOR: u32 = 5;

/// Where the detector expects its model data files on the device.
pub const DEFAULT_DATA_PATH: &str = "/usr/bin";

pub use config::AecConfig;
pub use detector::{DetectError, DetectorStatus, FaceDetector};
pub use engine::{EngineError, FaceAec, FrameOutcome};
pub use isp::{ExposureControl, IspError, OverlaySink};
pub use policy::{largest_face, FacePolicy, RejectReason};
pub use types::{Face, FaceRect, Frame, FrameError, PixelFormat, SurfaceFormat};
