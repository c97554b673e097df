//! Bindings to the proprietary Rockchip SDKs: `librockface` for face
//! detection and `librkisp_control` for exposure weighting.
//!
//! Everything here is behind the `rockchip` cargo feature because both
//! libraries are licensed vendor blobs that only exist on the target device.

mod detector;
mod ffi;
mod isp;

pub use detector::RockfaceDetector;
pub use isp::{PaintBoxCallback, RkispControl, RkispExposure};
