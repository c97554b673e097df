use std::ffi::c_int;

use tracing::warn;

use super::ffi;
use crate::isp::{ExposureControl, IspError};
use crate::types::FaceRect;

/// Lifecycle guard for the `librkisp_control` session.
///
/// Init and teardown bracket the daemon's life; the exposure-weight calls
/// themselves go through [`RkispExposure`] and do not need the guard.
pub struct RkispControl(());

impl RkispControl {
    pub fn init() -> Result<Self, IspError> {
        let status = unsafe { ffi::rkisp_control_init() };
        if status != 0 {
            return Err(IspError::InitFailed(status));
        }
        Ok(Self(()))
    }

    pub fn exit(self) {
        unsafe { ffi::rkisp_control_exit() };
        std::mem::forget(self);
    }
}

/// Exposure weighting via the Rockchip ISP control library.
#[derive(Debug, Clone, Copy, Default)]
pub struct RkispExposure;

impl ExposureControl for RkispExposure {
    fn weight_region(&self, rect: FaceRect) {
        unsafe {
            ffi::rkisp_control_expo_weights_90(rect.left, rect.top, rect.right, rect.bottom);
        }
    }

    fn reset_weights(&self) {
        unsafe { ffi::rkisp_control_expo_weights_default() };
    }
}

/// Adapts a C paint-box callback, registered by the display layer, to the
/// overlay boundary. The callback contract uses an all-zero rectangle to
/// mean "erase the box".
pub struct PaintBoxCallback {
    callback: extern "C" fn(c_int, c_int, c_int, c_int),
}

impl PaintBoxCallback {
    #[must_use]
    pub fn new(callback: extern "C" fn(c_int, c_int, c_int, c_int)) -> Self {
        Self { callback }
    }
}

impl crate::isp::OverlaySink for PaintBoxCallback {
    fn paint_box(&self, rect: FaceRect) {
        (self.callback)(rect.left, rect.top, rect.right, rect.bottom);
    }

    fn clear(&self) {
        let z = FaceRect::ZERO;
        (self.callback)(z.left, z.top, z.right, z.bottom);
    }
}

impl Drop for RkispControl {
    fn drop(&mut self) {
        // Reached only when exit() was never called, e.g. during unwinding.
        warn!("rkisp control dropped without explicit exit");
        unsafe { ffi::rkisp_control_exit() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isp::OverlaySink;
    use std::sync::Mutex;

    static CALLS: Mutex<Vec<(c_int, c_int, c_int, c_int)>> = Mutex::new(Vec::new());

    extern "C" fn record(left: c_int, top: c_int, right: c_int, bottom: c_int) {
        CALLS.lock().unwrap().push((left, top, right, bottom));
    }

    #[test]
    fn clear_paints_the_all_zero_sentinel() {
        let sink = PaintBoxCallback::new(record);
        sink.paint_box(FaceRect::new(10, 20, 30, 40));
        sink.clear();

        let calls = CALLS.lock().unwrap();
        assert_eq!(*calls, vec![(10, 20, 30, 40), (0, 0, 0, 0)]);
    }
}
