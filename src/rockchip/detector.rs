use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tracing::{debug, warn};

use super::ffi;
use crate::detector::{DetectError, DetectorStatus, FaceDetector};
use crate::types::{Face, FaceRect, Frame};

/// Owns one `rockface_handle_t` and releases it exactly once on drop.
struct OwnedHandle(ffi::RockfaceHandle);

// The vendor library documents its handle as usable from any single thread
// at a time; the engine serializes access behind a mutex.
unsafe impl Send for OwnedHandle {}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        let status = unsafe { ffi::rockface_release_handle(self.0) };
        if status != 0 {
            warn!(status, "rockface handle release failed");
        }
    }
}

/// Face detector backed by the licensed `librockface` SDK.
pub struct RockfaceDetector {
    handle: OwnedHandle,
}

impl RockfaceDetector {
    /// Creates a handle, points it at the model data directory, and
    /// initializes the detection pipeline.
    ///
    /// On RV1108-class devices the authorization check inside
    /// `rockface_set_data_path` reads the license key from the data
    /// directory, so a missing key surfaces here as [`DetectError::AuthFailed`].
    pub fn new(data_path: &Path) -> Result<Self, DetectError> {
        let c_path = CString::new(data_path.as_os_str().as_bytes())
            .map_err(|_| DetectError::InvalidDataPath(data_path.display().to_string()))?;

        let raw = unsafe { ffi::rockface_create_handle() };
        if raw.is_null() {
            return Err(DetectError::NullHandle);
        }
        let handle = OwnedHandle(raw);

        let status = unsafe { ffi::rockface_set_data_path(handle.0, c_path.as_ptr()) };
        DetectorStatus::from_raw(status).into_result()?;

        let status = unsafe { ffi::rockface_init_detector(handle.0) };
        DetectorStatus::from_raw(status).into_result()?;

        debug!(path = %data_path.display(), "rockface detector initialized");
        Ok(Self { handle })
    }
}

impl FaceDetector for RockfaceDetector {
    fn detect(&mut self, frame: &Frame<'_>) -> Result<Vec<Face>, DetectError> {
        let image = ffi::RockfaceImage {
            data: frame.data().as_ptr(),
            size: u32::try_from(frame.data().len()).unwrap_or(u32::MAX),
            is_prealloc_buf: 1,
            pixel_format: frame.format().as_raw(),
            width: frame.width(),
            height: frame.height(),
        };

        let mut out = ffi::RockfaceDetArray::zeroed();
        let status = unsafe { ffi::rockface_detect(self.handle.0, &image, &mut out) };
        DetectorStatus::from_raw(status).into_result()?;

        Ok(collect_faces(&out))
    }
}

/// Converts the vendor result array, trusting the count field only within
/// `0..=MAX_FACE_COUNT` so a misbehaving library cannot make us read past
/// the fixed-capacity array.
fn collect_faces(out: &ffi::RockfaceDetArray) -> Vec<Face> {
    let count = usize::try_from(out.count)
        .unwrap_or(0)
        .min(ffi::MAX_FACE_COUNT);
    out.faces[..count]
        .iter()
        .map(|det| Face {
            track_id: det.id,
            rect: FaceRect::new(det.rect.left, det.rect.top, det.rect.right, det.rect.bottom),
            score: det.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_count_yields_no_faces() {
        let mut out = ffi::RockfaceDetArray::zeroed();
        out.count = -5;
        assert!(collect_faces(&out).is_empty());
    }

    #[test]
    fn count_beyond_capacity_is_clamped() {
        let mut out = ffi::RockfaceDetArray::zeroed();
        out.count = 4096;
        assert_eq!(collect_faces(&out).len(), ffi::MAX_FACE_COUNT);
    }

    #[test]
    fn fields_map_through_unchanged() {
        let mut out = ffi::RockfaceDetArray::zeroed();
        out.count = 1;
        out.faces[0] = ffi::RockfaceDet {
            id: 42,
            reserve: 0,
            rect: ffi::RockfaceRect {
                left: 1,
                top: 2,
                right: 3,
                bottom: 4,
            },
            score: 0.5,
        };

        let faces = collect_faces(&out);
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].track_id, 42);
        assert_eq!(faces[0].rect, FaceRect::new(1, 2, 3, 4));
        assert_eq!(faces[0].score, 0.5);
    }
}
