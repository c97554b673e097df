use thiserror::Error;

use crate::types::FaceRect;

/// Auto-exposure weighting side of the ISP control module.
///
/// Both operations are fire-and-forget on the vendor ABI - there is no status
/// to propagate, and a missed update is corrected by the next frame.
pub trait ExposureControl: Send + Sync {
    /// Biases auto-exposure computation toward the given region of the frame.
    fn weight_region(&self, rect: FaceRect);

    /// Restores the default (full-frame / center-weighted) exposure policy.
    fn reset_weights(&self);
}

/// Optional UI overlay that mirrors the reported face box on screen.
pub trait OverlaySink: Send + Sync {
    fn paint_box(&self, rect: FaceRect);

    /// Removes any previously painted box.
    fn clear(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IspError {
    #[error("ISP control init failed with status {0}")]
    InitFailed(i32),
}
