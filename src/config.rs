use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::policy::FacePolicy;
use crate::{DEFAULT_DATA_PATH, DEFAULT_MIN_WIDTH_DIVISOR, DEFAULT_SCORE_THRESHOLD};

/// Runtime configuration for the face-assisted exposure daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AecConfig {
    /// Directory the detector loads its model data from.
    pub data_path: PathBuf,
    /// Minimum detection confidence; faces at or below it are ignored.
    pub score_threshold: f32,
    /// A face narrower than `image_width / min_width_divisor` is ignored.
    pub min_width_divisor: u32,
}

impl Default for AecConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            min_width_divisor: DEFAULT_MIN_WIDTH_DIVISOR,
        }
    }
}

impl AecConfig {
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    #[must_use]
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_min_width_divisor(mut self, divisor: u32) -> Self {
        self.min_width_divisor = divisor;
        self
    }

    /// Clamps fields into their valid ranges. Call once after loading,
    /// before handing the config to anything else.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let policy = self.policy().validated();
        self.score_threshold = policy.score_threshold;
        self.min_width_divisor = policy.min_width_divisor;
        self
    }

    /// The acceptance filter this configuration describes.
    #[must_use]
    pub fn policy(&self) -> FacePolicy {
        FacePolicy {
            score_threshold: self.score_threshold,
            min_width_divisor: self.min_width_divisor,
        }
    }
}
