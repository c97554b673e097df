use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Face;
use crate::{DEFAULT_MIN_WIDTH_DIVISOR, DEFAULT_SCORE_THRESHOLD};

/// Picks the face with the largest bounding-box area.
///
/// Scan order decides ties: an equal-area candidate never displaces the
/// incumbent, so the first face seen at the maximum area wins. Callers that
/// need a different tie-break must not get one silently from here.
#[must_use]
pub fn largest_face(faces: &[Face]) -> Option<&Face> {
    let mut max_face: Option<&Face> = None;
    for face in faces {
        match max_face {
            None => max_face = Some(face),
            Some(current) if face.rect.area() > current.rect.area() => {
                max_face = Some(face);
            }
            Some(_) => {}
        }
    }
    max_face
}

/// Why a selected face was not forwarded to the exposure collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RejectReason {
    #[error("score {score} not above threshold {threshold}")]
    LowScore { score: f32, threshold: f32 },

    #[error("face width {width}px below minimum {min_width}px")]
    TooNarrow { width: i32, min_width: i32 },

    #[error("face rectangle extends outside the image bounds")]
    OutOfBounds,
}

/// Acceptance filter for the largest detected face.
///
/// A face drives exposure weighting only when its score is strictly above the
/// threshold, it is at least `image_width / min_width_divisor` pixels wide,
/// and its rectangle lies fully inside the image. The strict score comparison
/// means a face scoring exactly at the threshold is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacePolicy {
    pub score_threshold: f32,
    pub min_width_divisor: u32,
}

impl Default for FacePolicy {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            min_width_divisor: DEFAULT_MIN_WIDTH_DIVISOR,
        }
    }
}

impl FacePolicy {
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

    /// Clamps fields into their valid ranges.
    #[must_use]
    pub fn validated(mut self) -> Self {
        if !self.score_threshold.is_finite() {
            self.score_threshold = DEFAULT_SCORE_THRESHOLD;
        }
        self.score_threshold = self.score_threshold.clamp(0.0, 1.0);
        self.min_width_divisor = self.min_width_divisor.max(1);
        self
    }

    /// Minimum acceptable face width for a frame of the given width.
    ///
    /// Integer division, matching the detector-side heuristic: for a 640px
    /// frame and divisor 5 a face exactly 128px wide passes.
    #[must_use]
    pub fn min_face_width(&self, image_width: u32) -> i32 {
        let min = image_width / self.min_width_divisor.max(1);
        i32::try_from(min).unwrap_or(i32::MAX)
    }

    /// Decides whether `face` is reportable within an image of the given size.
    pub fn evaluate(
        &self,
        face: &Face,
        image_width: u32,
        image_height: u32,
    ) -> Result<(), RejectReason> {
        if face.score.is_nan() || face.score <= self.score_threshold {
            return Err(RejectReason::LowScore {
                score: face.score,
                threshold: self.score_threshold,
            });
        }

        let min_width = self.min_face_width(image_width);
        if face.rect.width() < min_width {
            return Err(RejectReason::TooNarrow {
                width: face.rect.width(),
                min_width,
            });
        }

        if !face.rect.fits_within(image_width, image_height) {
            return Err(RejectReason::OutOfBounds);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FaceRect;
    use proptest::prelude::*;

    fn face(id: i32, left: i32, top: i32, right: i32, bottom: i32, score: f32) -> Face {
        Face {
            track_id: id,
            rect: FaceRect::new(left, top, right, bottom),
            score,
        }
    }

    #[test]
    fn empty_set_selects_nothing() {
        assert!(largest_face(&[]).is_none());
    }

    #[test]
    fn selects_max_area_regardless_of_order() {
        let small = face(1, 0, 0, 10, 10, 0.95);
        let mid = face(2, 0, 0, 50, 50, 0.95);
        let big = face(3, 0, 0, 200, 100, 0.95);

        let forward = [small, mid, big];
        let backward = [big, mid, small];
        let mixed = [mid, big, small];

        assert_eq!(largest_face(&forward).unwrap().track_id, 3);
        assert_eq!(largest_face(&backward).unwrap().track_id, 3);
        assert_eq!(largest_face(&mixed).unwrap().track_id, 3);
    }

    #[test]
    fn equal_area_keeps_first_seen() {
        // Same area, different shapes and positions.
        let first = face(7, 0, 0, 100, 100, 0.95);
        let second = face(8, 50, 50, 250, 100, 0.95);
        assert_eq!(first.rect.area(), second.rect.area());

        assert_eq!(largest_face(&[first, second]).unwrap().track_id, 7);
        assert_eq!(largest_face(&[second, first]).unwrap().track_id, 8);
    }

    #[test]
    fn score_exactly_at_threshold_is_rejected() {
        let policy = FacePolicy::default();
        let candidate = face(1, 100, 100, 400, 400, 0.9);
        assert!(matches!(
            policy.evaluate(&candidate, 640, 480),
            Err(RejectReason::LowScore { .. })
        ));
    }

    #[test]
    fn score_above_threshold_is_accepted() {
        let policy = FacePolicy::default();
        let candidate = face(1, 100, 100, 400, 400, 0.95);
        assert_eq!(policy.evaluate(&candidate, 640, 480), Ok(()));
    }

    #[test]
    fn nan_score_is_rejected() {
        let policy = FacePolicy::default();
        let candidate = face(1, 100, 100, 400, 400, f32::NAN);
        assert!(matches!(
            policy.evaluate(&candidate, 640, 480),
            Err(RejectReason::LowScore { .. })
        ));
    }

    #[test]
    fn width_exactly_at_minimum_is_accepted() {
        let policy = FacePolicy::default();
        // 640 / 5 = 128
        let candidate = face(1, 0, 0, 128, 128, 0.95);
        assert_eq!(policy.evaluate(&candidate, 640, 480), Ok(()));
    }

    #[test]
    fn width_one_pixel_under_minimum_is_rejected() {
        let policy = FacePolicy::default();
        let candidate = face(1, 0, 0, 127, 128, 0.95);
        assert_eq!(
            policy.evaluate(&candidate, 640, 480),
            Err(RejectReason::TooNarrow {
                width: 127,
                min_width: 128
            })
        );
    }

    #[test]
    fn min_width_uses_integer_division() {
        let policy = FacePolicy::default();
        // 639 / 5 = 127 (floor)
        assert_eq!(policy.min_face_width(639), 127);
    }

    #[test]
    fn high_score_face_outside_bounds_is_rejected() {
        let policy = FacePolicy::default();
        for rect in [
            FaceRect::new(-1, 0, 200, 200),
            FaceRect::new(0, -1, 200, 200),
            FaceRect::new(440, 0, 641, 200),
            FaceRect::new(0, 280, 200, 481),
        ] {
            let candidate = Face {
                track_id: 1,
                rect,
                score: 0.99,
            };
            assert_eq!(
                policy.evaluate(&candidate, 640, 480),
                Err(RejectReason::OutOfBounds),
                "rect {rect:?} should be out of bounds"
            );
        }
    }

    #[test]
    fn validated_clamps_fields() {
        let policy = FacePolicy {
            score_threshold: 1.5,
            min_width_divisor: 0,
        }
        .validated();
        assert_eq!(policy.score_threshold, 1.0);
        assert_eq!(policy.min_width_divisor, 1);

        let policy = FacePolicy {
            score_threshold: f32::NAN,
            min_width_divisor: 5,
        }
        .validated();
        assert_eq!(policy.score_threshold, DEFAULT_SCORE_THRESHOLD);
    }

    fn arb_face() -> impl Strategy<Value = Face> {
        (
            0i32..1000,
            0i32..600,
            0i32..400,
            1i32..200,
            1i32..200,
            0.0f32..1.0,
        )
            .prop_map(|(id, left, top, w, h, score)| {
                face(id, left, top, left + w, top + h, score)
            })
    }

    proptest! {
        #[test]
        fn selected_face_has_maximal_area(faces in prop::collection::vec(arb_face(), 0..32)) {
            match largest_face(&faces) {
                None => prop_assert!(faces.is_empty()),
                Some(selected) => {
                    for f in &faces {
                        prop_assert!(selected.rect.area() >= f.rect.area());
                    }
                }
            }
        }

        #[test]
        fn selection_never_invents_a_face(faces in prop::collection::vec(arb_face(), 1..32)) {
            let selected = largest_face(&faces).unwrap();
            prop_assert!(faces.iter().any(|f| f == selected));
        }

        #[test]
        fn accepted_face_is_always_in_bounds(f in arb_face()) {
            let policy = FacePolicy::default();
            if policy.evaluate(&f, 640, 480).is_ok() {
                prop_assert!(f.rect.fits_within(640, 480));
                prop_assert!(f.score > policy.score_threshold);
                prop_assert!(f.rect.width() >= policy.min_face_width(640));
            }
        }
    }
}
