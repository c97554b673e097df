use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Axis-aligned face rectangle in pixel coordinates of the source frame.
///
/// Coordinates come straight from the detector and may lie outside the image;
/// [`crate::FacePolicy`] is responsible for rejecting those before anything
/// downstream sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FaceRect {
    /// All-zero rectangle, used as the "clear" sentinel on the overlay ABI.
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn width(self) -> i32 {
        self.right - self.left
    }

    #[must_use]
    pub const fn height(self) -> i32 {
        self.bottom - self.top
    }

    /// Rectangle area, widened to avoid overflow on degenerate detector output.
    #[must_use]
    pub const fn area(self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// True when the rectangle lies fully inside a `width` x `height` image.
    #[must_use]
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        let (w, h) = (i64::from(width), i64::from(height));
        self.left >= 0
            && self.top >= 0
            && i64::from(self.right) <= w
            && i64::from(self.bottom) <= h
    }
}

/// One candidate face produced by the detector for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Detector-side track identifier. Carried through unused by this layer.
    pub track_id: i32,
    pub rect: FaceRect,
    /// Detection confidence in `0.0..=1.0`.
    pub score: f32,
}

/// Pixel layouts the detector ABI understands.
///
/// The discriminants must stay in the vendor header's order; `as_raw` is what
/// crosses the FFI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Gray8,
    Rgb888,
    Bgr888,
    Rgba8888,
    Bgra8888,
    /// YUV420P YU12: YYYYYYYY UU VV
    Yu12,
    /// YUV420P YV12: YYYYYYYY VV UU
    Yv12,
    /// YUV420SP NV12: YYYYYYYY UVUV
    Nv12,
    /// YUV420SP NV21: YYYYYYYY VUVU
    Nv21,
    Yu16,
    Yv16,
    Nv16,
    Nv61,
}

impl PixelFormat {
    /// Raw value of the matching vendor enum entry.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Gray8 => 0,
            Self::Rgb888 => 1,
            Self::Bgr888 => 2,
            Self::Rgba8888 => 3,
            Self::Bgra8888 => 4,
            Self::Yu12 => 5,
            Self::Yv12 => 6,
            Self::Nv12 => 7,
            Self::Nv21 => 8,
            Self::Yu16 => 9,
            Self::Yv16 => 10,
            Self::Nv16 => 11,
            Self::Nv61 => 12,
        }
    }

    /// Expected buffer length in bytes for a `width` x `height` frame.
    ///
    /// Subsampled chroma planes round odd dimensions up, matching how the
    /// capture hardware allocates them.
    #[must_use]
    pub const fn buffer_len(self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        let chroma_w = width.div_ceil(2) as usize;
        let chroma_h = height.div_ceil(2) as usize;
        match self {
            Self::Gray8 => pixels,
            Self::Rgb888 | Self::Bgr888 => pixels * 3,
            Self::Rgba8888 | Self::Bgra8888 => pixels * 4,
            // 4:2:0 - one chroma sample pair per 2x2 luma block
            Self::Yu12 | Self::Yv12 | Self::Nv12 | Self::Nv21 => {
                pixels + chroma_w * chroma_h * 2
            }
            // 4:2:2 - one chroma sample pair per 2x1 luma block
            Self::Yu16 | Self::Yv16 | Self::Nv16 | Self::Nv61 => {
                pixels + chroma_w * height as usize * 2
            }
        }
    }
}

/// Hardware surface format tags as delivered by the RGA conversion helper in
/// the capture pipeline. Only a subset of what the hardware can emit is
/// meaningful to the detector; see [`SurfaceFormat::to_pixel_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceFormat {
    Rgba8888,
    Rgb888,
    Rgb565,
    YCbCr422Sp,
    YCbCr420Sp,
    YCrCb420Sp,
}

impl SurfaceFormat {
    /// Maps a surface tag to the detector pixel format.
    ///
    /// The detection path only accepts 4:2:0 semi-planar YCbCr (NV12); every
    /// other surface is rejected upstream rather than converted.
    #[must_use]
    pub const fn to_pixel_format(self) -> Option<PixelFormat> {
        match self {
            Self::YCbCr420Sp => Some(PixelFormat::Nv12),
            _ => None,
        }
    }
}

impl std::fmt::Display for SurfaceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rgba8888 => "RGBA8888",
            Self::Rgb888 => "RGB888",
            Self::Rgb565 => "RGB565",
            Self::YCbCr422Sp => "YCbCr422SP",
            Self::YCbCr420Sp => "YCbCr420SP",
            Self::YCrCb420Sp => "YCrCb420SP",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("frame buffer too small: {got} bytes, expected at least {expected}")]
    BufferTooSmall { expected: usize, got: usize },

    #[error("unsupported surface format: {0}")]
    UnsupportedSurface(SurfaceFormat),
}

/// One decoded video frame, borrowed from the capture pipeline for the
/// duration of a single detection call.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl<'a> Frame<'a> {
    /// Wraps a pixel buffer, validating dimensions and buffer length up front
    /// so the FFI layer never hands the detector a short read.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        let expected = format.buffer_len(width, height);
        if data.len() < expected {
            return Err(FrameError::BufferTooSmall {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn format(&self) -> PixelFormat {
        self.format
    }
}
