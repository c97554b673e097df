//! Raw declarations mirroring `rockface.h` and `rkisp_control.h`.
//!
//! Struct layouts must match the vendor headers field for field; the safe
//! wrappers in the sibling modules are the only callers.

use std::ffi::{c_char, c_int, c_void};

pub const MAX_FACE_COUNT: usize = crate::MAX_DETECTIONS;

pub type RockfaceHandle = *mut c_void;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RockfaceRect {
    pub left: c_int,
    pub top: c_int,
    pub right: c_int,
    pub bottom: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RockfaceImage {
    pub data: *const u8,
    pub size: u32,
    pub is_prealloc_buf: u8,
    pub pixel_format: c_int,
    pub width: u32,
    pub height: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RockfaceDet {
    pub id: c_int,
    pub reserve: c_int,
    pub rect: RockfaceRect,
    pub score: f32,
}

#[repr(C)]
pub struct RockfaceDetArray {
    pub count: c_int,
    pub faces: [RockfaceDet; MAX_FACE_COUNT],
}

impl RockfaceDetArray {
    pub const fn zeroed() -> Self {
        Self {
            count: 0,
            faces: [RockfaceDet {
                id: 0,
                reserve: 0,
                rect: RockfaceRect {
                    left: 0,
                    top: 0,
                    right: 0,
                    bottom: 0,
                },
                score: 0.0,
            }; MAX_FACE_COUNT],
        }
    }
}

#[link(name = "rockface")]
extern "C" {
    pub fn rockface_create_handle() -> RockfaceHandle;
    pub fn rockface_release_handle(handle: RockfaceHandle) -> c_int;
    pub fn rockface_set_data_path(handle: RockfaceHandle, data_path: *const c_char) -> c_int;
    pub fn rockface_init_detector(handle: RockfaceHandle) -> c_int;
    pub fn rockface_detect(
        handle: RockfaceHandle,
        image: *const RockfaceImage,
        faces: *mut RockfaceDetArray,
    ) -> c_int;
}

#[link(name = "rkisp_control")]
extern "C" {
    pub fn rkisp_control_init() -> c_int;
    pub fn rkisp_control_exit();
    pub fn rkisp_control_expo_weights_90(left: c_int, top: c_int, right: c_int, bottom: c_int);
    pub fn rkisp_control_expo_weights_default();
}
