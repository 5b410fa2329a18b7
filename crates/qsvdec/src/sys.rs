//! Raw FFI bindings to the Intel QSV H.264 decoder library.
//!
//! Covers the single-instance entry points of `intel_qsv_decoder`; the
//! library owns exactly one decoder behind this surface. The multi-instance
//! `m_*` family exported alongside it is intentionally not bound — the
//! harness drives a single decoder.
//!
//! # Linking
//!
//! `build.rs` emits `-l intel_qsv_decoder` when the shared library is
//! found (via `QSV_DECODER_DIR` or a vendored `third_party/qsv_decoder`).
//! Otherwise the crate builds with `qsvdec_ffi_stub` and nothing here is
//! referenced.
//!
//! # Safety
//!
//! All functions in this module are `unsafe extern "C"`. The safe wrapper
//! in `qsv.rs` enforces the invariants documented per function.

#![allow(non_snake_case, dead_code)]

use std::os::raw::c_int;

/// Native status code.
///
/// `initialize`, `decodeHeader` and `decode` return 0 on success;
/// `getFrame`/`drainFrame` return positive when a frame was written and
/// zero or negative when no frame is ready. The sign convention is not
/// uniform across calls — interpret per call site.
pub type QsvStatus = c_int;

/// Success for the 0-on-success family of calls.
pub const QSV_OK: QsvStatus = 0;

unsafe extern "C" {
    /// Allocate and initialize the process-wide decoder instance.
    pub fn initialize() -> QsvStatus;

    /// Release the decoder instance. Must be paired with a successful
    /// `initialize` and called exactly once.
    pub fn uninitialize();

    /// Parse the stream header (resolution, profile). Must succeed before
    /// steady-state `decode` calls; `isInit` reports completion.
    pub fn decodeHeader(input: *const u8, length: usize) -> QsvStatus;

    /// Feed one elementary-stream fragment. 0 means at least one frame
    /// became decodable; nonzero may only mean insufficient data.
    pub fn decode(input: *const u8, length: usize) -> QsvStatus;

    /// Combined decode + frame fetch in one call.
    pub fn decode_get(
        input: *const u8,
        length: usize,
        out: *mut u8,
        conv_opt: c_int,
    ) -> QsvStatus;

    /// Retrieve one ready frame into `out` (`getWidth * getHeight * 3`
    /// bytes are written). Positive = frame written; poll until
    /// non-positive to drain.
    pub fn getFrame(out: *mut u8, conv_opt: c_int) -> QsvStatus;

    /// End-of-stream flush variant of `getFrame` for frames still
    /// buffered inside the decoder.
    pub fn drainFrame(out: *mut u8, conv_opt: c_int) -> QsvStatus;

    /// Current frame width. May change between `decode` calls.
    pub fn getWidth() -> c_int;

    /// Current frame height. May change between `decode` calls.
    pub fn getHeight() -> c_int;

    /// True once header decoding has completed.
    pub fn isInit() -> bool;
}
