#![allow(missing_docs)]
//! Stub for builds without the `intel_qsv_decoder` system dependency.

use crate::decoder::StreamDecoder;
use crate::error::{DecodeError, Result};

/// Stub decoder used when the `qsvdec_ffi_stub` cfg is active.
pub struct QsvDecoder;

impl QsvDecoder {
    pub fn new() -> Result<Self> {
        Err(DecodeError::Unavailable)
    }
}

impl StreamDecoder for QsvDecoder {
    fn decode_header(&mut self, _chunk: &[u8]) -> i32 {
        -1
    }

    fn decode(&mut self, _chunk: &[u8]) -> i32 {
        -1
    }

    fn get_frame(&mut self, _out: &mut [u8], _conv_opt: i32) -> i32 {
        -1
    }

    fn drain_frame(&mut self, _out: &mut [u8], _conv_opt: i32) -> i32 {
        -1
    }

    fn width(&self) -> i32 {
        0
    }

    fn height(&self) -> i32 {
        0
    }

    fn is_init(&self) -> bool {
        false
    }
}
